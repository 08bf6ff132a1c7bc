use crate::geometry::Winding;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

use super::half_edge::HalfEdgeGraph;

/// A closed face cycle of the half-edge graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLoop {
    pub face_id: usize,
    /// Vertex ids in walk order, closed (first id repeated at the end).
    pub vertex_loop: Vec<usize>,
    /// Vertex positions matching `vertex_loop`, closed.
    pub boundary: Vec<Point2>,
    pub half_edge_cycle: Vec<usize>,
    pub signed_area: f64,
    pub winding: Winding,
}

impl FaceLoop {
    #[must_use]
    pub fn abs_area(&self) -> f64 {
        self.signed_area.abs()
    }

    /// Number of distinct vertex ids on the loop.
    #[must_use]
    pub fn distinct_vertex_count(&self) -> usize {
        distinct_count(&self.vertex_loop)
    }
}

/// Diagnostic counters of one enumeration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceEnumStats {
    pub faces: usize,
    pub small_faces: usize,
    /// Largest absolute face areas, descending, at most three.
    pub top_abs_areas: Vec<f64>,
}

/// Every valid face cycle of a graph, plus the half-edge to face map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceEnumeration {
    pub faces: Vec<FaceLoop>,
    /// Cycles that failed to close or had fewer than 3 distinct vertices.
    pub small_face_count: usize,
    /// Face id of each half-edge, `None` when its cycle was discarded.
    pub face_of_half_edge: Vec<Option<usize>>,
}

impl FaceEnumeration {
    #[must_use]
    pub fn stats(&self) -> FaceEnumStats {
        let mut areas: Vec<f64> = self.faces.iter().map(FaceLoop::abs_area).collect();
        areas.sort_by(|a, b| b.total_cmp(a));
        areas.truncate(3);
        FaceEnumStats {
            faces: self.faces.len(),
            small_faces: self.small_face_count,
            top_abs_areas: areas,
        }
    }
}

/// Partitions all half-edges into face cycles.
///
/// Each walk follows `next` links from an unvisited half-edge for at most
/// `half_edges + 2` steps. Every half-edge touched is marked visited
/// whatever the outcome, so none is walked twice.
#[must_use]
pub fn enumerate_faces(graph: &HalfEdgeGraph) -> FaceEnumeration {
    let total = graph.len();
    let mut visited = vec![false; total];
    let mut face_of_half_edge = vec![None; total];
    let mut faces: Vec<FaceLoop> = Vec::new();
    let mut small_face_count = 0;

    for start in 0..total {
        if visited[start] {
            continue;
        }

        let mut cycle = Vec::new();
        let mut current = start;
        let mut closed = false;
        for _ in 0..total + 2 {
            if visited[current] {
                break;
            }
            visited[current] = true;
            cycle.push(current);
            match graph.next(current) {
                Some(next) if next == start => {
                    closed = true;
                    break;
                }
                Some(next) => current = next,
                None => break,
            }
        }

        let mut vertex_loop: Vec<usize> = cycle
            .iter()
            .map(|&h| graph.half_edges[h].origin)
            .collect();
        if !closed || distinct_count(&vertex_loop) < 3 {
            small_face_count += 1;
            continue;
        }

        let mut boundary: Vec<Point2> = vertex_loop.iter().map(|&v| graph.vertices[v]).collect();
        let signed_area = signed_area_2d(&boundary);
        vertex_loop.push(vertex_loop[0]);
        boundary.push(boundary[0]);

        let face_id = faces.len();
        for &h in &cycle {
            face_of_half_edge[h] = Some(face_id);
        }
        faces.push(FaceLoop {
            face_id,
            vertex_loop,
            boundary,
            half_edge_cycle: cycle,
            signed_area,
            winding: Winding::from_signed_area(signed_area),
        });
    }

    FaceEnumeration {
        faces,
        small_face_count,
        face_of_half_edge,
    }
}

fn distinct_count(ids: &[usize]) -> usize {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::operations::overlap::planarize::{planarize_ring, planarize_segments};
    use crate::policy::DeterminismPolicy;

    fn faces_of(coords: &[(f64, f64)]) -> FaceEnumeration {
        let ring: Vec<Point2> = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let planar = planarize_ring(&ring, &DeterminismPolicy::default());
        enumerate_faces(&HalfEdgeGraph::build(&planar.graph))
    }

    #[test]
    fn rectangle_has_inner_and_outer_face() {
        let result = faces_of(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(result.faces.len(), 2);
        assert_eq!(result.small_face_count, 0);
        for face in &result.faces {
            assert_abs_diff_eq!(face.abs_area(), 2.0, epsilon = 1e-12);
            assert_eq!(face.distinct_vertex_count(), 4);
            assert_eq!(face.vertex_loop.first(), face.vertex_loop.last());
            assert_eq!(face.boundary.first(), face.boundary.last());
        }
        // Inner and outer loops wind in opposite directions.
        assert_ne!(result.faces[0].winding, result.faces[1].winding);
    }

    #[test]
    fn bow_tie_has_two_triangles_and_outer_face() {
        let result = faces_of(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        assert_eq!(result.faces.len(), 3);
        let mut areas: Vec<f64> = result.faces.iter().map(FaceLoop::abs_area).collect();
        areas.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(areas[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(areas[1], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(areas[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn every_half_edge_belongs_to_one_face() {
        let result = faces_of(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let total: usize = result.faces.iter().map(|f| f.half_edge_cycle.len()).sum();
        assert_eq!(total, result.face_of_half_edge.len());
        for face in &result.faces {
            for &h in &face.half_edge_cycle {
                assert_eq!(result.face_of_half_edge[h], Some(face.face_id));
            }
        }
    }

    #[test]
    fn open_path_yields_no_faces() {
        let segments = vec![
            (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)),
        ];
        let planar = planarize_segments(&segments, &DeterminismPolicy::default());
        let result = enumerate_faces(&HalfEdgeGraph::build(&planar.graph));
        assert!(result.faces.is_empty());
        assert!(result.small_face_count > 0);
        assert!(result.face_of_half_edge.iter().all(Option::is_none));
    }

    #[test]
    fn stats_report_top_areas() {
        let result = faces_of(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let stats = result.stats();
        assert_eq!(stats.faces, 3);
        assert_eq!(stats.top_abs_areas.len(), 3);
        assert_abs_diff_eq!(stats.top_abs_areas[0], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_graph_has_no_faces() {
        let result = enumerate_faces(&HalfEdgeGraph::default());
        assert!(result.faces.is_empty());
        assert_eq!(result.small_face_count, 0);
    }
}
