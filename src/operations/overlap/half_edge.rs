use crate::math::Point2;

use super::planarize::PlanarGraph;

/// One directed side of a planar edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    pub id: usize,
    /// Vertex this half-edge leaves from.
    pub origin: usize,
    /// Vertex this half-edge arrives at.
    pub to: usize,
    /// The opposite half-edge of the same planar edge.
    pub twin: usize,
    /// Following half-edge around the same face; `None` at a dead end.
    pub next: Option<usize>,
    /// Half-edge whose `next` is this one.
    pub prev: Option<usize>,
    /// Direction angle (`atan2`) from origin to destination.
    pub angle: f64,
}

/// Diagnostic counters of a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    pub vertices: usize,
    pub half_edges: usize,
    pub twins_paired: usize,
    pub dead_ends: usize,
}

/// Half-edge structure over a planar graph, stored as flat index arrays.
///
/// Half-edges `2k` and `2k + 1` are the two sides of planar edge `k`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HalfEdgeGraph {
    pub vertices: Vec<Point2>,
    pub half_edges: Vec<HalfEdge>,
    /// Outgoing half-edges per vertex, sorted by angle, then destination,
    /// then id.
    pub outgoing: Vec<Vec<usize>>,
}

impl HalfEdgeGraph {
    /// Builds the half-edge structure and resolves every `next` link.
    #[must_use]
    pub fn build(planar: &PlanarGraph) -> Self {
        let vertices: Vec<Point2> = planar.vertices.iter().map(|v| v.position).collect();
        let mut half_edges = Vec::with_capacity(planar.edges.len() * 2);
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];

        for edge in &planar.edges {
            let (a, b) = (edge.u, edge.v);
            let d_ab = vertices[b] - vertices[a];
            let d_ba = vertices[a] - vertices[b];
            let ab = half_edges.len();
            let ba = ab + 1;
            half_edges.push(HalfEdge {
                id: ab,
                origin: a,
                to: b,
                twin: ba,
                next: None,
                prev: None,
                angle: d_ab.y.atan2(d_ab.x),
            });
            half_edges.push(HalfEdge {
                id: ba,
                origin: b,
                to: a,
                twin: ab,
                next: None,
                prev: None,
                angle: d_ba.y.atan2(d_ba.x),
            });
            outgoing[a].push(ab);
            outgoing[b].push(ba);
        }

        for edges_at in &mut outgoing {
            edges_at.sort_by(|&x, &y| {
                let (hx, hy) = (&half_edges[x], &half_edges[y]);
                hx.angle
                    .total_cmp(&hy.angle)
                    .then(hx.to.cmp(&hy.to))
                    .then(x.cmp(&y))
            });
        }

        // Slot of each half-edge within its origin's sorted list.
        let mut slot = vec![0; half_edges.len()];
        for edges_at in &outgoing {
            for (i, &h) in edges_at.iter().enumerate() {
                slot[h] = i;
            }
        }

        // Rotate from the twin to the next outgoing edge at the shared vertex.
        for h in 0..half_edges.len() {
            let twin = half_edges[h].twin;
            let edges_at = &outgoing[half_edges[h].to];
            let candidate = edges_at[(slot[twin] + 1) % edges_at.len()];
            if candidate != twin {
                half_edges[h].next = Some(candidate);
                half_edges[candidate].prev = Some(h);
            }
        }

        Self {
            vertices,
            half_edges,
            outgoing,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.half_edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.half_edges.is_empty()
    }

    #[must_use]
    pub fn twin(&self, h: usize) -> usize {
        self.half_edges[h].twin
    }

    /// Next half-edge around the face of `h`, or `None` at a dead end.
    #[must_use]
    pub fn next(&self, h: usize) -> Option<usize> {
        self.half_edges[h].next
    }

    #[must_use]
    pub fn degree(&self, v: usize) -> usize {
        self.outgoing[v].len()
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertices: self.vertices.len(),
            half_edges: self.half_edges.len(),
            twins_paired: self
                .half_edges
                .iter()
                .filter(|h| self.half_edges[h.twin].twin == h.id)
                .count(),
            dead_ends: self.half_edges.iter().filter(|h| h.next.is_none()).count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::overlap::planarize::{planarize_ring, planarize_segments};
    use crate::policy::DeterminismPolicy;

    fn ring(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn rectangle_graph() -> HalfEdgeGraph {
        let rect = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let planar = planarize_ring(&rect, &DeterminismPolicy::default());
        HalfEdgeGraph::build(&planar.graph)
    }

    #[test]
    fn twins_are_mutual() {
        let graph = rectangle_graph();
        assert_eq!(graph.len() % 2, 0);
        for (idx, he) in graph.half_edges.iter().enumerate() {
            assert_eq!(graph.twin(he.twin), idx);
            assert_eq!(graph.half_edges[he.twin].origin, he.to);
        }
    }

    #[test]
    fn next_prev_consistency_simple_square() {
        let graph = rectangle_graph();
        for (idx, he) in graph.half_edges.iter().enumerate() {
            let next = he.next.unwrap();
            let prev = he.prev.unwrap();
            assert_eq!(graph.half_edges[next].prev, Some(idx));
            assert_eq!(graph.half_edges[prev].next, Some(idx));
            assert_eq!(graph.half_edges[next].origin, he.to);
        }
        assert_eq!(graph.stats().dead_ends, 0);
        assert_eq!(graph.stats().twins_paired, 8);
    }

    #[test]
    fn outgoing_sorted_by_angle() {
        let bow_tie = ring(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let planar = planarize_ring(&bow_tie, &DeterminismPolicy::default());
        let graph = HalfEdgeGraph::build(&planar.graph);
        let center = graph
            .vertices
            .iter()
            .position(|p| (p.x - 1.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9)
            .unwrap();
        assert_eq!(graph.degree(center), 4);
        let angles: Vec<f64> = graph.outgoing[center]
            .iter()
            .map(|&h| graph.half_edges[h].angle)
            .collect();
        assert!(angles.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn dead_end_has_no_next() {
        let segments = vec![
            (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)),
        ];
        let planar = planarize_segments(&segments, &DeterminismPolicy::default());
        let graph = HalfEdgeGraph::build(&planar.graph);
        // Half-edge 0 runs 0 -> 1 and continues along the path.
        assert_eq!(graph.next(0), Some(2));
        // Half-edge 2 runs 1 -> 2 and stops at the degree-one end.
        assert_eq!(graph.next(2), None);
        assert_eq!(graph.stats().dead_ends, 2);
    }

    #[test]
    fn deterministic_half_edge_ordering() {
        let a = rectangle_graph();
        let b = rectangle_graph();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_planar_graph() {
        let graph = HalfEdgeGraph::build(&PlanarGraph::default());
        assert!(graph.is_empty());
        assert_eq!(graph.stats(), GraphStats::default());
    }
}
