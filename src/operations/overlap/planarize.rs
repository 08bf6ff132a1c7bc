use std::collections::{HashMap, HashSet};

use crate::math::intersect_2d::{is_endpoint_param, segment_segment_intersect_2d};
use crate::math::tolerance::{approx_eq_point, snap_key, SnapKey};
use crate::math::Point2;
use crate::policy::DeterminismPolicy;

/// One distinct spatial location after snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarVertex {
    pub id: usize,
    pub position: Point2,
    pub snap_key: SnapKey,
}

/// An undirected, non-degenerate edge between two planar vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanarEdge {
    pub u: usize,
    pub v: usize,
}

/// Diagnostic counters of one planarization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarizeStats {
    pub segments: usize,
    pub intersections: usize,
    pub split_min: usize,
    pub split_max: usize,
    pub split_avg: f64,
    pub vertices: usize,
    pub edges: usize,
    pub dropped_zero_length: usize,
}

/// A planar straight-line graph: edges meet only at shared vertices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarGraph {
    pub vertices: Vec<PlanarVertex>,
    pub edges: Vec<PlanarEdge>,
}

impl PlanarGraph {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Position of vertex `id`.
    #[must_use]
    pub fn position(&self, id: usize) -> Point2 {
        self.vertices[id].position
    }
}

/// Planarizer output: the graph, the recorded crossings and counters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanarizeOutput {
    pub graph: PlanarGraph,
    pub intersections: Vec<Point2>,
    pub stats: PlanarizeStats,
}

/// A candidate split point on one input segment.
#[derive(Debug, Clone, Copy)]
struct SplitPoint {
    t: f64,
    point: Point2,
}

/// Splits a (possibly self-crossing) ring into a planar graph.
///
/// The ring is closed if needed. Adjacent segments, including the
/// wraparound pair, are never tested against each other. Rings with fewer
/// than 4 points produce an empty graph.
#[must_use]
pub fn planarize_ring(ring: &[Point2], policy: &DeterminismPolicy) -> PlanarizeOutput {
    if ring.len() < 4 {
        return PlanarizeOutput {
            stats: PlanarizeStats {
                segments: ring.len().saturating_sub(1),
                ..PlanarizeStats::default()
            },
            ..PlanarizeOutput::default()
        };
    }

    let mut points = ring.to_vec();
    if !approx_eq_point(&points[0], &points[points.len() - 1], policy.eps) {
        points.push(points[0]);
    }

    let segments: Vec<(Point2, Point2)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    planarize(&segments, true, policy)
}

/// Splits an arbitrary segment soup into a planar graph.
///
/// Every pair of segments is tested; touches at shared endpoints are not
/// recorded as crossings.
#[must_use]
pub fn planarize_segments(
    segments: &[(Point2, Point2)],
    policy: &DeterminismPolicy,
) -> PlanarizeOutput {
    planarize(segments, false, policy)
}

fn planarize(
    segments: &[(Point2, Point2)],
    ring_adjacency: bool,
    policy: &DeterminismPolicy,
) -> PlanarizeOutput {
    let eps = policy.eps;
    let seg_count = segments.len();

    let mut splits: Vec<Vec<SplitPoint>> = segments
        .iter()
        .map(|&(a, b)| {
            vec![
                SplitPoint { t: 0.0, point: a },
                SplitPoint { t: 1.0, point: b },
            ]
        })
        .collect();

    // Step 1: Record every proper crossing on both participating segments.
    let mut intersections = Vec::new();
    for i in 0..seg_count {
        for j in (i + 1)..seg_count {
            if ring_adjacency && (j == i + 1 || (i == 0 && j == seg_count - 1)) {
                continue;
            }
            let (a0, a1) = segments[i];
            let (b0, b1) = segments[j];
            let Some(hit) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1, eps) else {
                continue;
            };
            // Coincident vertices, not crossings.
            if is_endpoint_param(hit.t, eps) && is_endpoint_param(hit.u, eps) {
                continue;
            }
            splits[i].push(SplitPoint {
                t: hit.t,
                point: hit.point,
            });
            splits[j].push(SplitPoint {
                t: hit.u,
                point: hit.point,
            });
            intersections.push(hit.point);
        }
    }

    // Step 2: Walk each segment's split points in order and emit sub-edges.
    let mut builder = GraphBuilder::new(eps);
    let mut split_counts = Vec::with_capacity(seg_count);
    for parts in &mut splits {
        parts.sort_by(|a, b| {
            a.t.total_cmp(&b.t)
                .then_with(|| policy.tie_break.compare_points(&a.point, &b.point))
        });

        let mut split_count = 0;
        let mut last: Option<Point2> = None;
        for part in parts.iter() {
            if let Some(prev) = last {
                if (part.point - prev).norm() <= eps {
                    continue;
                }
                builder.add_edge(prev, part.point);
            }
            split_count += 1;
            last = Some(part.point);
        }
        split_counts.push(split_count);
    }

    let stats = PlanarizeStats {
        segments: seg_count,
        intersections: intersections.len(),
        split_min: split_counts.iter().copied().min().unwrap_or(0),
        split_max: split_counts.iter().copied().max().unwrap_or(0),
        split_avg: average(&split_counts),
        vertices: builder.graph.vertices.len(),
        edges: builder.graph.edges.len(),
        dropped_zero_length: builder.dropped_zero_length,
    };

    PlanarizeOutput {
        graph: builder.graph,
        intersections,
        stats,
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(counts: &[usize]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Accumulates snapped vertices and deduplicated edges.
struct GraphBuilder {
    eps: f64,
    graph: PlanarGraph,
    vertex_index: HashMap<SnapKey, usize>,
    edge_set: HashSet<(usize, usize)>,
    dropped_zero_length: usize,
}

impl GraphBuilder {
    fn new(eps: f64) -> Self {
        Self {
            eps,
            graph: PlanarGraph::default(),
            vertex_index: HashMap::new(),
            edge_set: HashSet::new(),
            dropped_zero_length: 0,
        }
    }

    /// Finds or inserts the vertex for `p`, returning its id.
    fn vertex_for(&mut self, p: Point2) -> usize {
        let key = snap_key(&p, self.eps);
        if let Some(&id) = self.vertex_index.get(&key) {
            return id;
        }
        let id = self.graph.vertices.len();
        self.vertex_index.insert(key, id);
        self.graph.vertices.push(PlanarVertex {
            id,
            position: p,
            snap_key: key,
        });
        id
    }

    fn add_edge(&mut self, a: Point2, b: Point2) {
        let u = self.vertex_for(a);
        let v = self.vertex_for(b);
        if u == v {
            self.dropped_zero_length += 1;
            return;
        }
        let key = (u.min(v), u.max(v));
        if self.edge_set.contains(&key) {
            return;
        }
        let len = (self.graph.position(u) - self.graph.position(v)).norm();
        if len <= self.eps {
            self.dropped_zero_length += 1;
            return;
        }
        self.edge_set.insert(key);
        self.graph.edges.push(PlanarEdge { u, v });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn rectangle() -> Vec<Point2> {
        pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0), (0.0, 0.0)])
    }

    fn bow_tie() -> Vec<Point2> {
        pts(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0), (0.0, 0.0)])
    }

    #[test]
    fn simple_rectangle_has_no_crossings() {
        let out = planarize_ring(&rectangle(), &DeterminismPolicy::default());
        assert_eq!(out.stats.segments, 4);
        assert_eq!(out.stats.intersections, 0);
        assert!(out.intersections.is_empty());
        assert_eq!(out.graph.vertices.len(), 4);
        assert_eq!(out.graph.edges.len(), 4);
        assert_eq!(out.stats.split_min, 2);
        assert_eq!(out.stats.split_max, 2);
        assert_abs_diff_eq!(out.stats.split_avg, 2.0);
    }

    #[test]
    fn bow_tie_splits_at_center() {
        let out = planarize_ring(&bow_tie(), &DeterminismPolicy::default());
        assert_eq!(out.stats.intersections, 1);
        let hit = out.intersections[0];
        assert_abs_diff_eq!(hit.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.y, 1.0, epsilon = 1e-9);
        assert_eq!(out.graph.vertices.len(), 5);
        assert_eq!(out.graph.edges.len(), 6);
        assert_eq!(out.stats.split_max, 3);
    }

    #[test]
    fn open_ring_is_closed() {
        let mut ring = bow_tie();
        ring.pop();
        let closed = planarize_ring(&bow_tie(), &DeterminismPolicy::default());
        let open = planarize_ring(&ring, &DeterminismPolicy::default());
        assert_eq!(open, closed);
    }

    #[test]
    fn short_ring_is_empty() {
        let out = planarize_ring(
            &pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
            &DeterminismPolicy::default(),
        );
        assert!(out.graph.is_empty());
        assert!(out.graph.vertices.is_empty());
        assert_eq!(out.stats.segments, 2);
    }

    #[test]
    fn collapsed_ring_has_no_edges() {
        let p = (1.0, 1.0);
        let out = planarize_ring(&pts(&[p, p, p, p]), &DeterminismPolicy::default());
        assert!(out.graph.is_empty());
        assert_eq!(out.graph.vertices.len(), 0);
    }

    #[test]
    fn near_duplicate_points_share_a_vertex() {
        let ring = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0 + 1e-9, 1e-9),
            (2.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        let out = planarize_ring(&ring, &DeterminismPolicy::default());
        assert_eq!(out.graph.vertices.len(), 4);
        assert_eq!(out.graph.edges.len(), 4);
    }

    #[test]
    fn retraced_edges_are_deduplicated() {
        // Out along the x axis and back along the same line.
        let ring = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        let out = planarize_ring(&ring, &DeterminismPolicy::default());
        assert_eq!(out.graph.vertices.len(), 3);
        assert_eq!(out.graph.edges.len(), 2);
    }

    #[test]
    fn soup_splits_crossing_segments() {
        let segments = vec![
            (Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)),
            (Point2::new(0.0, 10.0), Point2::new(10.0, 0.0)),
        ];
        let out = planarize_segments(&segments, &DeterminismPolicy::default());
        assert_eq!(out.stats.intersections, 1);
        assert_eq!(out.stats.edges, 4);
        assert_eq!(out.stats.vertices, 5);
    }

    #[test]
    fn soup_skips_shared_endpoints() {
        let segments = vec![
            (Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            (Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)),
        ];
        let out = planarize_segments(&segments, &DeterminismPolicy::default());
        assert_eq!(out.stats.intersections, 0);
        assert_eq!(out.graph.vertices.len(), 3);
        assert_eq!(out.graph.edges.len(), 2);
    }

    #[test]
    fn t_junction_splits_only_the_touched_segment() {
        // Segment 2 ends in the middle of segment 0.
        let segments = vec![
            (Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)),
            (Point2::new(5.0, 5.0), Point2::new(1.0, 3.0)),
            (Point2::new(1.0, 3.0), Point2::new(1.0, 0.0)),
        ];
        let out = planarize_segments(&segments, &DeterminismPolicy::default());
        assert_eq!(out.stats.intersections, 1);
        assert_eq!(out.graph.edges.len(), 4);
    }

    #[test]
    fn output_edges_do_not_cross() {
        let ring = pts(&[
            (0.0, 0.0),
            (4.0, 3.0),
            (0.0, 3.0),
            (4.0, 0.0),
            (2.0, 5.0),
            (0.0, 0.0),
        ]);
        let policy = DeterminismPolicy::default();
        let out = planarize_ring(&ring, &policy);
        let g = &out.graph;
        for (i, e) in g.edges.iter().enumerate() {
            for f in &g.edges[i + 1..] {
                let shared = e.u == f.u || e.u == f.v || e.v == f.u || e.v == f.v;
                if shared {
                    continue;
                }
                let hit = segment_segment_intersect_2d(
                    &g.position(e.u),
                    &g.position(e.v),
                    &g.position(f.u),
                    &g.position(f.v),
                    policy.eps,
                );
                assert!(hit.is_none(), "edges {e:?} and {f:?} cross");
            }
        }
    }

    #[test]
    fn planarization_is_deterministic() {
        let ring = pts(&[
            (0.0, 0.0),
            (4.0, 3.0),
            (0.0, 3.0),
            (4.0, 0.0),
            (2.0, 5.0),
            (0.0, 0.0),
        ]);
        let policy = DeterminismPolicy::default();
        assert_eq!(planarize_ring(&ring, &policy), planarize_ring(&ring, &policy));
    }
}
