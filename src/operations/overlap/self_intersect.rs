use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::tolerance::approx_eq_point;
use crate::math::Point2;

/// Finds proper crossings between non-adjacent edges of a ring.
///
/// The ring may be explicitly closed or not. Zero-length edges are ignored,
/// as are hits within `eps` of any participating endpoint.
#[must_use]
pub fn ring_self_intersection_points(ring: &[Point2], eps: f64) -> Vec<Point2> {
    let n = ring.len();
    if n < 4 {
        return Vec::new();
    }
    let edge_count = if approx_eq_point(&ring[0], &ring[n - 1], eps) {
        n - 1
    } else {
        n
    };

    let edge = |i: usize| (ring[i], ring[(i + 1) % edge_count]);
    let mut hits = Vec::new();
    for i in 0..edge_count {
        let (a0, a1) = edge(i);
        if (a1 - a0).norm() <= eps {
            continue;
        }
        for j in (i + 2)..edge_count {
            if i == 0 && j == edge_count - 1 {
                continue;
            }
            let (b0, b1) = edge(j);
            if (b1 - b0).norm() <= eps {
                continue;
            }
            let Some(hit) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1, eps) else {
                continue;
            };
            let at_endpoint = [a0, a1, b0, b1]
                .iter()
                .any(|p| approx_eq_point(&hit.point, p, eps));
            if !at_endpoint {
                hits.push(hit.point);
            }
        }
    }
    hits
}

/// Number of proper self-crossings of a ring.
#[must_use]
pub fn ring_self_intersection_count(ring: &[Point2], eps: f64) -> usize {
    ring_self_intersection_points(ring, eps).len()
}
