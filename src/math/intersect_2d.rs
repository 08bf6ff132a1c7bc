use super::{cross_2d, Point2};

/// Result of a bounded segment-segment intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Intersection point, on the first segment.
    pub point: Point2,
    /// Parameter on the first segment, clamped to `[0, 1]`.
    pub t: f64,
    /// Parameter on the second segment, clamped to `[0, 1]`.
    pub u: f64,
}

/// Parametric 2D line-line intersection.
///
/// Solves `a0 + t * (a1 - a0) = b0 + u * (b1 - b0)` and returns `(t, u)`
/// unbounded, or `None` when `|cross(r, s)| <= eps` (parallel or collinear).
#[must_use]
pub fn line_line_params_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> Option<(f64, f64)> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = cross_2d(&r, &s);
    if denom.abs() <= eps {
        return None;
    }
    let ac = b0 - a0;
    let t = cross_2d(&ac, &s) / denom;
    let u = cross_2d(&ac, &r) / denom;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Parameters within `eps` outside `[0, 1]` are accepted and clamped, so
/// touches at endpoints are reported. Parallel segments never intersect.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> Option<SegmentHit> {
    let (t, u) = line_line_params_2d(a0, a1, b0, b1, eps)?;
    if t < -eps || t > 1.0 + eps || u < -eps || u > 1.0 + eps {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    let u = u.clamp(0.0, 1.0);
    Some(SegmentHit {
        point: a0 + (a1 - a0) * t,
        t,
        u,
    })
}

/// Returns `true` when `t` lies within `eps` of either end of `[0, 1]`.
#[must_use]
pub fn is_endpoint_param(t: f64, eps: f64) -> bool {
    t.abs() <= eps || (t - 1.0).abs() <= eps
}
