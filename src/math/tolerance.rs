use super::Point2;

/// Integer grid cell used to unify near-duplicate points into one vertex.
///
/// Two points share a key when they round to the same `eps`-sized cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapKey {
    pub x: i64,
    pub y: i64,
}

/// Scalar approximate equality: `|a - b| <= eps`.
#[must_use]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Point approximate equality: both coordinate deltas within `eps`.
#[must_use]
pub fn approx_eq_point(a: &Point2, b: &Point2, eps: f64) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps)
}

/// Maps a point to its snap cell `(round(x / eps), round(y / eps))`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snap_key(p: &Point2, eps: f64) -> SnapKey {
    let inv = 1.0 / eps;
    SnapKey {
        x: (p.x * inv + 0.5).floor() as i64,
        y: (p.y * inv + 0.5).floor() as i64,
    }
}
