use crate::math::polygon_2d::{bbox_area_2d, signed_area_2d};
use crate::math::tolerance::approx_eq_point;
use crate::math::Point2;

/// Orientation of a closed loop, from the sign of its shoelace area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Clockwise (negative signed area).
    Cw,
    /// Counter-clockwise (non-negative signed area).
    Ccw,
}

impl Winding {
    /// Winding implied by a signed area; zero counts as counter-clockwise.
    #[must_use]
    pub fn from_signed_area(area: f64) -> Self {
        if area >= 0.0 {
            Self::Ccw
        } else {
            Self::Cw
        }
    }
}

/// An ordered, logically closed sequence of 2D points.
///
/// The last point may or may not repeat the first; [`Ring::closed`]
/// produces the explicitly closed form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    pub points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring from its points.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Creates a ring from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the last point equals the first within `eps`.
    #[must_use]
    pub fn is_closed(&self, eps: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                self.points.len() > 1 && approx_eq_point(first, last, eps)
            }
            _ => false,
        }
    }

    /// Returns an explicitly closed copy, appending the first point if the
    /// endpoints differ by more than `eps`.
    #[must_use]
    pub fn closed(&self, eps: f64) -> Self {
        let mut points = self.points.clone();
        if let Some(&first) = points.first() {
            if !self.is_closed(eps) {
                points.push(first);
            }
        }
        Self { points }
    }

    /// Returns the ring with its point order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Shoelace signed area; positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn abs_area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn winding(&self) -> Winding {
        Winding::from_signed_area(self.signed_area())
    }

    /// Area of the axis-aligned bounding box.
    #[must_use]
    pub fn bbox_area(&self) -> f64 {
        bbox_area_2d(&self.points)
    }
}

impl From<Vec<Point2>> for Ring {
    fn from(points: Vec<Point2>) -> Self {
        Self { points }
    }
}
