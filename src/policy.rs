use std::cmp::Ordering;

use crate::error::{ConfigError, Result};
use crate::math::{Point2, DEFAULT_EPS};

/// Ordering rule applied when floating comparisons are exactly equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Compare x, then y, then fall back to insertion order.
    #[default]
    LexicographicXyThenIndex,
}

impl TieBreak {
    /// Orders two points under this rule. Equal points compare `Equal`, so a
    /// stable sort keeps their insertion order.
    #[must_use]
    pub fn compare_points(self, a: &Point2, b: &Point2) -> Ordering {
        match self {
            Self::LexicographicXyThenIndex => a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)),
        }
    }
}

/// Tolerance and tie-break rule behind every approximate decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeterminismPolicy {
    /// Distance under which values count as equal or zero.
    pub eps: f64,
    pub tie_break: TieBreak,
}

impl DeterminismPolicy {
    /// Creates a policy with the default tie-break.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTolerance` if `eps` is not finite and
    /// positive.
    pub fn try_new(eps: f64) -> Result<Self> {
        let policy = Self {
            eps,
            tie_break: TieBreak::default(),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks that `eps` is usable as a snap cell size.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTolerance` if `eps` is not finite and
    /// positive.
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.eps).into());
        }
        Ok(())
    }
}

impl Default for DeterminismPolicy {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            tie_break: TieBreak::LexicographicXyThenIndex,
        }
    }
}
