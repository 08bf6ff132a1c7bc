use thiserror::Error;

use crate::error::{ConfigError, Result};
use crate::geometry::Ring;
use crate::math::polygon_2d::{bbox_area_2d, point_in_polygon_2d};
use crate::math::Point2;
use crate::policy::DeterminismPolicy;

use super::faces::FaceLoop;
use super::self_intersect::ring_self_intersection_count;

/// Why a ring could not be resolved. Each reason falls back to the
/// original ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FailureReason {
    #[error("ringTooSmall")]
    RingTooSmall,
    #[error("noEdges")]
    NoEdges,
    #[error("noFaces")]
    NoFaces,
    #[error("areaTooSmall")]
    AreaTooSmall,
}

impl FailureReason {
    /// Stable identifier of the reason.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RingTooSmall => "ringTooSmall",
            Self::NoEdges => "noEdges",
            Self::NoFaces => "noFaces",
            Self::AreaTooSmall => "areaTooSmall",
        }
    }
}

/// Outcome of running a selection rule over the enumerated faces.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub selected_face_id: Option<usize>,
    /// The winning face as a closed CCW ring, or the original ring on
    /// failure.
    pub resolved_ring: Ring,
    pub abs_area: f64,
    pub rejected_face_ids: Vec<usize>,
    pub failure: Option<FailureReason>,
    /// Faces that survived the rule's filters and competed for selection.
    pub candidates: usize,
}

/// Diagnostic summary of a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionStats {
    pub candidates: usize,
    pub selected_face_id: Option<usize>,
    pub selected_abs_area: f64,
    pub rejected: usize,
    pub failure: Option<FailureReason>,
}

impl SelectionResult {
    #[must_use]
    pub fn stats(&self) -> SelectionStats {
        SelectionStats {
            candidates: self.candidates,
            selected_face_id: self.selected_face_id,
            selected_abs_area: self.abs_area,
            rejected: self.rejected_face_ids.len(),
            failure: self.failure,
        }
    }
}

/// A rule that picks the face best representing the intended outline.
///
/// Implementations see only the original ring and the enumerated faces,
/// so new rules plug in without touching the earlier pipeline stages.
pub trait FaceSelector {
    fn select(
        &self,
        original: &Ring,
        faces: &[FaceLoop],
        policy: &DeterminismPolicy,
    ) -> SelectionResult;

    /// Checks the selector's own parameters before a run.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the selector cannot run.
    fn validate_config(&self) -> Result<()> {
        Ok(())
    }
}

/// Built-in selection rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Largest `|area|` face, rejected if smaller than `min_area_ratio`
    /// times the original ring's area.
    MaxAbsArea { min_area_ratio: f64 },
    /// Largest bounding box among faces passing both ratio filters,
    /// preferring faces whose boundary does not cross itself.
    RectCornersBBox {
        min_area_ratio: f64,
        min_bbox_ratio: f64,
    },
    /// Smallest face whose boundary contains `point`.
    ContainsPoint { point: Point2, min_area_ratio: f64 },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::MaxAbsArea {
            min_area_ratio: 0.01,
        }
    }
}

impl SelectionPolicy {
    /// Checks the rule's ratios.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRatio` for a negative or non-finite
    /// ratio.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::MaxAbsArea { min_area_ratio } | Self::ContainsPoint { min_area_ratio, .. } => {
                check_ratio("min_area_ratio", min_area_ratio)
            }
            Self::RectCornersBBox {
                min_area_ratio,
                min_bbox_ratio,
            } => {
                check_ratio("min_area_ratio", min_area_ratio)?;
                check_ratio("min_bbox_ratio", min_bbox_ratio)
            }
        }
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidRatio { name, value }.into());
    }
    Ok(())
}

impl FaceSelector for SelectionPolicy {
    fn select(
        &self,
        original: &Ring,
        faces: &[FaceLoop],
        policy: &DeterminismPolicy,
    ) -> SelectionResult {
        match *self {
            Self::MaxAbsArea { min_area_ratio } => max_abs_area(original, faces, min_area_ratio),
            Self::RectCornersBBox {
                min_area_ratio,
                min_bbox_ratio,
            } => rect_corners_bbox(original, faces, min_area_ratio, min_bbox_ratio, policy),
            Self::ContainsPoint {
                point,
                min_area_ratio,
            } => contains_point(original, faces, &point, min_area_ratio),
        }
    }

    fn validate_config(&self) -> Result<()> {
        self.validate()
    }
}

fn max_abs_area(original: &Ring, faces: &[FaceLoop], min_area_ratio: f64) -> SelectionResult {
    let best = faces.iter().max_by(|a, b| {
        a.abs_area()
            .total_cmp(&b.abs_area())
            .then(b.face_id.cmp(&a.face_id))
    });
    let Some(best) = best else {
        return failure(original, None, 0.0, Vec::new(), FailureReason::NoFaces, 0);
    };
    finish(original, faces, best, min_area_ratio, faces.len(), Vec::new())
}

struct BBoxCandidate<'a> {
    face: &'a FaceLoop,
    abs_area: f64,
    bbox_area: f64,
    self_crossings: usize,
}

fn rect_corners_bbox(
    original: &Ring,
    faces: &[FaceLoop],
    min_area_ratio: f64,
    min_bbox_ratio: f64,
    policy: &DeterminismPolicy,
) -> SelectionResult {
    let min_area = original.abs_area() * min_area_ratio;
    let min_bbox = original.bbox_area() * min_bbox_ratio;

    let mut candidates = Vec::new();
    let mut filtered = Vec::new();
    for face in faces {
        let abs_area = face.abs_area();
        let bbox_area = bbox_area_2d(&face.boundary);
        if abs_area < min_area || bbox_area < min_bbox {
            filtered.push(face.face_id);
            continue;
        }
        candidates.push(BBoxCandidate {
            face,
            abs_area,
            bbox_area,
            self_crossings: ring_self_intersection_count(&face.boundary, policy.eps),
        });
    }

    let any_simple = candidates.iter().any(|c| c.self_crossings == 0);
    let best = candidates
        .iter()
        .filter(|c| !any_simple || c.self_crossings == 0)
        .max_by(|a, b| {
            a.bbox_area
                .total_cmp(&b.bbox_area)
                .then(a.abs_area.total_cmp(&b.abs_area))
                .then(b.face.face_id.cmp(&a.face.face_id))
        });
    let Some(best) = best else {
        return failure(original, None, 0.0, filtered, FailureReason::NoFaces, 0);
    };
    finish(original, faces, best.face, min_area_ratio, candidates.len(), filtered)
}

fn contains_point(
    original: &Ring,
    faces: &[FaceLoop],
    point: &Point2,
    min_area_ratio: f64,
) -> SelectionResult {
    let containing: Vec<&FaceLoop> = faces
        .iter()
        .filter(|f| point_in_polygon_2d(point, &f.boundary))
        .collect();
    let best = containing.iter().copied().min_by(|a, b| {
        a.abs_area()
            .total_cmp(&b.abs_area())
            .then(a.face_id.cmp(&b.face_id))
    });
    let Some(best) = best else {
        let rejected = faces.iter().map(|f| f.face_id).collect();
        return failure(original, None, 0.0, rejected, FailureReason::NoFaces, 0);
    };
    finish(original, faces, best, min_area_ratio, containing.len(), Vec::new())
}

/// Applies the area guard to the winner and builds the final result.
fn finish(
    original: &Ring,
    faces: &[FaceLoop],
    best: &FaceLoop,
    min_area_ratio: f64,
    candidates: usize,
    mut filtered: Vec<usize>,
) -> SelectionResult {
    let abs_area = best.abs_area();
    if abs_area < original.abs_area() * min_area_ratio {
        let rejected = faces.iter().map(|f| f.face_id).collect();
        return failure(
            original,
            Some(best.face_id),
            abs_area,
            rejected,
            FailureReason::AreaTooSmall,
            candidates,
        );
    }

    let mut ring = Ring::new(best.boundary.clone());
    if ring.signed_area() < 0.0 {
        ring = ring.reversed();
    }
    if let (Some(&first), Some(&last)) = (ring.points.first(), ring.points.last()) {
        if first != last {
            ring.points.push(first);
        }
    }

    let others: Vec<usize> = faces
        .iter()
        .map(|f| f.face_id)
        .filter(|&id| id != best.face_id && !filtered.contains(&id))
        .collect();
    filtered.extend(others);
    filtered.sort_unstable();

    SelectionResult {
        selected_face_id: Some(best.face_id),
        resolved_ring: ring,
        abs_area,
        rejected_face_ids: filtered,
        failure: None,
        candidates,
    }
}

fn failure(
    original: &Ring,
    selected_face_id: Option<usize>,
    abs_area: f64,
    rejected_face_ids: Vec<usize>,
    reason: FailureReason,
    candidates: usize,
) -> SelectionResult {
    SelectionResult {
        selected_face_id,
        resolved_ring: original.clone(),
        abs_area,
        rejected_face_ids,
        failure: Some(reason),
        candidates,
    }
}
