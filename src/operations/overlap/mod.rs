pub mod faces;
pub mod half_edge;
pub mod planarize;
pub mod select;
pub mod self_intersect;
mod validate;

pub use faces::{enumerate_faces, FaceEnumeration, FaceLoop};
pub use half_edge::{HalfEdge, HalfEdgeGraph};
pub use planarize::{planarize_ring, planarize_segments, PlanarGraph, PlanarizeOutput};
pub use select::{FaceSelector, FailureReason, SelectionPolicy, SelectionResult};
pub use self_intersect::{ring_self_intersection_count, ring_self_intersection_points};

use crate::error::Result;
use crate::geometry::Ring;
use crate::math::Point2;
use crate::policy::DeterminismPolicy;
use crate::trace::{NullSink, TracePayload, TraceSink};

/// A successfully resolved ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Closed, counter-clockwise boundary of the selected face.
    pub ring: Ring,
    pub face_count: usize,
    pub selected_face_id: usize,
    pub selected_abs_area: f64,
    pub rejected_face_ids: Vec<usize>,
    pub intersections: Vec<Point2>,
}

/// A ring that could not be resolved, with the input as fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub reason: FailureReason,
    pub original_ring: Ring,
    pub face_count: usize,
    pub intersections: Vec<Point2>,
}

/// Terminal result of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    Resolved(Resolved),
    Failed(Failure),
}

impl ResolveOutcome {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The ring a caller should use: the resolved ring, or the original
    /// ring on failure.
    #[must_use]
    pub fn ring(&self) -> &Ring {
        match self {
            Self::Resolved(r) => &r.ring,
            Self::Failed(f) => &f.original_ring,
        }
    }

    #[must_use]
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::Resolved(_) => None,
            Self::Failed(f) => Some(f.reason),
        }
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        match self {
            Self::Resolved(r) => r.face_count,
            Self::Failed(f) => f.face_count,
        }
    }

    #[must_use]
    pub fn intersections(&self) -> &[Point2] {
        match self {
            Self::Resolved(r) => &r.intersections,
            Self::Failed(f) => &f.intersections,
        }
    }
}

/// Intermediate structures of one run, kept for inspection.
///
/// `selection` is `None` when the graph had no faces to select from.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineArtifacts {
    pub planar: PlanarizeOutput,
    pub graph: HalfEdgeGraph,
    pub faces: FaceEnumeration,
    pub selection: Option<SelectionResult>,
}

impl PipelineArtifacts {
    /// Checks the structural invariants of every artifact.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Invariant` for the first broken invariant.
    pub fn validate(&self, eps: f64) -> Result<()> {
        self.planar.graph.validate(eps)?;
        self.graph.validate()?;
        self.faces.validate(eps)?;
        if let Some(selection) = &self.selection {
            selection.validate(eps)?;
        }
        Ok(())
    }
}

/// Replaces a self-crossing ring with one simple ring covering its
/// dominant region.
///
/// The ring is split at its crossings into a planar graph, every face of
/// that graph is enumerated, and the selector picks the winner. Degenerate
/// input never errors: it yields [`ResolveOutcome::Failed`] carrying the
/// original ring.
#[derive(Debug, Clone)]
pub struct ResolveSelfOverlap<S = SelectionPolicy> {
    ring: Ring,
    policy: DeterminismPolicy,
    selector: S,
}

impl ResolveSelfOverlap {
    /// Creates a resolver with the default tolerance and selection rule.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            ring: Ring::new(points),
            policy: DeterminismPolicy::default(),
            selector: SelectionPolicy::default(),
        }
    }
}

impl<S: FaceSelector> ResolveSelfOverlap<S> {
    #[must_use]
    pub fn with_policy(mut self, policy: DeterminismPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Swaps the selection rule.
    #[must_use]
    pub fn with_selector<T: FaceSelector>(self, selector: T) -> ResolveSelfOverlap<T> {
        ResolveSelfOverlap {
            ring: self.ring,
            policy: self.policy,
            selector,
        }
    }

    /// Checks the tolerance and the selector's parameters.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Config` for an unusable `eps` or ratio.
    pub fn validate_config(&self) -> Result<()> {
        self.policy.validate()?;
        self.selector.validate_config()
    }

    /// Runs the resolution.
    #[must_use]
    pub fn execute(&self) -> ResolveOutcome {
        self.run(&mut NullSink).0
    }

    /// Runs the resolution, reporting per-stage diagnostics to `sink`.
    #[must_use]
    pub fn execute_traced(&self, sink: &mut dyn TraceSink) -> ResolveOutcome {
        self.run(sink).0
    }

    /// Runs the resolution and also returns the intermediate structures.
    ///
    /// Artifacts are `None` when the run stopped before a graph existed.
    #[must_use]
    pub fn execute_with_artifacts(&self) -> (ResolveOutcome, Option<PipelineArtifacts>) {
        self.run(&mut NullSink)
    }

    /// Validates the configuration, runs the resolution and checks every
    /// intermediate structure.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Config` for invalid settings, or
    /// `ResolveError::Invariant` if an artifact is malformed.
    pub fn execute_checked(&self) -> Result<ResolveOutcome> {
        self.validate_config()?;
        let (outcome, artifacts) = self.run(&mut NullSink);
        if let Some(artifacts) = &artifacts {
            artifacts.validate(self.policy.eps)?;
        }
        Ok(outcome)
    }

    fn run(&self, sink: &mut dyn TraceSink) -> (ResolveOutcome, Option<PipelineArtifacts>) {
        if self.ring.len() < 4 {
            let outcome = failed(FailureReason::RingTooSmall, self.ring.clone(), 0, Vec::new());
            return (outcome, None);
        }
        let original = self.ring.closed(self.policy.eps);

        let planar = planarize_ring(&original.points, &self.policy);
        sink.record(&TracePayload::Planarizer(planar.stats));
        if planar.graph.is_empty() {
            let outcome = failed(FailureReason::NoEdges, original, 0, planar.intersections);
            return (outcome, None);
        }

        let graph = HalfEdgeGraph::build(&planar.graph);
        sink.record(&TracePayload::Graph(graph.stats()));

        let faces = enumerate_faces(&graph);
        sink.record(&TracePayload::FaceEnum(faces.stats()));
        let face_count = faces.faces.len();
        let intersections = planar.intersections.clone();

        if faces.faces.is_empty() {
            let outcome = failed(FailureReason::NoFaces, original, 0, intersections);
            let artifacts = PipelineArtifacts {
                planar,
                graph,
                faces,
                selection: None,
            };
            return (outcome, Some(artifacts));
        }

        let selection = self.selector.select(&original, &faces.faces, &self.policy);
        sink.record(&TracePayload::Selection(selection.stats()));

        let outcome = match (selection.failure, selection.selected_face_id) {
            (None, Some(selected_face_id)) => ResolveOutcome::Resolved(Resolved {
                ring: selection.resolved_ring.clone(),
                face_count,
                selected_face_id,
                selected_abs_area: selection.abs_area,
                rejected_face_ids: selection.rejected_face_ids.clone(),
                intersections,
            }),
            (reason, _) => failed(
                reason.unwrap_or(FailureReason::NoFaces),
                original,
                face_count,
                intersections,
            ),
        };
        let artifacts = PipelineArtifacts {
            planar,
            graph,
            faces,
            selection: Some(selection),
        };
        (outcome, Some(artifacts))
    }
}

fn failed(
    reason: FailureReason,
    original_ring: Ring,
    face_count: usize,
    intersections: Vec<Point2>,
) -> ResolveOutcome {
    ResolveOutcome::Failed(Failure {
        reason,
        original_ring,
        face_count,
        intersections,
    })
}

/// Resolves `points` with tolerance `eps` and the default selection rule.
///
/// `eps` is used as given; call [`ResolveSelfOverlap::execute_checked`] to
/// have it validated first.
#[must_use]
pub fn resolve_self_overlap(points: &[Point2], eps: f64) -> ResolveOutcome {
    ResolveSelfOverlap::new(points.to_vec())
        .with_policy(DeterminismPolicy {
            eps,
            ..DeterminismPolicy::default()
        })
        .execute()
}
