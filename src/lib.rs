pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod policy;
pub mod trace;

pub use error::{ResolveError, Result};
pub use geometry::{Ring, Winding};
pub use math::Point2;
pub use operations::overlap::{
    FaceSelector, FailureReason, PipelineArtifacts, SelectionPolicy, SelectionResult,
};
pub use operations::{resolve_self_overlap, ResolveOutcome, ResolveSelfOverlap};
pub use policy::{DeterminismPolicy, TieBreak};
pub use trace::{TraceSink, TracePayload};
