pub mod overlap;

pub use overlap::{resolve_self_overlap, ResolveOutcome, ResolveSelfOverlap};
