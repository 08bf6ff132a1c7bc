use thiserror::Error;

/// Top-level error type for the outline resolver.
///
/// Degenerate geometry never ends up here; it is reported as a
/// [`FailureReason`](crate::operations::overlap::FailureReason) inside a
/// failed outcome. These errors are for broken internal invariants and
/// invalid configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A structural invariant of an intermediate artifact does not hold.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantError {
    #[error("planar vertex {index} is not finite")]
    NonFiniteVertex { index: usize },

    #[error("planar graph has no edges")]
    NoEdges,

    #[error("{what} index {index} out of range (len {len}) at {at}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
        at: usize,
    },

    #[error("planar edge {edge} is degenerate")]
    DegenerateEdge { edge: usize },

    #[error("planar edge {edge} duplicates an earlier edge")]
    DuplicateEdge { edge: usize },

    #[error("half-edge count {0} is odd")]
    OddHalfEdgeCount(usize),

    #[error("twin of half-edge {half_edge} does not point back")]
    TwinMismatch { half_edge: usize },

    #[error("next/prev links disagree at half-edge {half_edge}")]
    NextPrevMismatch { half_edge: usize },

    #[error("face {face} loop is not closed")]
    FaceNotClosed { face: usize },

    #[error("face {face} has {distinct} distinct vertices, need at least 3")]
    FaceTooFewVertices { face: usize, distinct: usize },

    #[error("face {face} has zero area")]
    FaceZeroArea { face: usize },

    #[error("face {face} has an empty half-edge cycle")]
    FaceEmptyCycle { face: usize },

    #[error("half-edge {half_edge} is claimed by faces {first} and {second}")]
    HalfEdgeInTwoFaces {
        half_edge: usize,
        first: usize,
        second: usize,
    },

    #[error("selected ring has {0} points, need at least 4 including closure")]
    SelectedRingTooShort(usize),

    #[error("selected ring is not closed within tolerance")]
    SelectedRingNotClosed,

    #[error("selected ring has zero area")]
    SelectedRingZeroArea,
}

/// Invalid resolver configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidRatio { name: &'static str, value: f64 },
}

/// Convenience type alias for results using [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
