//! Optional diagnostic surface for the overlap resolver.
//!
//! Every pipeline stage can report a small, purely informational payload
//! to an injected [`TraceSink`]. The core algorithm writes nothing anywhere
//! else, and its results do not depend on whether a sink is attached.

use crate::operations::overlap::faces::FaceEnumStats;
use crate::operations::overlap::half_edge::GraphStats;
use crate::operations::overlap::planarize::PlanarizeStats;
use crate::operations::overlap::select::SelectionStats;

/// A diagnostic payload emitted by one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum TracePayload {
    Planarizer(PlanarizeStats),
    Graph(GraphStats),
    FaceEnum(FaceEnumStats),
    Selection(SelectionStats),
}

impl TracePayload {
    /// Stable identifier of the payload kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Planarizer(_) => "resolve_overlap.planarizer",
            Self::Graph(_) => "resolve_overlap.graph",
            Self::FaceEnum(_) => "resolve_overlap.face_enum",
            Self::Selection(_) => "resolve_overlap.selection",
        }
    }
}

/// Receives diagnostic payloads.
pub trait TraceSink {
    fn record(&mut self, payload: &TracePayload);
}

impl<F> TraceSink for F
where
    F: FnMut(&TracePayload),
{
    fn record(&mut self, payload: &TracePayload) {
        self(payload);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _payload: &TracePayload) {}
}

/// Keeps every payload in arrival order.
#[derive(Debug, Clone, Default)]
pub struct TraceCollector {
    pub payloads: Vec<TracePayload>,
}

impl TraceCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First payload with the given kind identifier.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&TracePayload> {
        self.payloads.iter().find(|p| p.kind() == kind)
    }
}

impl TraceSink for TraceCollector {
    fn record(&mut self, payload: &TracePayload) {
        self.payloads.push(payload.clone());
    }
}

/// Forwards payloads as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&mut self, payload: &TracePayload) {
        let kind = payload.kind();
        match payload {
            TracePayload::Planarizer(s) => tracing::debug!(
                target: "outline_resolve::trace",
                kind,
                segments = s.segments,
                intersections = s.intersections,
                split_min = s.split_min,
                split_max = s.split_max,
                split_avg = s.split_avg,
                vertices = s.vertices,
                edges = s.edges,
                dropped_zero_length = s.dropped_zero_length,
            ),
            TracePayload::Graph(s) => tracing::debug!(
                target: "outline_resolve::trace",
                kind,
                vertices = s.vertices,
                half_edges = s.half_edges,
                twins_paired = s.twins_paired,
                dead_ends = s.dead_ends,
            ),
            TracePayload::FaceEnum(s) => tracing::debug!(
                target: "outline_resolve::trace",
                kind,
                faces = s.faces,
                small_faces = s.small_faces,
                top_abs_areas = ?s.top_abs_areas,
            ),
            TracePayload::Selection(s) => tracing::debug!(
                target: "outline_resolve::trace",
                kind,
                candidates = s.candidates,
                selected_face_id = ?s.selected_face_id,
                selected_abs_area = s.selected_abs_area,
                rejected = s.rejected,
                failure = ?s.failure,
            ),
        }
    }
}
