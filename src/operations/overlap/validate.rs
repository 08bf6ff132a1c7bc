//! Structural checks for the intermediate artifacts of the resolver.
//!
//! The core pipeline never branches on these; they exist for callers that
//! keep or persist the artifacts and want their invariants asserted.

use std::collections::HashSet;

use crate::error::InvariantError;
use crate::math::tolerance::approx_eq_point;

use super::faces::{FaceEnumeration, FaceLoop};
use super::half_edge::HalfEdgeGraph;
use super::planarize::PlanarGraph;
use super::select::SelectionResult;

type Check = std::result::Result<(), InvariantError>;

fn in_range(what: &'static str, index: usize, len: usize, at: usize) -> Check {
    if index >= len {
        return Err(InvariantError::IndexOutOfRange {
            what,
            index,
            len,
            at,
        });
    }
    Ok(())
}

impl PlanarGraph {
    /// Checks vertex finiteness and edge sanity.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self, eps: f64) -> Check {
        if self.edges.is_empty() {
            return Err(InvariantError::NoEdges);
        }
        for (index, v) in self.vertices.iter().enumerate() {
            if !v.position.x.is_finite() || !v.position.y.is_finite() {
                return Err(InvariantError::NonFiniteVertex { index });
            }
        }
        let mut seen = HashSet::new();
        for (at, e) in self.edges.iter().enumerate() {
            in_range("edge vertex", e.u, self.vertices.len(), at)?;
            in_range("edge vertex", e.v, self.vertices.len(), at)?;
            if e.u == e.v || (self.position(e.u) - self.position(e.v)).norm() <= eps {
                return Err(InvariantError::DegenerateEdge { edge: at });
            }
            if !seen.insert((e.u.min(e.v), e.u.max(e.v))) {
                return Err(InvariantError::DuplicateEdge { edge: at });
            }
        }
        Ok(())
    }
}

impl HalfEdgeGraph {
    /// Checks pairing and link consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self) -> Check {
        let n = self.half_edges.len();
        if n % 2 != 0 {
            return Err(InvariantError::OddHalfEdgeCount(n));
        }
        for (at, he) in self.half_edges.iter().enumerate() {
            in_range("half-edge origin", he.origin, self.vertices.len(), at)?;
            in_range("half-edge twin", he.twin, n, at)?;
            if self.half_edges[he.twin].twin != at {
                return Err(InvariantError::TwinMismatch { half_edge: at });
            }
            if let Some(next) = he.next {
                in_range("half-edge next", next, n, at)?;
                if self.half_edges[next].prev != Some(at) {
                    return Err(InvariantError::NextPrevMismatch { half_edge: at });
                }
            }
            if let Some(prev) = he.prev {
                in_range("half-edge prev", prev, n, at)?;
                if self.half_edges[prev].next != Some(at) {
                    return Err(InvariantError::NextPrevMismatch { half_edge: at });
                }
            }
        }
        Ok(())
    }
}

impl FaceLoop {
    /// Checks closure, vertex count, area and cycle.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self, eps: f64) -> Check {
        let face = self.face_id;
        let closed_ids = self.vertex_loop.len() > 1
            && self.vertex_loop.first() == self.vertex_loop.last();
        let closed_points = match (self.boundary.first(), self.boundary.last()) {
            (Some(a), Some(b)) => self.boundary.len() > 1 && approx_eq_point(a, b, eps),
            _ => false,
        };
        if !closed_ids || !closed_points {
            return Err(InvariantError::FaceNotClosed { face });
        }
        let distinct = self.distinct_vertex_count();
        if distinct < 3 {
            return Err(InvariantError::FaceTooFewVertices { face, distinct });
        }
        if self.signed_area.abs() <= f64::EPSILON {
            return Err(InvariantError::FaceZeroArea { face });
        }
        if self.half_edge_cycle.is_empty() {
            return Err(InvariantError::FaceEmptyCycle { face });
        }
        Ok(())
    }
}

impl FaceEnumeration {
    /// Validates every face and checks no half-edge sits in two faces.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self, eps: f64) -> Check {
        let mut owner: Vec<Option<usize>> = vec![None; self.face_of_half_edge.len()];
        for face in &self.faces {
            face.validate(eps)?;
            for &h in &face.half_edge_cycle {
                in_range("face half-edge", h, owner.len(), face.face_id)?;
                if let Some(first) = owner[h] {
                    return Err(InvariantError::HalfEdgeInTwoFaces {
                        half_edge: h,
                        first,
                        second: face.face_id,
                    });
                }
                owner[h] = Some(face.face_id);
            }
        }
        Ok(())
    }
}

impl SelectionResult {
    /// Checks the selected ring of a successful selection. Failed
    /// selections echo the caller's ring and are not checked.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self, eps: f64) -> Check {
        if self.failure.is_some() {
            return Ok(());
        }
        let ring = &self.resolved_ring;
        if ring.len() < 4 {
            return Err(InvariantError::SelectedRingTooShort(ring.len()));
        }
        if !ring.is_closed(eps) {
            return Err(InvariantError::SelectedRingNotClosed);
        }
        if ring.abs_area() <= eps {
            return Err(InvariantError::SelectedRingZeroArea);
        }
        Ok(())
    }
}
