//! Error type shared by the world, polygon mutators and the FFI bridge.

use crate::world::PolygonHandle;

/// Errors surfaced by fallible physics operations.
///
/// All of these describe caller mistakes, not transient conditions: retrying the
/// same call with the same arguments fails the same way. Every check runs when
/// state is mutated, so a failing call leaves the world exactly as it was and a
/// simulation step can never fail half way through.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    /// No polygon is registered under this handle, either because it was never
    /// issued by this world or because it has been destroyed.
    #[error("no polygon exists for handle {0}")]
    InvalidHandle(PolygonHandle),

    /// An argument is missing or out of its valid range (empty or absent vertex
    /// list, zero polygon area, non-positive mass or timestep, non-finite values).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Too few vertices to build any face at all.
    #[error("degenerate geometry: {vertex_count} vertex is not enough to form a face")]
    DegenerateGeometry { vertex_count: usize },
}

pub type Result<T> = core::result::Result<T, PhysicsError>;
