//! Plain-data vector type for crossing the C interface.

use crate::math::vec2::Vec2;

/// Two `f32`s laid out as a C struct. Hosts pass and receive every 2D value
/// through the [`ffi`](crate::ffi) functions in this form.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransportVector2 {
    pub x: f32,
    pub y: f32,
}

impl TransportVector2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<TransportVector2> for Vec2 {
    fn from(v: TransportVector2) -> Self {
        Vec2::new(f64::from(v.x), f64::from(v.y))
    }
}

impl From<Vec2> for TransportVector2 {
    /// Narrows to `f32`; precision beyond that is lost.
    fn from(v: Vec2) -> Self {
        TransportVector2::new(v.x as f32, v.y as f32)
    }
}

pub fn vertices_from_transport(vertices: &[TransportVector2]) -> Vec<Vec2> {
    vertices.iter().map(|&v| v.into()).collect()
}

pub fn vertices_to_transport(vertices: &[Vec2]) -> Vec<TransportVector2> {
    vertices.iter().map(|&v| v.into()).collect()
}
