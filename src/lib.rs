//! 2D convex-polygon rigid-body physics.
//!
//! Polygons live in a [`World`] and are addressed by [`PolygonHandle`]. Each
//! fixed step finds contacts between every pair of polygons with the separating
//! axis theorem, answers each contact with an elastic impulse plus a small
//! positional correction, and integrates velocities. The [`ffi`] module
//! exposes the same operations over a C ABI.

pub mod collision;
pub mod error;
pub mod ffi;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod transport;
pub mod world;

pub use collision::{Collision, AABB};
pub use error::{PhysicsError, Result};
pub use math::{Transform, Vec2};
pub use objects::{Polygon, PolygonDesc};
pub use shapes::{Face, PolygonShape};
pub use transport::TransportVector2;
pub use world::{PolygonHandle, World, WorldConfig};
