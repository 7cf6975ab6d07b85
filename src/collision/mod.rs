pub mod aabb;
pub mod detection;
pub mod manifold;
pub mod resolution;

pub use aabb::AABB;
pub use detection::{check_collision, test_axis};
pub use manifold::Collision;
pub use resolution::{
    correct_positions, resolve_collision, rotational_impulse, POSITIONAL_CORRECTION_PERCENT,
    POSITIONAL_CORRECTION_SLOP, RESTITUTION,
};
