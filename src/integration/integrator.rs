use crate::math::vec2::Vec2;
use crate::objects::Polygon;

/// Advances a polygon by `dt` with semi-implicit Euler.
///
/// Gravity, when the polygon opts in, is added to the vertical velocity first;
/// the updated velocities then move and rotate the polygon. Static polygons are
/// skipped entirely. The rotation is not wrapped.
pub fn integrate(polygon: &mut Polygon, gravity: f64, dt: f64) {
    if polygon.is_static() {
        return;
    }

    if polygon.use_gravity() {
        polygon.accelerate(Vec2::new(0.0, gravity * dt));
    }

    let position = polygon.position() + polygon.velocity() * dt;
    let rotation = polygon.rotation() + polygon.rotational_velocity() * dt;
    polygon.set_transform(position, rotation);
}
