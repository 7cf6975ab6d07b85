use super::manifold::Collision;
use crate::math::vec2::Vec2;
use crate::objects::Polygon;

/// Coefficient of restitution; collisions are perfectly elastic.
pub const RESTITUTION: f64 = 1.0;

/// Share of the remaining penetration removed per step.
pub const POSITIONAL_CORRECTION_PERCENT: f64 = 0.2;
/// Penetration depth left uncorrected.
pub const POSITIONAL_CORRECTION_SLOP: f64 = 0.01;

/// Scalar rotational impulse for a collision.
///
/// Uses the lever arms from each polygon's centre of mass to the contact
/// vertex and the velocity of the face polygon relative to the contact polygon.
/// Static polygons contribute no inverse mass or inertia.
pub fn rotational_impulse(collision: &Collision, face: &Polygon, contact: &Polygon) -> f64 {
    let normal = collision.normal;
    let r_face = collision.contact_vertex - face.position();
    let r_contact = collision.contact_vertex - contact.position();

    let relative_velocity = face.velocity() - contact.velocity();

    let angular_face =
        normal.dot(Vec2::cross_z(r_face.cross(normal), r_face)) * face.inverse_rotational_inertia();
    let angular_contact = normal.dot(Vec2::cross_z(r_contact.cross(normal), r_contact))
        * contact.inverse_rotational_inertia();

    let denominator =
        face.inverse_mass() + contact.inverse_mass() + angular_face + angular_contact;
    if denominator <= 0.0 {
        return 0.0;
    }
    -normal.dot(relative_velocity) * (RESTITUTION + 1.0) / denominator
}

/// Applies the impulse response of one collision to its two polygons.
///
/// Both the linear and the rotational impulse are computed from the velocities
/// the polygons had before this call. Only the contact polygon's rotational
/// velocity is written; the face polygon keeps its own. Static polygons are
/// never modified. Returns `false` when the polygons are already separating.
pub fn resolve_collision(collision: &Collision, face: &mut Polygon, contact: &mut Polygon) -> bool {
    let normal = collision.normal;
    let relative_velocity = contact.velocity() - face.velocity();
    let velocity_along_normal = relative_velocity.dot(normal);

    if velocity_along_normal >= 0.0 {
        log::trace!(
            "polygons {} and {} already separating ({:.4})",
            collision.face_polygon,
            collision.contact_polygon,
            velocity_along_normal
        );
        return false;
    }

    let inverse_mass_sum = face.inverse_mass() + contact.inverse_mass();
    if inverse_mass_sum <= 0.0 {
        return false;
    }

    let j = -(1.0 + RESTITUTION) * velocity_along_normal / inverse_mass_sum;
    let angular = rotational_impulse(collision, face, contact);

    if !face.is_static() {
        face.accelerate(normal * (-j * face.inverse_mass()));
    }
    if !contact.is_static() {
        contact.accelerate(normal * (j * contact.inverse_mass()));
        contact.set_rotational_velocity(-angular);
    }
    true
}

/// Pushes the two polygons apart along the collision normal.
///
/// Penetration beyond [`POSITIONAL_CORRECTION_SLOP`] is reduced by
/// [`POSITIONAL_CORRECTION_PERCENT`], split by inverse mass, so a static
/// polygon never moves and its partner takes the whole correction. Velocities
/// are left untouched.
pub fn correct_positions(collision: &Collision, face: &mut Polygon, contact: &mut Polygon) {
    let excess = (collision.penetration() - POSITIONAL_CORRECTION_SLOP).max(0.0);
    let inverse_mass_sum = face.inverse_mass() + contact.inverse_mass();
    if excess <= 0.0 || inverse_mass_sum <= 0.0 {
        return;
    }

    let correction = collision.normal * (excess / inverse_mass_sum * POSITIONAL_CORRECTION_PERCENT);
    if !face.is_static() {
        face.translate(-correction * face.inverse_mass());
    }
    if !contact.is_static() {
        contact.translate(correction * contact.inverse_mass());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::check_collision;
    use crate::objects::PolygonDesc;
    use crate::world::PolygonHandle;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    fn square(x: f64, y: f64) -> Polygon {
        Polygon::new(PolygonDesc::rectangle(1.0, 1.0).with_position(Vec2::new(x, y))).unwrap()
    }

    fn collide(a: &Polygon, b: &Polygon) -> Collision {
        check_collision(a, PolygonHandle::from_raw(1), b, PolygonHandle::from_raw(2))
            .expect("polygons overlap")
    }

    #[test]
    fn test_equal_masses_swap_velocities() {
        let mut a = square(0.0, 0.0);
        let mut b = square(0.8, 0.0);
        a.set_velocity(Vec2::new(2.0, 0.0));
        b.set_velocity(Vec2::new(-1.0, 0.0));

        let collision = collide(&a, &b);
        assert!(resolve_collision(&collision, &mut a, &mut b));

        assert_relative_eq!(a.velocity().x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(b.velocity().x, 2.0, epsilon = EPSILON);
        assert_relative_eq!(a.velocity().y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_separating_polygons_are_left_alone() {
        let mut a = square(0.0, 0.0);
        let mut b = square(0.8, 0.0);
        a.set_velocity(Vec2::new(-1.0, 0.0));
        b.set_velocity(Vec2::new(1.0, 0.0));

        let collision = collide(&a, &b);
        assert!(!resolve_collision(&collision, &mut a, &mut b));
        assert_eq!(a.velocity(), Vec2::new(-1.0, 0.0));
        assert_eq!(b.velocity(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_static_contact_reflects_dynamic_face() {
        let mut a = square(0.0, 0.0);
        let mut b = square(0.8, 0.0);
        b.set_is_static(true);
        a.set_velocity(Vec2::new(3.0, 0.0));

        let collision = collide(&a, &b);
        assert!(resolve_collision(&collision, &mut a, &mut b));
        assert_relative_eq!(a.velocity().x, -3.0, epsilon = EPSILON);
        assert_eq!(b.velocity(), Vec2::ZERO);
        assert_eq!(b.rotational_velocity(), 0.0);
    }

    #[test]
    fn test_only_contact_polygon_spins() {
        let mut a = square(0.0, 0.0);
        let mut b = square(0.8, 0.0);
        a.set_velocity(Vec2::new(1.0, 0.0));
        a.set_rotational_velocity(0.25);

        let collision = collide(&a, &b);
        let expected = rotational_impulse(&collision, &a, &b);
        assert!(expected.abs() > EPSILON);

        resolve_collision(&collision, &mut a, &mut b);
        assert_eq!(a.rotational_velocity(), 0.25);
        assert_relative_eq!(b.rotational_velocity(), -expected, epsilon = EPSILON);
    }

    #[test]
    fn test_rotational_impulse_value() {
        let mut a = square(0.0, 0.0);
        let b = square(0.8, 0.0);
        a.set_velocity(Vec2::new(1.0, 0.0));

        let collision = collide(&a, &b);
        // Contact vertex (0.3, 0.5), normal (1, 0).
        // r_a = (0.3, 0.5), r_b = (-0.5, 0.5); r x n = -0.5 for both.
        // Inverse inertia of a unit square of mass 1 is 2.
        let angular_terms = 2.0 * 0.25 + 2.0 * 0.25;
        let expected = -1.0 * 2.0 / (1.0 + 1.0 + angular_terms);
        assert_relative_eq!(rotational_impulse(&collision, &a, &b), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_correction_splits_excess_penetration_by_inverse_mass() {
        let mut a = square(0.0, 0.0);
        let mut b = square(0.8, 0.0);
        let collision = collide(&a, &b);

        correct_positions(&collision, &mut a, &mut b);

        // (0.2 - 0.01) * 0.2, half to each equal mass.
        assert_relative_eq!(a.position().x, -0.019, epsilon = EPSILON);
        assert_relative_eq!(b.position().x, 0.819, epsilon = EPSILON);
        assert_eq!(a.velocity(), Vec2::ZERO);
        assert_eq!(b.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_correction_moves_only_dynamic_polygon() {
        let mut floor = Polygon::new(
            PolygonDesc::rectangle(10.0, 1.0)
                .with_position(Vec2::new(0.0, -0.5))
                .with_static(true),
        )
        .unwrap();
        let mut body = square(0.0, 0.4);
        let collision = collide(&floor, &body);
        assert_eq!(collision.face_polygon, PolygonHandle::from_raw(1));
        assert_relative_eq!(collision.penetration(), 0.1, epsilon = EPSILON);

        correct_positions(&collision, &mut floor, &mut body);
        assert_eq!(floor.position(), Vec2::new(0.0, -0.5));
        assert_relative_eq!(body.position().y, 0.4 + 0.09 * 0.2, epsilon = EPSILON);
    }

    #[test]
    fn test_correction_ignores_penetration_within_slop() {
        let mut a = square(0.0, 0.0);
        let mut b = square(0.995, 0.0);
        let collision = collide(&a, &b);

        correct_positions(&collision, &mut a, &mut b);
        assert_eq!(a.position(), Vec2::ZERO);
        assert_eq!(b.position(), Vec2::new(0.995, 0.0));
    }
}
