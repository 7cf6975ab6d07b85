use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A point or direction in the plane, y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector along `self`; the zero vector maps to itself.
    pub fn normalize(self) -> Self {
        match self.magnitude() {
            length if length > 0.0 => self / length,
            _ => Self::ZERO,
        }
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (other - self).magnitude_squared()
    }

    /// `(-y, x)`. For a unit edge of a clockwise polygon this is the outward normal.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// z of `(x, y, 0) x (other.x, other.y, 0)`.
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// `(0, 0, z) x (v.x, v.y, 0)`, which stays in the plane.
    pub fn cross_z(z: f64, v: Vec2) -> Vec2 {
        v.perpendicular() * z
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

macro_rules! componentwise {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $sym:tt) => {
        impl $op for Vec2 {
            type Output = Vec2;

            fn $method(self, rhs: Vec2) -> Vec2 {
                Vec2::new(self.x $sym rhs.x, self.y $sym rhs.y)
            }
        }

        impl $assign_op for Vec2 {
            fn $assign_method(&mut self, rhs: Vec2) {
                *self = *self $sym rhs;
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign, +);
componentwise!(Sub, sub, SubAssign, sub_assign, -);

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, k: f64) -> Vec2 {
        Vec2::new(self.x / k, self.y / k)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_vec2_arithmetic() {
        let v1 = Vec2::new(1.0, 2.0);
        let v2 = Vec2::new(3.0, 4.0);
        assert_eq!(v1 + v2, Vec2::new(4.0, 6.0));
        assert_eq!(v2 - v1, Vec2::new(2.0, 2.0));
        assert_eq!(v1 * 3.0, Vec2::new(3.0, 6.0));
        assert_eq!(3.0 * v1, Vec2::new(3.0, 6.0));
        assert_eq!(v2 / 2.0, Vec2::new(1.5, 2.0));
        assert_eq!(-v1, Vec2::new(-1.0, -2.0));

        let mut v = v1;
        v += v2;
        v -= Vec2::new(1.0, 1.0);
        assert_eq!(v, Vec2::new(3.0, 5.0));
    }

    #[test]
    fn test_vec2_dot_and_magnitude() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.dot(Vec2::new(1.0, 2.0)) - 11.0).abs() < EPSILON);
        assert!((v.magnitude_squared() - 25.0).abs() < EPSILON);
        assert!((v.magnitude() - 5.0).abs() < EPSILON);
        assert!((Vec2::new(1.0, 2.0).distance_squared(Vec2::new(4.0, 6.0)) - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_vec2_normalize() {
        let norm_v = Vec2::new(3.0, 4.0).normalize();
        assert!((norm_v.magnitude() - 1.0).abs() < EPSILON);
        assert!((norm_v.x - 0.6).abs() < EPSILON);
        assert!((norm_v.y - 0.8).abs() < EPSILON);

        // Degenerate edges produce a zero normal rather than NaN.
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_vec2_perpendicular_is_outward_for_clockwise_edges() {
        // Top edge of a clockwise square runs left to right.
        let edge = Vec2::new(1.0, 0.0);
        assert_eq!(edge.perpendicular(), Vec2::new(-0.0, 1.0));
        // Right edge runs top to bottom.
        let edge = Vec2::new(0.0, -1.0);
        assert_eq!(edge.perpendicular(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_vec2_cross_products() {
        let r = Vec2::new(2.0, 3.0);
        let n = Vec2::new(0.0, 1.0);
        let z = r.cross(n);
        assert!((z - 2.0).abs() < EPSILON);

        let zxr = Vec2::cross_z(z, r);
        assert_eq!(zxr, Vec2::new(-6.0, 4.0));
        // Dotting back with n gives z squared for any in-plane r.
        assert!((n.dot(zxr) - z * z).abs() < EPSILON);
    }

    #[test]
    fn test_vec2_is_finite() {
        assert!(Vec2::new(1.0, -2.0).is_finite());
        assert!(!Vec2::new(f64::NAN, 0.0).is_finite());
        assert!(!Vec2::new(0.0, f64::INFINITY).is_finite());
    }
}
