use super::vec2::Vec2;
use std::ops::Mul;

/// A 2D affine transform stored as a row-major 3x3 homogeneous matrix.
///
/// Only the top two rows are meaningful; the bottom row is always `[0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub m: [[f64; 3]; 3],
}

impl Transform {
    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Pure translation.
    pub fn translation(offset: Vec2) -> Self {
        Self {
            m: [[1.0, 0.0, offset.x], [0.0, 1.0, offset.y], [0.0, 0.0, 1.0]],
        }
    }

    /// Pure counter-clockwise rotation about the origin (radians).
    pub fn rotation(angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self {
            m: [[cos_a, -sin_a, 0.0], [sin_a, cos_a, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `translation(position) * rotation(rotation)`: points are rotated about the
    /// local origin first, then moved to `position`.
    pub fn from_position_rotation(position: Vec2, rotation: f64) -> Self {
        Self::translation(position) * Self::rotation(rotation)
    }

    /// Transforms a point (homogeneous w = 1).
    pub fn apply(&self, point: Vec2) -> Vec2 {
        let m = &self.m;
        Vec2::new(
            m[0][0] * point.x + m[0][1] * point.y + m[0][2],
            m[1][0] * point.x + m[1][1] * point.y + m[1][2],
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        let mut m = [[0.0; 3]; 3];
        for (row, out_row) in m.iter_mut().enumerate() {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = (0..3).map(|k| self.m[row][k] * rhs.m[k][col]).sum();
            }
        }
        Transform { m }
    }
}
