use crate::math::vec2::Vec2;
use crate::world::PolygonHandle;

/// Contact record produced by one SAT test between two polygons.
///
/// The face polygon owns the face of minimum penetration; the contact polygon
/// owns the vertex that penetrates it deepest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Polygon owning the separating-axis face.
    pub face_polygon: PolygonHandle,
    /// Polygon owning the contact vertex.
    pub contact_polygon: PolygonHandle,
    /// World-space outward normal of the face, pointing from the face polygon
    /// towards the contact polygon.
    pub normal: Vec2,
    /// Deepest vertex of the contact polygon, world space.
    pub contact_vertex: Vec2,
    /// Signed distance of `contact_vertex` from the face; zero or negative for
    /// a real collision.
    pub depth: f64,
}

impl Collision {
    /// An empty record whose depth loses to any candidate.
    pub fn new(face_polygon: PolygonHandle, contact_polygon: PolygonHandle) -> Self {
        Self {
            face_polygon,
            contact_polygon,
            normal: Vec2::ZERO,
            contact_vertex: Vec2::ZERO,
            depth: f64::NEG_INFINITY,
        }
    }

    /// Overlap distance along the normal, `-depth`.
    pub fn penetration(&self) -> f64 {
        -self.depth
    }

    /// True if `handle` is on either side of this collision.
    pub fn involves(&self, handle: PolygonHandle) -> bool {
        self.face_polygon == handle || self.contact_polygon == handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collision_loses_to_any_depth() {
        let collision = Collision::new(PolygonHandle::from_raw(1), PolygonHandle::from_raw(2));
        assert_eq!(collision.depth, f64::NEG_INFINITY);
        assert!(-1e9 > collision.depth);
    }

    #[test]
    fn test_penetration_and_involves() {
        let mut collision = Collision::new(PolygonHandle::from_raw(3), PolygonHandle::from_raw(5));
        collision.depth = -0.25;
        assert_eq!(collision.penetration(), 0.25);
        assert!(collision.involves(PolygonHandle::from_raw(3)));
        assert!(collision.involves(PolygonHandle::from_raw(5)));
        assert!(!collision.involves(PolygonHandle::from_raw(4)));
    }
}
