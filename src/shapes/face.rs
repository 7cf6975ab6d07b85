use crate::math::vec2::Vec2;
use crate::objects::Polygon;

/// A directed edge of a [`Polygon`], from vertex `index1` to vertex `index2`.
///
/// A face borrows its polygon and reads vertices through it, so world-space
/// queries always see the polygon's current transform.
#[derive(Debug, Clone, Copy)]
pub struct Face<'a> {
    polygon: &'a Polygon,
    index1: usize,
    index2: usize,
}

impl<'a> Face<'a> {
    pub(crate) fn new(polygon: &'a Polygon, index1: usize, index2: usize) -> Self {
        Self {
            polygon,
            index1,
            index2,
        }
    }

    pub fn polygon(&self) -> &'a Polygon {
        self.polygon
    }

    pub fn index1(&self) -> usize {
        self.index1
    }

    pub fn index2(&self) -> usize {
        self.index2
    }

    pub fn local_vertex1(&self) -> Vec2 {
        self.polygon.vertices()[self.index1]
    }

    pub fn local_vertex2(&self) -> Vec2 {
        self.polygon.vertices()[self.index2]
    }

    pub fn vertex1(&self) -> Vec2 {
        self.polygon.global_vertices()[self.index1]
    }

    pub fn vertex2(&self) -> Vec2 {
        self.polygon.global_vertices()[self.index2]
    }

    /// `vertex2 - vertex1` in local space.
    pub fn local_vector(&self) -> Vec2 {
        self.local_vertex2() - self.local_vertex1()
    }

    /// `vertex2 - vertex1` in world space.
    pub fn vector(&self) -> Vec2 {
        self.vertex2() - self.vertex1()
    }

    /// Outward unit normal in local space.
    pub fn local_normal(&self) -> Vec2 {
        self.local_vector().normalize().perpendicular()
    }

    /// Outward unit normal in world space. Clockwise winding puts it on the
    /// exterior side.
    pub fn normal(&self) -> Vec2 {
        self.vector().normalize().perpendicular()
    }

    /// Signed distance from `point` to the face line in world space; positive
    /// on the outward side.
    pub fn distance(&self, point: Vec2) -> f64 {
        (point - self.vertex1()).dot(self.normal())
    }

    /// Same as [`Face::distance`] with `point` and the face in local space.
    pub fn local_distance(&self, point: Vec2) -> f64 {
        (point - self.local_vertex1()).dot(self.local_normal())
    }
}
