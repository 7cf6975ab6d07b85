use crate::math::vec2::Vec2;

/// Axis-aligned bounds of a set of world-space points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec2,
    pub max: Vec2,
}

impl AABB {
    /// Builds bounds from two opposite corners in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        AABB {
            min: Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Tightest bounds around `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = AABB::new(*first, *first);
        for point in rest {
            aabb.include(*point);
        }
        Some(aabb)
    }

    pub fn include(&mut self, point: Vec2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn merge(&mut self, other: &AABB) {
        self.include(other.min);
        self.include(other.max);
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn extents(&self) -> Vec2 {
        self.max - self.min
    }
}
