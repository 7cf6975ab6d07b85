use crate::collision::AABB;
use crate::error::{PhysicsError, Result};
use crate::math::vec2::Vec2;

/// Signed areas below this fraction of the squared extent count as zero.
const RELATIVE_AREA_EPSILON: f64 = 1e-10;
/// Edges shorter than this fraction of the extent count as zero length.
const RELATIVE_EDGE_EPSILON: f64 = 1e-9;

/// The vertex list of a convex polygon in local space.
///
/// Vertices are expected in clockwise order; convexity and winding are not
/// checked. A `PolygonShape` is always validated and always re-centred so that
/// its area-weighted centroid sits on the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    vertices: Vec<Vec2>,
}

impl PolygonShape {
    /// Validates `vertices` and re-centres them about their centre of mass.
    pub fn new(mut vertices: Vec<Vec2>) -> Result<Self> {
        Self::validate(&vertices)?;
        let (_, center_of_mass) = area_and_center_of_mass(&vertices);
        for vertex in vertices.iter_mut() {
            *vertex -= center_of_mass;
        }
        Ok(Self { vertices })
    }

    /// Checks that a vertex list can be turned into a shape.
    ///
    /// Zero vertices and zero total area are invalid arguments. A single vertex
    /// or two coincident consecutive vertices cannot form a face and are
    /// reported as degenerate geometry. Both thresholds scale with the extent of
    /// the vertex list.
    pub fn validate(vertices: &[Vec2]) -> Result<()> {
        match vertices.len() {
            0 => return Err(PhysicsError::InvalidArgument("vertex list is empty")),
            1 => return Err(PhysicsError::DegenerateGeometry { vertex_count: 1 }),
            _ => {}
        }
        if !vertices.iter().all(|v| v.is_finite()) {
            return Err(PhysicsError::InvalidArgument("vertex coordinates must be finite"));
        }
        let (signed_area, _) = area_and_center_of_mass(vertices);
        if is_zero_area(signed_area, vertices) {
            return Err(PhysicsError::InvalidArgument("polygon has zero area"));
        }

        let min_edge = RELATIVE_EDGE_EPSILON * extent(vertices);
        let n = vertices.len();
        let has_empty_edge = (0..n)
            .any(|i| vertices[i].distance_squared(vertices[(i + 1) % n]) <= min_edge * min_edge);
        if has_empty_edge {
            return Err(PhysicsError::DegenerateGeometry { vertex_count: n });
        }
        Ok(())
    }

    /// A clockwise, origin-centred `width` x `height` box.
    pub fn rectangle_vertices(width: f64, height: f64) -> Vec<Vec2> {
        let (hw, hh) = (width / 2.0, height / 2.0);
        vec![
            Vec2::new(-hw, hh),
            Vec2::new(hw, hh),
            Vec2::new(hw, -hh),
            Vec2::new(-hw, -hh),
        ]
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex index pairs `(i, (i + 1) % n)` of every edge, in order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (i, (i + 1) % n))
    }

    /// Signed area; negative for clockwise winding.
    pub fn signed_area(&self) -> f64 {
        area_and_center_of_mass(&self.vertices).0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Mean distance from the centre of mass to the vertices.
    pub fn mean_vertex_radius(&self) -> f64 {
        let total: f64 = self.vertices.iter().map(|v| v.magnitude()).sum();
        total / self.vertices.len() as f64
    }
}

/// Largest side of the vertices' bounding box.
fn extent(vertices: &[Vec2]) -> f64 {
    AABB::from_points(vertices).map_or(0.0, |bounds| {
        let extents = bounds.extents();
        extents.x.max(extents.y)
    })
}

fn is_zero_area(signed_area: f64, vertices: &[Vec2]) -> bool {
    let extent = extent(vertices);
    signed_area.abs() <= RELATIVE_AREA_EPSILON * extent * extent
}

/// Unweighted average of the vertices.
pub fn geometric_center(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let mut sum = Vec2::ZERO;
    for v in vertices {
        sum += *v;
    }
    sum / vertices.len() as f64
}

/// Signed area and area-weighted centroid of a polygon.
///
/// The polygon is fanned into triangles `(c, v_i, v_{i+1})` around its
/// geometric centre `c`, one per edge. Each triangle's centroid is weighted by
/// its signed area, so a consistent winding in either direction yields the same
/// centroid. With zero total area the geometric centre is returned.
pub fn area_and_center_of_mass(vertices: &[Vec2]) -> (f64, Vec2) {
    let center = geometric_center(vertices);
    let n = vertices.len();

    let mut weighted = Vec2::ZERO;
    let mut signed_area_sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let triangle_signed_area = (a - center).cross(b - center) / 2.0;
        let triangle_centroid = (center + a + b) / 3.0;
        weighted += triangle_centroid * triangle_signed_area;
        signed_area_sum += triangle_signed_area;
    }

    if is_zero_area(signed_area_sum, vertices) {
        (signed_area_sum, center)
    } else {
        (signed_area_sum, weighted / signed_area_sum)
    }
}
