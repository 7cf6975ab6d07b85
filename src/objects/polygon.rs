use crate::collision::AABB;
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};
use crate::shapes::{Face, PolygonShape};

/// Everything needed to create a [`Polygon`].
///
/// Defaults: no rotation, unit mass, no gravity, dynamic.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonDesc {
    /// Local-space vertices in clockwise order.
    pub vertices: Vec<Vec2>,
    pub position: Vec2,
    /// Radians.
    pub rotation: f64,
    pub mass: f64,
    pub use_gravity: bool,
    pub is_static: bool,
}

impl PolygonDesc {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self {
            vertices,
            position: Vec2::ZERO,
            rotation: 0.0,
            mass: 1.0,
            use_gravity: false,
            is_static: false,
        }
    }

    /// An origin-centred clockwise box.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::new(PolygonShape::rectangle_vertices(width, height))
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// A convex polygon with rigid-body state.
///
/// World-space vertices and the face list are caches derived from the local
/// vertices, position and rotation. Every mutator that touches one of those
/// rebuilds the caches before returning, so they are never observed stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    shape: PolygonShape,
    global_vertices: Vec<Vec2>,
    faces: Vec<(usize, usize)>,

    position: Vec2,
    rotation: f64,
    velocity: Vec2,
    rotational_velocity: f64,

    mass: f64,
    rotational_inertia: f64,

    use_gravity: bool,
    is_static: bool,
}

impl Polygon {
    pub fn new(desc: PolygonDesc) -> Result<Self> {
        validate_mass(desc.mass)?;
        validate_finite(desc.position.is_finite() && desc.rotation.is_finite())?;
        let shape = PolygonShape::new(desc.vertices)?;

        let mut polygon = Self {
            shape,
            global_vertices: Vec::new(),
            faces: Vec::new(),
            position: desc.position,
            rotation: desc.rotation,
            velocity: Vec2::ZERO,
            rotational_velocity: 0.0,
            mass: desc.mass,
            rotational_inertia: 0.0,
            use_gravity: desc.use_gravity,
            is_static: desc.is_static,
        };
        polygon.rebuild_geometry();
        polygon.update_rotational_inertia();
        Ok(polygon)
    }

    /// Recomputes the face list and the world-space vertex cache.
    fn rebuild_geometry(&mut self) {
        self.faces.clear();
        self.faces.extend(self.shape.edges());
        self.update_global_vertices();
    }

    fn update_global_vertices(&mut self) {
        let transform = self.transform();
        self.global_vertices.clear();
        self.global_vertices
            .extend(self.shape.vertices().iter().map(|&v| transform.apply(v)));
    }

    /// Inertia approximated as `mass * r^2`, `r` being the mean vertex distance
    /// from the centre of mass.
    fn update_rotational_inertia(&mut self) {
        let radius = self.shape.mean_vertex_radius();
        self.rotational_inertia = self.mass * radius * radius;
    }

    // --- Geometry --- //

    /// Local-to-world transform: rotation about the centre of mass, then translation.
    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.rotation)
    }

    /// Local-space vertices, centred on the centre of mass.
    pub fn vertices(&self) -> &[Vec2] {
        self.shape.vertices()
    }

    /// World-space vertices under the current position and rotation.
    pub fn global_vertices(&self) -> &[Vec2] {
        &self.global_vertices
    }

    /// Replaces the vertex list.
    ///
    /// The new vertices are validated, re-centred on their centre of mass, and
    /// the face list, world vertices and rotational inertia are rebuilt from
    /// them. On error the polygon is left untouched. The position is not
    /// adjusted, so re-centring an off-centre vertex list moves the shape in
    /// world space by the removed offset.
    pub fn set_vertices(&mut self, vertices: Vec<Vec2>) -> Result<()> {
        self.shape = PolygonShape::new(vertices)?;
        self.rebuild_geometry();
        self.update_rotational_inertia();
        Ok(())
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn face(&self, index: usize) -> Option<Face<'_>> {
        self.faces
            .get(index)
            .map(|&(index1, index2)| Face::new(self, index1, index2))
    }

    /// Faces in vertex order; face `i` runs from vertex `i` to vertex `i + 1`.
    pub fn faces(&self) -> impl Iterator<Item = Face<'_>> + '_ {
        self.faces
            .iter()
            .map(move |&(index1, index2)| Face::new(self, index1, index2))
    }

    /// World-space bounds of the current vertices.
    pub fn aabb(&self) -> AABB {
        AABB::from_points(&self.global_vertices).unwrap_or_else(|| AABB::new(self.position, self.position))
    }

    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    // --- Transform --- //

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_global_vertices();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.update_global_vertices();
    }

    pub fn rotate(&mut self, delta: f64) {
        self.set_rotation(self.rotation + delta);
    }

    /// Sets position and rotation together with a single cache rebuild.
    pub fn set_transform(&mut self, position: Vec2, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
        self.update_global_vertices();
    }

    // --- Motion --- //

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn accelerate(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Radians per second.
    pub fn rotational_velocity(&self) -> f64 {
        self.rotational_velocity
    }

    pub fn set_rotational_velocity(&mut self, rotational_velocity: f64) {
        self.rotational_velocity = rotational_velocity;
    }

    pub fn accelerate_rotation(&mut self, delta: f64) {
        self.rotational_velocity += delta;
    }

    // --- Mass properties --- //

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Sets the mass and re-derives the rotational inertia from it.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass)?;
        self.mass = mass;
        self.update_rotational_inertia();
        Ok(())
    }

    /// Derived from mass and vertices; there is no setter.
    pub fn rotational_inertia(&self) -> f64 {
        self.rotational_inertia
    }

    /// `1 / mass`, or zero for static polygons, which behave as infinitely heavy.
    pub fn inverse_mass(&self) -> f64 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// `1 / rotational_inertia`, or zero for static polygons.
    pub fn inverse_rotational_inertia(&self) -> f64 {
        if self.is_static || self.rotational_inertia <= 0.0 {
            0.0
        } else {
            1.0 / self.rotational_inertia
        }
    }

    // --- Flags --- //

    pub fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_is_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }
}

fn validate_mass(mass: f64) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidArgument("mass must be positive and finite"))
    }
}

fn validate_finite(finite: bool) -> Result<()> {
    if finite {
        Ok(())
    } else {
        Err(PhysicsError::InvalidArgument("position and rotation must be finite"))
    }
}
