use super::arena::{PolygonArena, PolygonHandle};
use super::config::WorldConfig;
use crate::collision::{self, Collision};
use crate::error::{PhysicsError, Result};
use crate::integration::integrator;
use crate::objects::{Polygon, PolygonDesc};

/// Owns every polygon and advances them in fixed-size steps.
///
/// Polygons are only reachable through the [`PolygonHandle`] returned by
/// [`World::create_polygon`]. Collisions found by the most recent step are kept
/// until the next one starts.
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    polygons: PolygonArena,
    collisions: Vec<Collision>,
    accumulated_time: f64,
    steps_run: u64,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "creating world: timestep {}s, gravity {}",
            config.fixed_timestep,
            config.gravity
        );
        Ok(Self {
            config,
            polygons: PolygonArena::default(),
            collisions: Vec::new(),
            accumulated_time: 0.0,
            steps_run: 0,
        })
    }

    /// Shorthand for a world with the given timestep and gravity and no step cap.
    pub fn with_timestep(fixed_timestep: f64, gravity: f64) -> Result<Self> {
        Self::new(WorldConfig::new(fixed_timestep, gravity))
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // --- Time --- //

    /// Adds `delta` seconds to the accumulator and runs every whole fixed step
    /// it now holds. Returns the number of steps run.
    ///
    /// With `max_steps_per_update` set, a backlog beyond the cap is discarded
    /// down to less than one step.
    pub fn update(&mut self, delta: f64) -> Result<usize> {
        if !(delta.is_finite() && delta >= 0.0) {
            return Err(PhysicsError::InvalidArgument(
                "update delta must be non-negative and finite",
            ));
        }

        let fixed = self.config.fixed_timestep;
        self.accumulated_time += delta;

        let mut steps = 0;
        while self.accumulated_time >= fixed {
            if self.config.max_steps_per_update.is_some_and(|cap| steps >= cap) {
                let dropped = self.accumulated_time - self.accumulated_time % fixed;
                log::warn!(
                    "step cap of {} reached, dropping {:.4}s of simulation time",
                    steps,
                    dropped
                );
                self.accumulated_time %= fixed;
                break;
            }
            self.accumulated_time -= fixed;
            self.step(fixed);
            self.steps_run += 1;
            steps += 1;
        }
        Ok(steps)
    }

    /// Simulated time: completed steps times the fixed timestep.
    pub fn current_time(&self) -> f64 {
        self.steps_run as f64 * self.config.fixed_timestep
    }

    /// Time carried over to the next `update`, always below one step.
    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    /// One simulation step: detect, resolve, correct penetration, integrate.
    ///
    /// Everything a step touches was validated when it was stored, so a step
    /// cannot fail part way through.
    pub(crate) fn step(&mut self, dt: f64) {
        self.detect_collisions();
        self.resolve_collisions();
        self.correct_positions();
        for polygon in self.polygons.iter_mut() {
            integrator::integrate(polygon, self.config.gravity, dt);
        }
    }

    /// SAT over every unordered pair of live polygons in ascending handle order.
    fn detect_collisions(&mut self) {
        self.collisions.clear();

        for (i, (handle_a, a)) in self.polygons.iter().enumerate() {
            for (handle_b, b) in self.polygons.iter().skip(i + 1) {
                if let Some(collision) = collision::check_collision(a, handle_a, b, handle_b) {
                    log::trace!(
                        "collision: face of {} hit by {}, penetration {:.4}",
                        collision.face_polygon,
                        collision.contact_polygon,
                        collision.penetration()
                    );
                    self.collisions.push(collision);
                }
            }
        }
    }

    fn resolve_collisions(&mut self) {
        for collision in &self.collisions {
            if let Some((face, contact)) = self
                .polygons
                .get_pair_mut(collision.face_polygon, collision.contact_polygon)
            {
                collision::resolve_collision(collision, face, contact);
            }
        }
    }

    /// Positional correction for every collision, after all impulses.
    fn correct_positions(&mut self) {
        for collision in &self.collisions {
            if let Some((face, contact)) = self
                .polygons
                .get_pair_mut(collision.face_polygon, collision.contact_polygon)
            {
                collision::correct_positions(collision, face, contact);
            }
        }
    }

    // --- Polygons --- //

    pub fn create_polygon(&mut self, desc: PolygonDesc) -> Result<PolygonHandle> {
        let polygon = Polygon::new(desc)?;
        let handle = self.polygons.insert(polygon)?;
        log::debug!("created polygon {}", handle);
        Ok(handle)
    }

    /// Removes a polygon. Its handle stays invalid for the rest of the world's life.
    pub fn destroy_polygon(&mut self, handle: PolygonHandle) -> Result<()> {
        self.polygons.remove(handle)?;
        self.collisions.retain(|collision| !collision.involves(handle));
        log::debug!("destroyed polygon {}", handle);
        Ok(())
    }

    pub fn polygon(&self, handle: PolygonHandle) -> Result<&Polygon> {
        self.polygons
            .get(handle)
            .ok_or(PhysicsError::InvalidHandle(handle))
    }

    pub fn polygon_mut(&mut self, handle: PolygonHandle) -> Result<&mut Polygon> {
        self.polygons
            .get_mut(handle)
            .ok_or(PhysicsError::InvalidHandle(handle))
    }

    /// Live polygons in ascending handle order.
    pub fn polygons(&self) -> impl Iterator<Item = (PolygonHandle, &Polygon)> + '_ {
        self.polygons.iter()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    // --- Collisions --- //

    /// Whether `handle` took part in any collision found by the last step.
    pub fn is_colliding(&self, handle: PolygonHandle) -> Result<bool> {
        self.polygon(handle)?;
        Ok(self.collisions.iter().any(|collision| collision.involves(handle)))
    }

    /// Collisions found by the last step, in detection order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}
