//! Simulation settings for a [`World`](super::World).

use crate::error::{PhysicsError, Result};

/// Parameters fixed for the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Length of one simulation step in seconds.
    pub fixed_timestep: f64,
    /// Vertical acceleration applied to polygons that opt into gravity.
    /// Negative values pull downwards.
    pub gravity: f64,
    /// Upper bound on steps run by a single `update` call. `None` runs every
    /// step the accumulated time allows.
    pub max_steps_per_update: Option<usize>,
}

impl WorldConfig {
    pub fn new(fixed_timestep: f64, gravity: f64) -> Self {
        WorldConfig {
            fixed_timestep,
            gravity,
            ..Default::default()
        }
    }

    pub fn with_fixed_timestep(mut self, fixed_timestep: f64) -> Self {
        self.fixed_timestep = fixed_timestep;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_max_steps_per_update(mut self, max_steps: usize) -> Self {
        self.max_steps_per_update = Some(max_steps);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(PhysicsError::InvalidArgument(
                "fixed timestep must be positive and finite",
            ));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidArgument("gravity must be finite"));
        }
        if self.max_steps_per_update == Some(0) {
            return Err(PhysicsError::InvalidArgument(
                "step cap must allow at least one step",
            ));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    /// 50 Hz steps, no gravity, no step cap.
    fn default() -> Self {
        WorldConfig {
            fixed_timestep: 0.02,
            gravity: 0.0,
            max_steps_per_update: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorldConfig::default();
        assert_eq!(config.fixed_timestep, 0.02);
        assert_eq!(config.gravity, 0.0);
        assert_eq!(config.max_steps_per_update, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = WorldConfig::new(0.01, -9.81).with_max_steps_per_update(8);
        assert_eq!(config.fixed_timestep, 0.01);
        assert_eq!(config.gravity, -9.81);
        assert_eq!(config.max_steps_per_update, Some(8));

        let config = WorldConfig::default()
            .with_fixed_timestep(0.5)
            .with_gravity(3.0);
        assert_eq!(config, WorldConfig::new(0.5, 3.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for timestep in [0.0, -0.02, f64::NAN, f64::INFINITY] {
            assert!(WorldConfig::default().with_fixed_timestep(timestep).validate().is_err());
        }
        assert!(WorldConfig::default().with_gravity(f64::NAN).validate().is_err());
        assert!(WorldConfig::default().with_max_steps_per_update(0).validate().is_err());
    }
}
