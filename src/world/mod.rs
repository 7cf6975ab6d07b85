mod arena;
mod config;
mod physics_world;

pub use arena::PolygonHandle;
pub use config::WorldConfig;
pub use physics_world::World;
