pub mod face;
pub mod polygon;

pub use face::Face;
pub use polygon::PolygonShape;
