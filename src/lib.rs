pub mod config;
pub mod error;
pub mod geom;
pub mod shading;
pub mod solar;

// Prelude
pub use config::ShadeConfig;
pub use error::ShadeError;
pub use geom::bboxes::BoundingBox;
pub use geom::point::Point;
pub use geom::ray::Ray;
pub use geom::vector::Vector;
pub use shading::{ShadeState, Window, evaluate};
pub use solar::SunAngle;
