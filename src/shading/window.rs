use crate::error::ShadeError;
use crate::geom::bboxes::BoundingBox;

/// A window with a two-rail (top-down / bottom-up) shade.
///
/// The window is a box that is flat along x: rays are cast from `min.x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub name: String,
    bounds: BoundingBox,
    pub top_rail_id: String,
    pub bottom_rail_id: String,
}

impl Window {
    pub fn new(
        name: &str,
        bounds: BoundingBox,
        top_rail_id: &str,
        bottom_rail_id: &str,
    ) -> Result<Self, ShadeError> {
        if bounds.height() <= 0.0 {
            return Err(ShadeError::InvalidGeometry(format!(
                "window {name} must have a positive height, got {}",
                bounds.height()
            )));
        }
        Ok(Self {
            name: name.to_string(),
            bounds,
            top_rail_id: top_rail_id.to_string(),
            bottom_rail_id: bottom_rail_id.to_string(),
        })
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}
