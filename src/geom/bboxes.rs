use std::fmt;

use crate::error::ShadeError;
use crate::geom::Axis;
use crate::geom::point::Point;

/// Axis-aligned box. `min` is lower or equal to `max` on every axis.
///
/// Degenerate boxes (zero extent along one or more axes) are allowed,
/// windows are planar boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl BoundingBox {
    /// Creates a box from its min and max corners.
    ///
    /// Fails if any coordinate is not finite or if `min > max` on any axis.
    pub fn new(min: Point, max: Point) -> Result<Self, ShadeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ShadeError::InvalidGeometry(format!(
                "box corners must be finite, got min={min} max={max}"
            )));
        }
        for axis in Axis::ALL {
            if min.coord(axis) > max.coord(axis) {
                return Err(ShadeError::InvalidGeometry(format!(
                    "box min exceeds max along {axis:?}: min={min} max={max}"
                )));
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        self.max.coord(axis) - self.min.coord(axis)
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.extent(Axis::Z)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "BoundingBox({:.prec$} .. {:.prec$})", self.min, self.max, prec = prec)
    }
}
