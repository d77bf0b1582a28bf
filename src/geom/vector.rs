use crate::geom::Axis;
use std::fmt;

/// Direction in the room frame. Not necessarily normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    /// Returns the component along `axis`.
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
            Axis::Z => self.dz,
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Vector({:.prec$}, {:.prec$}, {:.prec$})",
            self.dx,
            self.dy,
            self.dz,
            prec = prec
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component() {
        let v = Vector::new(-1., 0., -0.5);
        assert_eq!(v.component(Axis::X), -1.);
        assert_eq!(v.component(Axis::Y), 0.);
        assert_eq!(v.component(Axis::Z), -0.5);
    }

    #[test]
    fn test_display() {
        let v = Vector::new(1., 2., 3.);
        assert_eq!(format!("{v}"), "Vector(1.00, 2.00, 3.00)");
        assert_eq!(format!("{v:.1}"), "Vector(1.0, 2.0, 3.0)");
    }
}
