//! Ray casting against axis-aligned boxes.

use crate::geom::Axis;
use crate::geom::bboxes::BoundingBox;
use crate::{Point, Vector};

/// A semi-infinite ray (t >= 0) defined by an origin point and a direction.
///
/// The direction is not normalized: the slab test only depends on the signs
/// and ratios of its components.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Checks whether the ray passes through the box (slab method).
    ///
    /// The parametric interval `[t_near, t_far]` is narrowed by each pair of
    /// parallel faces. Faces are inclusive, so grazing rays count as hits.
    /// A zero direction component is handled as a ray parallel to that slab,
    /// which also makes a zero-length direction a point-in-box test.
    pub fn intersects_box(&self, bbox: &BoundingBox) -> bool {
        let bmin = bbox.min();
        let bmax = bbox.max();
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in Axis::ALL {
            let o = self.origin.coord(axis);
            let d = self.direction.component(axis);
            let lo = bmin.coord(axis);
            let hi = bmax.coord(axis);

            if d == 0.0 {
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }

            let mut t1 = (lo - o) / d;
            let mut t2 = (hi - o) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_near = t_near.max(t1);
            t_far = t_far.min(t2);

            if t_near > t_far || t_far < 0.0 {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point::new(0., 0., 0.), Point::new(2., 2., 2.)).unwrap()
    }

    #[test]
    fn test_origin_inside_any_direction() {
        let b = unit_box();
        let origin = Point::new(1., 1., 1.);
        let dirs = [
            Vector::new(1., 0., 0.),
            Vector::new(-1., -1., -1.),
            Vector::new(0.3, -7., 2.),
            Vector::new(0., 0., -1.),
            Vector::new(0., 0., 0.),
        ];
        for d in dirs {
            assert!(Ray::new(origin, d).intersects_box(&b), "Missed with direction {d}");
        }
    }

    #[test]
    fn test_ray_towards_box() {
        let ray = Ray::new(Point::new(-5., 1., 1.), Vector::new(1., 0., 0.));
        assert!(ray.intersects_box(&unit_box()));
        let ray = Ray::new(Point::new(10., 10., 10.), Vector::new(-1., -1., -1.));
        assert!(ray.intersects_box(&unit_box()));
    }

    #[test]
    fn test_ray_pointing_away() {
        let ray = Ray::new(Point::new(-5., 1., 1.), Vector::new(-1., 0., 0.));
        assert!(!ray.intersects_box(&unit_box()));
        let ray = Ray::new(Point::new(10., 10., 10.), Vector::new(1., 0.5, 2.));
        assert!(!ray.intersects_box(&unit_box()));
    }

    #[test]
    fn test_ray_missing_sideways() {
        let ray = Ray::new(Point::new(-5., 1., 1.), Vector::new(1., 1., 0.));
        assert!(!ray.intersects_box(&unit_box()));
    }

    #[test]
    fn test_tangent_ray_hits() {
        // Slides along the top face z = 2
        let ray = Ray::new(Point::new(-5., 1., 2.), Vector::new(1., 0., 0.));
        assert!(ray.intersects_box(&unit_box()));
        // Touches only the vertical edge at x = 0, y = 2
        let ray = Ray::new(Point::new(-1., 1., 1.), Vector::new(1., 1., 0.));
        assert!(ray.intersects_box(&unit_box()));
    }

    #[test]
    fn test_parallel_outside_slab() {
        let ray = Ray::new(Point::new(-5., 1., 2.5), Vector::new(1., 0., 0.));
        assert!(!ray.intersects_box(&unit_box()));
    }

    #[test]
    fn test_zero_direction_outside() {
        let ray = Ray::new(Point::new(5., 5., 5.), Vector::new(0., 0., 0.));
        assert!(!ray.intersects_box(&unit_box()));
    }

    #[test]
    fn test_flat_box() {
        let flat = BoundingBox::new(Point::new(0., 0., 1.), Point::new(2., 2., 1.)).unwrap();
        let ray = Ray::new(Point::new(1., 1., 5.), Vector::new(0., 0., -1.));
        assert!(ray.intersects_box(&flat));
    }

    #[test]
    fn test_box_behind_origin_on_last_axis() {
        // x and y slabs overlap in front, z slab only behind
        let ray = Ray::new(Point::new(-1., -1., 5.), Vector::new(1., 1., 1.));
        assert!(!ray.intersects_box(&unit_box()));
    }
}
