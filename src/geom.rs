pub mod bboxes;
pub mod point;
pub mod ray;
pub mod vector;

/// Coordinate axis. `Z` is the vertical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}
