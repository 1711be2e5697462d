//! Planar geometry shared by cables and the conduit cross-section.

use nalgebra::{Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// Position in the conduit cross-section measured in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the horizontal axis.
    pub x: f64,
    /// Distance along the vertical axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }

    /// Offset this point by `offset` after rotating the offset by `angle` radians.
    #[must_use]
    pub fn offset_rotated(self, offset: Self, angle: f64) -> Self {
        let rotated = Rotation2::new(angle) * offset.to_vector();
        Self::from(self.to_vector() + rotated)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use conduitfill::point;
///
/// let centre = point(0.0, 0.0);
/// assert_eq!(centre.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Area of a circle with the given radius.
#[must_use]
pub fn circle_area(radius: f64) -> f64 {
    std::f64::consts::PI * radius * radius
}

/// Points spaced evenly on a circle of `distance` around the origin, starting at `start_angle`.
pub(crate) fn polar_ring(count: usize, distance: f64, start_angle: f64) -> Vec<Point> {
    let step = std::f64::consts::TAU / count as f64;
    (0..count)
        .map(|idx| {
            let angle = start_angle + step * idx as f64;
            Point::new(distance * angle.cos(), distance * angle.sin())
        })
        .collect()
}
