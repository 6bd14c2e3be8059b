//! Geometric primitives: Point and the vector arithmetic used by gesture kinematics

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A 2D coordinate pair in logical pixels.
///
/// The same type doubles as a displacement vector: `delta`, `local` and
/// `direction` in a gesture snapshot are all `Point`s.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean length of the vector from the origin to this point.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Distance between two points.
    pub fn distance_to(self, other: Point) -> f32 {
        (other - self).length()
    }

    /// Returns the unit vector pointing the same way, or [`Point::ZERO`] when
    /// the length is zero.
    ///
    /// Never produces NaN for finite input.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            self / len
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;

    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, -2.0);

        assert_eq!(a + b, Point::new(4.0, 2.0));
        assert_eq!(a - b, Point::new(2.0, 6.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
        assert_eq!(-b, Point::new(-1.0, 2.0));
    }

    #[test]
    fn length_and_distance() {
        assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance_to(Point::new(4.0, 5.0)), 5.0);
        assert_eq!(Point::ZERO.length(), 0.0);
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        let n = Point::ZERO.normalize_or_zero();
        assert_eq!(n, Point::ZERO);
        assert!(n.is_finite());
    }

    #[test]
    fn normalize_yields_unit_vector() {
        let n = Point::new(-6.0, 8.0).normalize_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x + 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }
}
