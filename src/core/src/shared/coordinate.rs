use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point on the field in world feet (or on the canvas in pixels once mapped).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub const fn new(x: f32, y: f32) -> Self {
        Coordinate { x, y }
    }

    #[inline]
    pub fn distance_to(&self, other: &Coordinate) -> f32 {
        (self.to_vector() - other.to_vector()).norm()
    }

    #[inline]
    pub fn to_vector(self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f32>> for Coordinate {
    fn from(value: Vector2<f32>) -> Self {
        Coordinate::new(value.x, value.y)
    }
}

impl From<Coordinate> for Vector2<f32> {
    fn from(value: Coordinate) -> Self {
        value.to_vector()
    }
}

impl From<(f32, f32)> for Coordinate {
    fn from((x, y): (f32, f32)) -> Self {
        Coordinate::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);

        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_vector_conversion() {
        let coord = Coordinate::from(Vector2::new(1.5, -2.0));
        let back: Vector2<f32> = coord.into();

        assert_eq!(coord, Coordinate::new(1.5, -2.0));
        assert_eq!(back, Vector2::new(1.5, -2.0));
    }

    #[test]
    fn test_physics_vector_is_the_same_type() {
        let physics: rapier2d::prelude::Vector<rapier2d::prelude::Real> =
            Coordinate::new(4.0, -1.0).to_vector();

        assert_eq!(Coordinate::from(physics), Coordinate::new(4.0, -1.0));
    }
}
