use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::cast::CastResult;
use crate::{GEOMETRIC_EPSILON, LineSegment};

/// A triangle with a cached unit plane normal.
///
/// The normal follows the counter-clockwise winding of the vertices.
/// Colinear vertices leave no defined normal; the cached normal then falls
/// back to `(0, 0, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
    normal: Vector3<f32>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        let cross = (v1 - v0).cross(v2 - v0);
        let normal = match cross.magnitude2() < GEOMETRIC_EPSILON * GEOMETRIC_EPSILON {
            true => Vector3::unit_z(),
            false => cross.normalize(),
        };

        Triangle {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Get the vertices of the triangle.
    pub fn vertices(&self) -> [Point3<f32>; 3] {
        self.vertices
    }

    /// Get the unit plane normal of the triangle.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Check if a point on the triangle's plane lies within the triangle.
    ///
    /// Each edge is tested by the sign of the cross product with the point
    /// offset against the plane normal, with a [`GEOMETRIC_EPSILON`] band
    /// so points on an edge count as contained.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        for index in 0..3 {
            let edge = self.vertices[(index + 1) % 3] - self.vertices[index];
            let to_point = point - self.vertices[index];
            if edge.cross(to_point).dot(self.normal) < -GEOMETRIC_EPSILON {
                return false;
            }
        }
        true
    }

    /// Cast a line segment against the triangle.
    ///
    /// Solves the segment against the triangle's plane and accepts the hit
    /// only if the crossing point passes the containment test. Segments
    /// parallel to the plane never hit.
    pub fn cast_segment(&self, segment: &LineSegment, result: &mut CastResult) -> bool {
        let denominator = self.normal.dot(segment.delta());
        if denominator == 0.0 {
            return false;
        }

        let distance = self.normal.dot(self.vertices[0].to_vec());
        let fraction = (distance - self.normal.dot(segment.p0().to_vec())) / denominator;
        if fraction < 0.0 || fraction > 1.0 {
            return false;
        }

        let point = segment.point_at(fraction);
        if !self.contains_point(point) {
            return false;
        }

        result.consider_hit(fraction, self.normal, Some(point))
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3, assert_relative_eq};

    use crate::{CastResult, LineSegment, Triangle};

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        )
    }

    #[test]
    fn test_normal() {
        assert_relative_eq!(unit_triangle().normal(), Vector3::unit_z());

        let flipped = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        );
        assert_relative_eq!(flipped.normal(), -Vector3::unit_z());
    }

    #[test]
    fn test_degenerate_normal_fallback() {
        let degenerate = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(degenerate.normal(), Vector3::unit_z());
    }

    #[test]
    fn test_contains_point() {
        let triangle = unit_triangle();

        assert!(triangle.contains_point(Point3::new(1.0, 1.0, 0.0)));
        assert!(triangle.contains_point(Point3::new(0.0, 0.0, 0.0)));
        assert!(triangle.contains_point(Point3::new(2.0, 0.0, 0.0)));
        assert!(!triangle.contains_point(Point3::new(3.0, 3.0, 0.0)));
        assert!(!triangle.contains_point(Point3::new(-1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_cast_segment() {
        let triangle = unit_triangle();
        let segment = LineSegment::new(Point3::new(1.0, 1.0, 2.0), Point3::new(1.0, 1.0, -2.0));

        let mut result = CastResult::with_contact_point();
        assert!(triangle.cast_segment(&segment, &mut result));
        assert_relative_eq!(result.fraction(), 0.5);
        assert_relative_eq!(result.normal(), Vector3::unit_z());
        assert_relative_eq!(result.contact_point().unwrap(), Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_cast_segment_misses_outside() {
        let triangle = unit_triangle();
        let segment = LineSegment::new(Point3::new(3.0, 3.0, 2.0), Point3::new(3.0, 3.0, -2.0));

        let mut result = CastResult::new();
        assert!(!triangle.cast_segment(&segment, &mut result));
        assert_eq!(result.fraction(), 1.0);
    }

    #[test]
    fn test_cast_segment_parallel() {
        let triangle = unit_triangle();
        let segment = LineSegment::new(Point3::new(0.0, 0.0, 1.0), Point3::new(4.0, 4.0, 1.0));

        let mut result = CastResult::new();
        assert!(!triangle.cast_segment(&segment, &mut result));
    }
}
