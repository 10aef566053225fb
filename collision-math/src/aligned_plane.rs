use cgmath::{Point3, Vector3};

use crate::cast::CastResult;
use crate::{AABB, COINCIDENCE_EPSILON, IntersectionClassification, LineSegment};

/// An axis in 3D space.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Axis {
    /// X Axis.
    X = 0,
    /// Y Axis.
    Y = 1,
    /// Z Axis.
    Z = 2,
}

impl Axis {
    /// Returns the component index of the axis.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit vector along the axis.
    pub const fn unit(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::new(1.0, 0.0, 0.0),
            Axis::Y => Vector3::new(0.0, 1.0, 0.0),
            Axis::Z => Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

/// An axis aligned plane, the cheap special case of [`Plane`](crate::Plane)
/// whose normal is a coordinate axis.
#[derive(Debug, Clone, Copy)]
pub struct AlignedPlane {
    axis: Axis,
    distance: f32,
}

impl AlignedPlane {
    /// Creates a new axis aligned plane from the given axis and distance.
    pub const fn new(axis: Axis, distance: f32) -> Self {
        AlignedPlane { axis, distance }
    }

    /// Returns the axis of the plane.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the distance of the plane.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Determine which side of the plane a point is on, treating points
    /// within [`COINCIDENCE_EPSILON`] of the plane as on it.
    pub fn classify_point(&self, point: Point3<f32>) -> IntersectionClassification {
        let distance = point[self.axis.index()] - self.distance;
        if distance > COINCIDENCE_EPSILON {
            IntersectionClassification::Front
        } else if distance < -COINCIDENCE_EPSILON {
            IntersectionClassification::Back
        } else {
            IntersectionClassification::Intersecting
        }
    }

    /// Tests if the plane passes through the interior of an axis aligned
    /// bounding box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        let offset = self.distance - aabb.center()[self.axis.index()];
        offset.abs() < aabb.extent()[self.axis.index()]
    }

    /// Cast a line segment against the plane.
    ///
    /// Segments parallel to the plane never hit. The reported normal is the
    /// positive axis unit vector.
    pub fn cast_segment(&self, segment: &LineSegment, result: &mut CastResult) -> bool {
        let index = self.axis.index();
        let denominator = segment.delta()[index];
        if denominator == 0.0 {
            return false;
        }

        let fraction = (self.distance - segment.p0()[index]) / denominator;
        if fraction < 0.0 || fraction > 1.0 {
            return false;
        }

        result.consider_hit(fraction, self.axis.unit(), Some(segment.point_at(fraction)))
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3, assert_relative_eq};

    use crate::{AABB, AlignedPlane, Axis, CastResult, IntersectionClassification, LineSegment};

    #[test]
    fn test_aligned_plane_creation() {
        let plane_x = AlignedPlane::new(Axis::X, 2.0);
        assert_eq!(plane_x.axis(), Axis::X);
        assert_eq!(plane_x.distance(), 2.0);

        let plane_y = AlignedPlane::new(Axis::Y, -1.5);
        assert_eq!(plane_y.axis(), Axis::Y);
        assert_eq!(plane_y.distance(), -1.5);
    }

    #[test]
    fn test_classify_point() {
        let plane = AlignedPlane::new(Axis::Y, 2.0);

        assert_eq!(
            plane.classify_point(Point3::new(0.0, 3.0, 0.0)),
            IntersectionClassification::Front
        );
        assert_eq!(
            plane.classify_point(Point3::new(0.0, 1.0, 0.0)),
            IntersectionClassification::Back
        );
        assert_eq!(
            plane.classify_point(Point3::new(5.0, 2.0, 5.0)),
            IntersectionClassification::Intersecting
        );
    }

    #[test]
    fn test_intersects_aabb() {
        let aabb = AABB::new(Point3::new(2.0, 2.0, 2.0), Vector3::new(2.0, 2.0, 2.0));

        assert!(AlignedPlane::new(Axis::X, 2.0).intersects_aabb(&aabb));
        assert!(AlignedPlane::new(Axis::Y, 3.0).intersects_aabb(&aabb));
        assert!(AlignedPlane::new(Axis::Z, 1.0).intersects_aabb(&aabb));

        assert!(!AlignedPlane::new(Axis::X, 5.0).intersects_aabb(&aabb));
        assert!(!AlignedPlane::new(Axis::Y, -1.0).intersects_aabb(&aabb));
        assert!(!AlignedPlane::new(Axis::Z, 4.0).intersects_aabb(&aabb));
    }

    #[test]
    fn test_cast_segment() {
        let plane = AlignedPlane::new(Axis::X, 1.0);
        let segment = LineSegment::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0));

        let mut result = CastResult::with_contact_point();
        assert!(plane.cast_segment(&segment, &mut result));
        assert_relative_eq!(result.fraction(), 0.5);
        assert_eq!(result.normal(), Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(result.contact_point().unwrap(), Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_cast_segment_parallel() {
        let plane = AlignedPlane::new(Axis::Z, 1.0);
        let segment = LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 5.0, 0.0));

        let mut result = CastResult::new();
        assert!(!plane.cast_segment(&segment, &mut result));
        assert_eq!(result.fraction(), 1.0);
    }
}
