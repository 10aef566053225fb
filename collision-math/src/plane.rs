use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::cast::CastResult;
use crate::{AABB, COINCIDENCE_EPSILON, GEOMETRIC_EPSILON, LineSegment, OrientedBox, Sphere, Triangle};

/// A plane in 3D space, the set of points `p` with `normal · p = distance`.
///
/// The normal is unit length, with one documented exception: construction
/// from three colinear points falls back to `normal = (0, 0, 1)`,
/// `distance = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    normal: Vector3<f32>,
    distance: f32,
}

impl Plane {
    /// Create a new plane from a unit normal and its distance from the
    /// origin along that normal. The normal is assumed to be unit length.
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        Plane { normal, distance }
    }

    /// Create a new plane from a normal vector and a point on the plane.
    pub fn from_point_and_normal(normal: Vector3<f32>, point: Point3<f32>) -> Self {
        let normal = normal.normalize();
        Plane {
            normal,
            distance: normal.dot(point.to_vec()),
        }
    }

    /// Create a plane from three points.
    ///
    /// Colinear points leave no defined normal; the result falls back to
    /// `normal = (0, 0, 1)`, `distance = 0`.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let cross = (b - a).cross(c - a);
        if cross.magnitude2() < GEOMETRIC_EPSILON * GEOMETRIC_EPSILON {
            return Plane {
                normal: Vector3::unit_z(),
                distance: 0.0,
            };
        }

        let normal = cross.normalize();
        Plane {
            normal,
            distance: normal.dot(a.to_vec()),
        }
    }

    /// Get the normal of the plane.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Get the distance of the plane from the origin.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Calculate the signed distance from a point to the plane.
    pub fn signed_distance_to_point(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(point.to_vec()) - self.distance
    }

    /// Determine which side of the plane a point is on, treating points
    /// within [`COINCIDENCE_EPSILON`] of the plane as on it.
    pub fn classify_point(&self, point: Point3<f32>) -> IntersectionClassification {
        let distance = self.signed_distance_to_point(point);
        if distance > COINCIDENCE_EPSILON {
            IntersectionClassification::Front
        } else if distance < -COINCIDENCE_EPSILON {
            IntersectionClassification::Back
        } else {
            IntersectionClassification::Intersecting
        }
    }

    /// Classify an AABB with respect to this plane.
    ///
    /// The sign of each normal component selects the box corner farthest
    /// along the normal; classifying that corner and its mirrored opposite
    /// decides the whole box.
    pub fn classify_aabb(&self, aabb: &AABB) -> IntersectionClassification {
        let mut near_corner = aabb.center();
        let mut far_corner = aabb.center();

        for axis in 0..3 {
            let offset = aabb.extent()[axis];
            if self.normal[axis] >= 0.0 {
                near_corner[axis] -= offset;
                far_corner[axis] += offset;
            } else {
                near_corner[axis] += offset;
                far_corner[axis] -= offset;
            }
        }

        if self.classify_point(near_corner) == IntersectionClassification::Front {
            IntersectionClassification::Front
        } else if self.classify_point(far_corner) == IntersectionClassification::Back {
            IntersectionClassification::Back
        } else {
            IntersectionClassification::Intersecting
        }
    }

    /// Classify an oriented box with respect to this plane by projecting
    /// its extent onto the normal.
    pub fn classify_obb(&self, obb: &OrientedBox) -> IntersectionClassification {
        let rotation = obb.rotation();
        let extent = obb.extent();
        let radius = extent.x * self.normal.dot(rotation.x).abs()
            + extent.y * self.normal.dot(rotation.y).abs()
            + extent.z * self.normal.dot(rotation.z).abs();

        let distance = self.signed_distance_to_point(obb.center());
        if distance > radius {
            IntersectionClassification::Front
        } else if distance < -radius {
            IntersectionClassification::Back
        } else {
            IntersectionClassification::Intersecting
        }
    }

    /// Classify a sphere with respect to this plane.
    pub fn classify_sphere(&self, sphere: &Sphere) -> IntersectionClassification {
        let distance = self.signed_distance_to_point(sphere.center());
        if distance > sphere.radius() {
            IntersectionClassification::Front
        } else if distance < -sphere.radius() {
            IntersectionClassification::Back
        } else {
            IntersectionClassification::Intersecting
        }
    }

    /// Classify a triangle with respect to this plane by classifying its
    /// vertices.
    pub fn classify_triangle(&self, triangle: &Triangle) -> IntersectionClassification {
        let [a, b, c] = triangle.vertices();
        let first = self.classify_point(a);
        if first == IntersectionClassification::Intersecting {
            return IntersectionClassification::Intersecting;
        }

        for vertex in [b, c] {
            if self.classify_point(vertex) != first {
                return IntersectionClassification::Intersecting;
            }
        }
        first
    }

    /// Cast a line segment against the plane.
    ///
    /// Segments parallel to the plane never hit, including zero-length
    /// segments. The reported normal is the plane normal as oriented,
    /// regardless of which side the segment comes from.
    pub fn cast_segment(&self, segment: &LineSegment, result: &mut CastResult) -> bool {
        let denominator = self.normal.dot(segment.delta());
        if denominator == 0.0 {
            return false;
        }

        let fraction = (self.distance - self.normal.dot(segment.p0().to_vec())) / denominator;
        if fraction < 0.0 || fraction > 1.0 {
            return false;
        }

        result.consider_hit(fraction, self.normal, Some(segment.point_at(fraction)))
    }
}

/// Classifies a location against a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionClassification {
    /// Entirely in front of the plane.
    Front,
    /// Entirely behind the plane.
    Back,
    /// Intersects the plane.
    Intersecting,
}
