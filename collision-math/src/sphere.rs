use cgmath::{EuclideanSpace, InnerSpace, Matrix, MetricSpace, Point3};

use crate::cast::CastResult;
use crate::{AABB, COINCIDENCE_EPSILON, ContainmentClassification, GEOMETRIC_EPSILON, LineSegment, OrientedBox, Triangle};

/// Error returned when constructing a bounding volume from an empty point
/// set.
#[derive(Debug)]
pub struct EmptyPointSetError;

/// A sphere.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    center: Point3<f32>,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere from a center point and radius.
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Sphere { center, radius }
    }

    /// Computes an approximate minimal bounding sphere of a point set using
    /// Ritter's algorithm.
    ///
    /// The first pass finds the six axis-extreme points and takes the most
    /// separated pair as the initial diameter; the second pass grows the
    /// sphere minimally around every point still outside. Runs in O(n) and
    /// stays within a few percent of the true minimal sphere, but is not
    /// globally minimal.
    pub fn from_points(points: &[Point3<f32>]) -> Result<Sphere, EmptyPointSetError> {
        let Some(&first) = points.first() else {
            return Err(EmptyPointSetError);
        };

        let mut minimums = [first; 3];
        let mut maximums = [first; 3];
        for &point in points {
            for axis in 0..3 {
                if point[axis] < minimums[axis][axis] {
                    minimums[axis] = point;
                }
                if point[axis] > maximums[axis][axis] {
                    maximums[axis] = point;
                }
            }
        }

        let mut best_axis = 0;
        let mut best_distance2 = 0.0;
        for axis in 0..3 {
            let distance2 = minimums[axis].distance2(maximums[axis]);
            if distance2 > best_distance2 {
                best_distance2 = distance2;
                best_axis = axis;
            }
        }

        let mut center = minimums[best_axis].midpoint(maximums[best_axis]);
        let mut radius = best_distance2.sqrt() * 0.5;
        let mut radius2 = radius * radius;

        for &point in points {
            let distance2 = center.distance2(point);
            if distance2 > radius2 {
                let distance = distance2.sqrt();
                let grown_radius = (radius + distance) * 0.5;
                center += (point - center) * ((grown_radius - radius) / distance);
                radius = grown_radius;
                radius2 = radius * radius;
            }
        }

        Ok(Sphere::new(center, radius))
    }

    /// Get the center of the sphere.
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Get the radius of the sphere.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Classify a point against the sphere, with a [`COINCIDENCE_EPSILON`]
    /// band around the surface to absorb float jitter.
    pub fn classify_point(&self, point: Point3<f32>) -> ContainmentClassification {
        let distance2 = self.center.distance2(point);
        let radius2 = self.radius * self.radius;

        if distance2 > radius2 + COINCIDENCE_EPSILON {
            ContainmentClassification::Outside
        } else if distance2 < radius2 - COINCIDENCE_EPSILON {
            ContainmentClassification::Inside
        } else {
            ContainmentClassification::Overlapping
        }
    }

    /// Classify another sphere against this one.
    ///
    /// `Inside` means the other sphere is fully contained in this one.
    /// Coincident spheres of equal radius classify as `Overlapping`.
    pub fn classify_sphere(&self, other: &Sphere) -> ContainmentClassification {
        let distance2 = self.center.distance2(other.center);
        let span = self.radius + other.radius;

        if distance2 > span * span + COINCIDENCE_EPSILON {
            return ContainmentClassification::Outside;
        }

        if distance2 < COINCIDENCE_EPSILON && (self.radius - other.radius).abs() <= COINCIDENCE_EPSILON {
            return ContainmentClassification::Overlapping;
        }

        let distance = distance2.sqrt();
        if distance + other.radius <= self.radius {
            return ContainmentClassification::Inside;
        }

        ContainmentClassification::Overlapping
    }

    /// Check if this sphere intersects with an AABB.
    ///
    /// This is an intentionally inexact, conservative test: the box is
    /// expanded by the radius on each axis and the sphere center is tested
    /// for containment, which treats the sphere as its bounding cube and
    /// reports extra intersections near box corners.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.expanded(self.radius).contains_point(self.center)
    }

    /// Check if this sphere intersects with an oriented box.
    ///
    /// Same conservative bounding-cube approximation as
    /// [`intersects_aabb`](Self::intersects_aabb), applied in the box's
    /// local frame.
    pub fn intersects_obb(&self, obb: &OrientedBox) -> bool {
        let local_center = obb.rotation().transpose() * (self.center - obb.center());
        let extent = obb.extent();

        local_center.x.abs() <= extent.x + self.radius
            && local_center.y.abs() <= extent.y + self.radius
            && local_center.z.abs() <= extent.z + self.radius
    }

    /// Sphere-against-line-segment overlap classification.
    ///
    /// Not supported: the original engine never implemented this query.
    /// Asserts in debug builds and always returns
    /// [`ContainmentClassification::Overlapping`].
    pub fn classify_line_segment(&self, _segment: &LineSegment) -> ContainmentClassification {
        debug_assert!(false, "sphere-segment overlap classification is not supported");
        ContainmentClassification::Overlapping
    }

    /// Sphere-against-triangle overlap classification.
    ///
    /// Not supported: the original engine never implemented this query.
    /// Asserts in debug builds and always returns
    /// [`ContainmentClassification::Overlapping`].
    pub fn classify_triangle(&self, _triangle: &Triangle) -> ContainmentClassification {
        debug_assert!(false, "sphere-triangle overlap classification is not supported");
        ContainmentClassification::Overlapping
    }

    /// Cast a line segment against the sphere.
    ///
    /// Prefers the entry intersection; if the entry lies behind the segment
    /// start the exit intersection is used instead, so a segment starting
    /// inside the sphere hits the far surface. Zero-length segments never
    /// hit.
    pub fn cast_segment(&self, segment: &LineSegment, result: &mut CastResult) -> bool {
        if segment.length() == 0.0 {
            return false;
        }

        let to_center = self.center - segment.p0();
        let closest = to_center.dot(segment.direction());
        let discriminant = self.radius * self.radius - (to_center.magnitude2() - closest * closest);
        if discriminant < 0.0 {
            return false;
        }

        let offset = discriminant.sqrt();
        let entry = (closest - offset) / segment.length();
        let exit = (closest + offset) / segment.length();

        let fraction = if entry >= 0.0 {
            entry
        } else if exit >= 0.0 {
            exit
        } else {
            return false;
        };
        if fraction > 1.0 {
            return false;
        }

        let point = segment.point_at(fraction);
        let surface_offset = point - self.center;
        // A degenerate hit through the exact center has no defined surface
        // normal; report against the segment direction.
        let normal = match surface_offset.magnitude2() > 0.0 {
            true => surface_offset.normalize(),
            false => -segment.direction(),
        };

        result.consider_hit(fraction, normal, Some(point))
    }

    /// Expand the sphere to include a point.
    pub fn expand(&mut self, point: Point3<f32>) {
        let distance = self.center.distance(point);
        if distance > self.radius {
            self.radius = distance;
        }
    }

    /// Returns the smallest sphere enclosing this sphere and another.
    ///
    /// A zero-radius other sphere and a sphere already contained in this
    /// one both leave the result unchanged; a sphere containing this one is
    /// returned as-is; otherwise the result is recentered along the
    /// connecting line.
    pub fn merge(&self, other: &Sphere) -> Sphere {
        if other.radius == 0.0 {
            return *self;
        }

        let center_difference = other.center - self.center;
        let distance2 = center_difference.magnitude2();
        if distance2 < GEOMETRIC_EPSILON * GEOMETRIC_EPSILON {
            return Sphere::new(self.center, self.radius.max(other.radius));
        }

        let distance = distance2.sqrt();
        let radius = (distance + self.radius + other.radius) * 0.5;
        if radius < self.radius {
            return *self;
        }
        if radius < other.radius {
            return *other;
        }

        let center = self.center + center_difference * ((radius - self.radius) / distance);
        Sphere::new(center, radius)
    }
}
