use cgmath::{Array, EuclideanSpace, InnerSpace, Point3, Vector3, Zero};

use crate::cast::{AlignedCast, BOX_NORMALS, CastResult, cast_aligned_box};
use crate::{COINCIDENCE_EPSILON, GEOMETRIC_EPSILON, LineSegment, Plane};

/// An axis aligned bounding box, stored as a center point and half-extents.
#[derive(Debug, Clone, Copy)]
pub struct AABB {
    center: Point3<f32>,
    extent: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB from a center point and half-extents. Negative
    /// extent components are flipped positive.
    pub fn new(center: Point3<f32>, extent: Vector3<f32>) -> Self {
        AABB {
            center,
            extent: extent.map(f32::abs),
        }
    }

    /// Create an AABB from two corner points.
    pub fn from_min_max(point_0: Point3<f32>, point_1: Point3<f32>) -> Self {
        MinMaxAABB::new(point_0, point_1).into()
    }

    /// Calculates the axis aligned bounding box of a set of points.
    ///
    /// An empty set produces the inverted
    /// [uninitialized](MinMaxAABB::uninitialized) box.
    pub fn from_points<T>(points: T) -> Self
    where
        T: IntoIterator<Item = Point3<f32>>,
    {
        MinMaxAABB::from_points(points).into()
    }

    /// Get the center of the AABB.
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Get the half-extents of the AABB.
    pub fn extent(&self) -> Vector3<f32> {
        self.extent
    }

    /// Check if a point is inside the AABB. The boundary counts as inside.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let offset = point - self.center;
        offset.x.abs() <= self.extent.x && offset.y.abs() <= self.extent.y && offset.z.abs() <= self.extent.z
    }

    /// Classify a point against the AABB, treating positions within
    /// [`COINCIDENCE_EPSILON`] of a face as on the boundary.
    pub fn classify_point(&self, point: Point3<f32>) -> ContainmentClassification {
        let offset = point - self.center;
        let mut on_boundary = false;

        for axis in 0..3 {
            let distance = offset[axis].abs();
            if distance > self.extent[axis] + COINCIDENCE_EPSILON {
                return ContainmentClassification::Outside;
            }
            if distance > self.extent[axis] - COINCIDENCE_EPSILON {
                on_boundary = true;
            }
        }

        match on_boundary {
            true => ContainmentClassification::Overlapping,
            false => ContainmentClassification::Inside,
        }
    }

    /// Classify another AABB against this one.
    ///
    /// `Inside` means the other box is fully contained in this one.
    /// Separation is strict while containment is inclusive, so a box
    /// touching a face from the outside overlaps and a box touching from
    /// the inside is still contained.
    pub fn classify_aabb(&self, other: &AABB) -> ContainmentClassification {
        let offset = other.center - self.center;
        let mut contained = true;

        for axis in 0..3 {
            let distance = offset[axis].abs();
            if distance > self.extent[axis] + other.extent[axis] {
                return ContainmentClassification::Outside;
            }
            if distance + other.extent[axis] > self.extent[axis] {
                contained = false;
            }
        }

        match contained {
            true => ContainmentClassification::Inside,
            false => ContainmentClassification::Overlapping,
        }
    }

    /// Check if this AABB intersects with another AABB.
    pub fn intersects_aabb(&self, other: &AABB) -> bool {
        let offset = other.center - self.center;
        offset.x.abs() <= self.extent.x + other.extent.x
            && offset.y.abs() <= self.extent.y + other.extent.y
            && offset.z.abs() <= self.extent.z + other.extent.z
    }

    /// Creates a new AABB that is expanded by a given margin in all
    /// directions.
    pub fn expanded(&self, margin: f32) -> Self {
        AABB {
            center: self.center,
            extent: self.extent + Vector3::from_value(margin),
        }
    }

    /// Merge this AABB with another AABB.
    pub fn merge(&self, other: &AABB) -> AABB {
        let mut bounds = MinMaxAABB::from(*self);
        let other = MinMaxAABB::from(*other);
        bounds.expand(other.min());
        bounds.expand(other.max());
        bounds.into()
    }

    /// Cast a line segment against the box.
    ///
    /// A segment starting inside the box raises
    /// [`start_bad`](CastResult::start_bad) with fraction zero. Otherwise
    /// the slab test finds the entry face and the hit is reported with that
    /// face's outward normal.
    pub fn cast_segment(&self, segment: &LineSegment, result: &mut CastResult) -> bool {
        match cast_aligned_box(self.extent, segment.p0() - self.center, segment.delta()) {
            AlignedCast::Miss => false,
            AlignedCast::StartInside => {
                result.mark_start_bad(None);
                true
            }
            AlignedCast::Hit { fraction, axis, side } => {
                result.consider_hit(fraction, BOX_NORMALS[axis][side], Some(segment.point_at(fraction)))
            }
        }
    }

    /// Sweep the box along a movement vector against a static plane.
    ///
    /// A box already straddling the plane within its projected extent
    /// raises [`start_bad`](CastResult::start_bad) immediately. The contact
    /// point offsets the swept center by the extent projected onto the
    /// movement direction, which approximates the touching face point.
    pub fn sweep_plane(&self, movement: Vector3<f32>, plane: &Plane, result: &mut CastResult) -> bool {
        let normal = plane.normal();
        let radius = self.extent.x * normal.x.abs() + self.extent.y * normal.y.abs() + self.extent.z * normal.z.abs();

        let distance = plane.signed_distance_to_point(self.center);
        if distance.abs() <= radius {
            result.mark_start_bad(Some(normal));
            return true;
        }

        let velocity = normal.dot(movement);
        let fraction = if distance > radius {
            if velocity >= 0.0 {
                return false;
            }
            (radius - distance) / velocity
        } else {
            if velocity <= 0.0 {
                return false;
            }
            (-radius - distance) / velocity
        };

        if fraction > 1.0 {
            return false;
        }

        let contact_point = match movement.magnitude2() > 0.0 {
            true => {
                let direction = movement.normalize();
                self.center + movement * fraction + direction * self.extent.dot(direction)
            }
            false => self.center,
        };
        result.consider_hit(fraction, normal, Some(contact_point))
    }

    /// Sweep the box against another moving box.
    ///
    /// Runs an interval-separation test per coordinate axis on the relative
    /// motion. An axis separated at the start of the move must re-enter
    /// overlap before its end or there is no collision; the last axis to
    /// come into overlap is the true contact axis and fixes the normal,
    /// since contact requires all three axes to overlap simultaneously. If
    /// no axis is separated at the start the boxes already overlap and
    /// [`start_bad`](CastResult::start_bad) is raised. Contact points are
    /// not computed for box-box sweeps.
    pub fn sweep_aabb(
        &self,
        movement: Vector3<f32>,
        other: &AABB,
        other_movement: Vector3<f32>,
        result: &mut CastResult,
    ) -> bool {
        let relative_center = other.center - self.center;
        let relative_movement = other_movement - movement;

        let mut separated = false;
        let mut best_fraction = -1.0_f32;
        let mut normal = Vector3::zero();

        for axis in 0..3 {
            let span = self.extent[axis] + other.extent[axis];
            let start = relative_center[axis];
            let end = start + relative_movement[axis];

            if start > span + GEOMETRIC_EPSILON {
                separated = true;
                if end > span {
                    // Never comes into overlap on this axis.
                    return false;
                }
                let fraction = (start - span) / (start - end);
                if fraction > best_fraction {
                    best_fraction = fraction;
                    normal = BOX_NORMALS[axis][1];
                }
            } else if start < -(span + GEOMETRIC_EPSILON) {
                separated = true;
                if end < -span {
                    return false;
                }
                let fraction = (start + span) / (start - end);
                if fraction > best_fraction {
                    best_fraction = fraction;
                    normal = BOX_NORMALS[axis][0];
                }
            }
        }

        if !separated {
            result.mark_start_bad(None);
            return true;
        }

        result.consider_hit(best_fraction, normal, None)
    }
}

impl From<MinMaxAABB> for AABB {
    fn from(bounds: MinMaxAABB) -> Self {
        AABB {
            center: bounds.min.midpoint(bounds.max),
            extent: (bounds.max - bounds.min) * 0.5,
        }
    }
}

/// An axis aligned bounding box stored as min/max corners.
#[derive(Debug, Clone, Copy)]
pub struct MinMaxAABB {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl MinMaxAABB {
    /// Create a new box from two points, sorted componentwise so that
    /// `max >= min` holds.
    pub fn new(point_0: Point3<f32>, point_1: Point3<f32>) -> Self {
        MinMaxAABB {
            min: point_0.zip(point_1, f32::min),
            max: point_0.zip(point_1, f32::max),
        }
    }

    /// Calculates the bounding box of a set of points with a single
    /// componentwise min/max pass.
    ///
    /// An empty set produces the [uninitialized](Self::uninitialized) box.
    pub fn from_points<T>(points: T) -> Self
    where
        T: IntoIterator<Item = Point3<f32>>,
    {
        let (min, max) = points.into_iter().fold(
            (Point3::from_value(f32::MAX), Point3::from_value(-f32::MAX)),
            |(min, max), position| (min.zip(position, f32::min), max.zip(position, f32::max)),
        );

        MinMaxAABB { min, max }
    }

    /// Creates an inverted box without a meaningful value, used as the
    /// starting accumulator for point folds.
    pub fn uninitialized() -> Self {
        MinMaxAABB {
            min: Point3::from_value(f32::MAX),
            max: Point3::from_value(-f32::MAX),
        }
    }

    /// Get the min corner of the box.
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// Get the max corner of the box.
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Expand the box to include a point.
    pub fn expand(&mut self, point: Point3<f32>) {
        self.min = self.min.zip(point, f32::min);
        self.max = self.max.zip(point, f32::max);
    }
}

impl From<AABB> for MinMaxAABB {
    fn from(aabb: AABB) -> Self {
        MinMaxAABB {
            min: aabb.center - aabb.extent,
            max: aabb.center + aabb.extent,
        }
    }
}

/// Classifies a shape against a containing volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainmentClassification {
    /// Entirely inside the volume.
    Inside,
    /// Entirely outside the volume.
    Outside,
    /// Partially inside the volume.
    Overlapping,
}
