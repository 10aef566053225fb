use cgmath::{InnerSpace, Matrix, Matrix3, Point3, SquareMatrix, Vector3};

use crate::cast::{AlignedCast, BOX_NORMALS, CastResult, cast_aligned_box};
use crate::{AABB, GEOMETRIC_EPSILON, LineSegment, Plane};

/// An oriented bounding box.
///
/// The rotation matrix is assumed orthonormal; its columns are the box's
/// local axes expressed in world space.
#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    center: Point3<f32>,
    extent: Vector3<f32>,
    rotation: Matrix3<f32>,
}

impl OrientedBox {
    /// Create a new oriented box from a center, half-extents, and an
    /// orthonormal rotation. Negative extent components are flipped
    /// positive.
    pub fn new(center: Point3<f32>, extent: Vector3<f32>, rotation: Matrix3<f32>) -> Self {
        OrientedBox {
            center,
            extent: extent.map(f32::abs),
            rotation,
        }
    }

    /// Create an axis aligned oriented box from an AABB.
    pub fn from_aabb(aabb: &AABB) -> Self {
        OrientedBox {
            center: aabb.center(),
            extent: aabb.extent(),
            rotation: Matrix3::identity(),
        }
    }

    /// Get the center of the box.
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Get the half-extents of the box.
    pub fn extent(&self) -> Vector3<f32> {
        self.extent
    }

    /// Get the rotation basis of the box.
    pub fn rotation(&self) -> Matrix3<f32> {
        self.rotation
    }

    /// Check if a point is inside the box. The boundary counts as inside.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        let local = self.rotation.transpose() * (point - self.center);
        local.x.abs() <= self.extent.x && local.y.abs() <= self.extent.y && local.z.abs() <= self.extent.z
    }

    /// Check if this box intersects with another oriented box, using the
    /// full 15-axis separating-axis test (3 face normals per box plus the
    /// 9 edge-pair cross products).
    pub fn intersects_obb(&self, other: &OrientedBox) -> bool {
        let own_axes = [self.rotation.x, self.rotation.y, self.rotation.z];
        let other_axes = [other.rotation.x, other.rotation.y, other.rotation.z];

        // Rotation expressing the other box in this box's frame. The
        // epsilon on the absolute values keeps near-parallel edge pairs
        // from producing an arithmetically null separating axis.
        let mut rotation = [[0.0_f32; 3]; 3];
        let mut rotation_abs = [[0.0_f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                rotation[i][j] = own_axes[i].dot(other_axes[j]);
                rotation_abs[i][j] = rotation[i][j].abs() + GEOMETRIC_EPSILON;
            }
        }

        let offset = other.center - self.center;
        let translation = [offset.dot(own_axes[0]), offset.dot(own_axes[1]), offset.dot(own_axes[2])];

        // This box's face normals.
        for i in 0..3 {
            let own_radius = self.extent[i];
            let other_radius = other.extent[0] * rotation_abs[i][0]
                + other.extent[1] * rotation_abs[i][1]
                + other.extent[2] * rotation_abs[i][2];
            if translation[i].abs() > own_radius + other_radius {
                return false;
            }
        }

        // The other box's face normals.
        for j in 0..3 {
            let own_radius = self.extent[0] * rotation_abs[0][j]
                + self.extent[1] * rotation_abs[1][j]
                + self.extent[2] * rotation_abs[2][j];
            let other_radius = other.extent[j];
            let distance = translation[0] * rotation[0][j] + translation[1] * rotation[1][j] + translation[2] * rotation[2][j];
            if distance.abs() > own_radius + other_radius {
                return false;
            }
        }

        // Cross products of edge pairs.
        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;
            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;

                let own_radius = self.extent[i1] * rotation_abs[i2][j] + self.extent[i2] * rotation_abs[i1][j];
                let other_radius = other.extent[j1] * rotation_abs[i][j2] + other.extent[j2] * rotation_abs[i][j1];
                let distance = translation[i2] * rotation[i1][j] - translation[i1] * rotation[i2][j];
                if distance.abs() > own_radius + other_radius {
                    return false;
                }
            }
        }

        true
    }

    /// Check if this box intersects with an AABB, by promoting the AABB to
    /// an identity-basis oriented box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.intersects_obb(&OrientedBox::from_aabb(aabb))
    }

    /// Cast a line segment against the box.
    ///
    /// The segment is transformed into the box frame and run through the
    /// same slab test as the axis aligned cast; the face normal is rotated
    /// back to world space. A segment starting inside the box raises
    /// [`start_bad`](CastResult::start_bad) with fraction zero.
    pub fn cast_segment(&self, segment: &LineSegment, result: &mut CastResult) -> bool {
        let inverse = self.rotation.transpose();
        let local_origin = inverse * (segment.p0() - self.center);
        let local_delta = inverse * segment.delta();

        match cast_aligned_box(self.extent, local_origin, local_delta) {
            AlignedCast::Miss => false,
            AlignedCast::StartInside => {
                result.mark_start_bad(None);
                true
            }
            AlignedCast::Hit { fraction, axis, side } => result.consider_hit(
                fraction,
                self.rotation * BOX_NORMALS[axis][side],
                Some(segment.point_at(fraction)),
            ),
        }
    }

    /// Sweep the box along a movement vector against a static plane.
    ///
    /// The extent is projected onto the plane normal through the rotation
    /// basis; otherwise identical to [`AABB::sweep_plane`], including the
    /// approximate contact point.
    pub fn sweep_plane(&self, movement: Vector3<f32>, plane: &Plane, result: &mut CastResult) -> bool {
        let normal = plane.normal();
        let radius = self.extent.x * normal.dot(self.rotation.x).abs()
            + self.extent.y * normal.dot(self.rotation.y).abs()
            + self.extent.z * normal.dot(self.rotation.z).abs();

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
                let local_direction = self.rotation.transpose() * direction;
                self.center + movement * fraction + direction * self.extent.dot(local_direction)
            }
            false => self.center,
        };
        result.consider_hit(fraction, normal, Some(contact_point))
    }
}
