use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector3, Vector4};

use crate::{AABB, ContainmentClassification, IntersectionClassification, OrientedBox, Plane, Sphere, Triangle};

/// A view frustum of six inward-facing planes, used for culling.
///
/// All composite queries are conservative: a shape poking past two planes
/// near a frustum corner can classify as `Overlapping` even when it lies
/// entirely outside. Callers culling with these results only ever draw too
/// much, never too little.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six inward-facing planes.
    pub fn from_planes(planes: [Plane; 6]) -> Self {
        Frustum { planes }
    }

    /// Extracts the frustum planes from a view-projection matrix using the
    /// Gribb-Hartmann method, in the order left, right, bottom, top, near,
    /// far.
    pub fn from_matrix(matrix: Matrix4<f32>) -> Self {
        let planes = [
            clip_plane(matrix.row(3) + matrix.row(0)),
            clip_plane(matrix.row(3) - matrix.row(0)),
            clip_plane(matrix.row(3) + matrix.row(1)),
            clip_plane(matrix.row(3) - matrix.row(1)),
            clip_plane(matrix.row(3) + matrix.row(2)),
            clip_plane(matrix.row(3) - matrix.row(2)),
        ];

        Frustum { planes }
    }

    /// Get the planes of the frustum.
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// Combines per-plane classifications: any fully excluding plane
    /// short-circuits `Outside`, all satisfied planes give `Inside`. Bits
    /// already set in `planes_inside` skip their plane; bits are set for
    /// planes newly proven satisfied, so a caller re-testing a
    /// frame-coherent shape can carry the mask over.
    fn classify_with<F>(&self, planes_inside: &mut u8, classify: F) -> ContainmentClassification
    where
        F: Fn(&Plane) -> IntersectionClassification,
    {
        let mut all_inside = true;

        for (index, plane) in self.planes.iter().enumerate() {
            let bit = 1 << index;
            if *planes_inside & bit != 0 {
                continue;
            }

            match classify(plane) {
                IntersectionClassification::Back => return ContainmentClassification::Outside,
                IntersectionClassification::Front => *planes_inside |= bit,
                IntersectionClassification::Intersecting => all_inside = false,
            }
        }

        match all_inside {
            true => ContainmentClassification::Inside,
            false => ContainmentClassification::Overlapping,
        }
    }

    /// Classify a point against the frustum.
    pub fn classify_point(&self, point: Point3<f32>) -> ContainmentClassification {
        self.classify_with(&mut 0, |plane| plane.classify_point(point))
    }

    /// Classify a sphere against the frustum.
    pub fn classify_sphere(&self, sphere: &Sphere) -> ContainmentClassification {
        self.classify_with(&mut 0, |plane| plane.classify_sphere(sphere))
    }

    /// Classify a sphere against the frustum, carrying a per-plane mask
    /// across calls.
    pub fn classify_sphere_cached(&self, sphere: &Sphere, planes_inside: &mut u8) -> ContainmentClassification {
        self.classify_with(planes_inside, |plane| plane.classify_sphere(sphere))
    }

    /// Classify an AABB against the frustum.
    pub fn classify_aabb(&self, aabb: &AABB) -> ContainmentClassification {
        self.classify_with(&mut 0, |plane| plane.classify_aabb(aabb))
    }

    /// Classify an AABB against the frustum, carrying a per-plane mask
    /// across calls.
    pub fn classify_aabb_cached(&self, aabb: &AABB, planes_inside: &mut u8) -> ContainmentClassification {
        self.classify_with(planes_inside, |plane| plane.classify_aabb(aabb))
    }

    /// Classify an oriented box against the frustum.
    pub fn classify_obb(&self, obb: &OrientedBox) -> ContainmentClassification {
        self.classify_with(&mut 0, |plane| plane.classify_obb(obb))
    }

    /// Classify a triangle against the frustum.
    pub fn classify_triangle(&self, triangle: &Triangle) -> ContainmentClassification {
        self.classify_with(&mut 0, |plane| plane.classify_triangle(triangle))
    }

    /// Checks if a point is at least partially inside the frustum.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.classify_point(point) != ContainmentClassification::Outside
    }

    /// Test if the axis aligned bounding box is partially or fully inside
    /// the frustum.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.classify_aabb(aabb) != ContainmentClassification::Outside
    }

    /// Test if a sphere intersects with or is contained within the
    /// frustum.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.classify_sphere(sphere) != ContainmentClassification::Outside
    }
}

/// Builds a plane from a clip-space row combination `ax + by + cz + d >= 0`,
/// normalized to a unit normal. A null row falls back to the degenerate
/// default plane.
fn clip_plane(row: Vector4<f32>) -> Plane {
    let normal = row.truncate();
    let magnitude = normal.magnitude();
    if magnitude == 0.0 {
        return Plane::new(Vector3::unit_z(), 0.0);
    }

    Plane::new(normal / magnitude, -row.w / magnitude)
}
