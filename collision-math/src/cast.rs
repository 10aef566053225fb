use cgmath::{Point3, Vector3, Zero};

/// Face normals of an axis-aligned box, indexed by axis and side.
///
/// Side 0 is the face on the positive half of the axis, side 1 the face on
/// the negative half.
pub(crate) const BOX_NORMALS: [[Vector3<f32>; 2]; 3] = [
    [Vector3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)],
    [Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, -1.0, 0.0)],
    [Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, -1.0)],
];

/// Accumulator for the earliest hit found across a sequence of swept
/// queries.
///
/// The caller creates one result per logical scan and threads it mutably
/// through any number of casts and sweeps against candidate shapes. Each
/// query writes the hit fields only when it finds a strictly smaller
/// fraction, so after the scan the result holds the first impact along the
/// motion. A result must not be shared between concurrent scans.
///
/// Once [`start_bad`](Self::start_bad) is raised the shapes already overlap
/// at the start of the motion and the scan is decided; the fraction is
/// forced to zero and no later query can improve on it.
#[derive(Debug, Clone, Copy)]
pub struct CastResult {
    fraction: f32,
    normal: Vector3<f32>,
    start_bad: bool,
    compute_contact_point: bool,
    contact_point: Option<Point3<f32>>,
}

impl CastResult {
    /// Create a new result for a fresh scan. Contact points are not
    /// computed.
    pub fn new() -> Self {
        CastResult {
            fraction: 1.0,
            normal: Vector3::zero(),
            start_bad: false,
            compute_contact_point: false,
            contact_point: None,
        }
    }

    /// Create a new result that additionally records the contact point of
    /// the best hit.
    pub fn with_contact_point() -> Self {
        CastResult {
            compute_contact_point: true,
            ..Self::new()
        }
    }

    /// Reset the result for a new scan, keeping the contact point request.
    pub fn reset(&mut self) {
        self.fraction = 1.0;
        self.normal = Vector3::zero();
        self.start_bad = false;
        self.contact_point = None;
    }

    /// The best time of impact found so far, in `[0, 1]` along the motion.
    /// Starts at 1.0.
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// The surface normal of the best hit found so far.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Whether the shapes already overlapped at the start of the motion.
    pub fn start_bad(&self) -> bool {
        self.start_bad
    }

    /// Whether contact points are recorded for accepted hits.
    pub fn computes_contact_point(&self) -> bool {
        self.compute_contact_point
    }

    /// The contact point of the best hit, if requested and available.
    pub fn contact_point(&self) -> Option<Point3<f32>> {
        self.contact_point
    }

    /// Offer a hit to the accumulator.
    ///
    /// The hit is accepted only if its fraction is strictly smaller than the
    /// best fraction found so far; on acceptance the normal is stored and,
    /// if contact points were requested, the contact point as well (queries
    /// that cannot produce one pass `None`, leaving any previous contact
    /// point untouched). Returns whether the hit was accepted.
    pub fn consider_hit(&mut self, fraction: f32, normal: Vector3<f32>, contact_point: Option<Point3<f32>>) -> bool {
        if fraction >= self.fraction {
            return false;
        }

        self.fraction = fraction;
        self.normal = normal;
        if self.compute_contact_point && contact_point.is_some() {
            self.contact_point = contact_point;
        }
        true
    }

    /// Record that the shapes already overlap at the start of the motion.
    pub(crate) fn mark_start_bad(&mut self, normal: Option<Vector3<f32>>) {
        self.start_bad = true;
        self.fraction = 0.0;
        if let Some(normal) = normal {
            self.normal = normal;
        }
    }
}

impl Default for CastResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a segment cast against a box in its own axis-aligned frame.
pub(crate) enum AlignedCast {
    Miss,
    StartInside,
    Hit { fraction: f32, axis: usize, side: usize },
}

/// Slab-based segment cast against a box centered at the origin.
///
/// `origin` is the segment start relative to the box center and `delta` the
/// segment difference vector, both already expressed in the box frame.
///
/// Each axis classifies the origin as below, within, or above its slab.
/// Within all three slabs the origin is inside the box. Otherwise every
/// non-within axis contributes the parametric distance to its entry plane
/// (or -1 when the segment runs parallel outside the slab, which guarantees
/// rejection); the entry axis is the one with the largest distance, since
/// true entry requires every slab to be satisfied. The candidate point is
/// then verified against the two remaining slabs to reject segments passing
/// beside the box.
pub(crate) fn cast_aligned_box(extent: Vector3<f32>, origin: Vector3<f32>, delta: Vector3<f32>) -> AlignedCast {
    let mut within_count = 0;
    let mut entry_fraction = -1.0_f32;
    let mut entry_axis = 0;
    let mut entry_side = 0;

    for axis in 0..3 {
        let position = origin[axis];
        let motion = delta[axis];
        let extent = extent[axis];

        if position < -extent {
            let fraction = match motion > 0.0 {
                true => (-extent - position) / motion,
                false => -1.0,
            };
            if fraction > entry_fraction {
                entry_fraction = fraction;
                entry_axis = axis;
                entry_side = 1;
            }
        } else if position > extent {
            let fraction = match motion < 0.0 {
                true => (extent - position) / motion,
                false => -1.0,
            };
            if fraction > entry_fraction {
                entry_fraction = fraction;
                entry_axis = axis;
                entry_side = 0;
            }
        } else {
            within_count += 1;
        }
    }

    if within_count == 3 {
        return AlignedCast::StartInside;
    }

    if entry_fraction < 0.0 || entry_fraction > 1.0 {
        return AlignedCast::Miss;
    }

    for axis in 0..3 {
        if axis == entry_axis {
            continue;
        }
        let position = origin[axis] + delta[axis] * entry_fraction;
        if position < -extent[axis] || position > extent[axis] {
            return AlignedCast::Miss;
        }
    }

    AlignedCast::Hit {
        fraction: entry_fraction,
        axis: entry_axis,
        side: entry_side,
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3};

    use crate::CastResult;

    #[test]
    fn test_accepts_only_strictly_closer_hits() {
        let mut result = CastResult::new();

        assert!(result.consider_hit(0.5, Vector3::new(0.0, 1.0, 0.0), None));
        assert_eq!(result.fraction(), 0.5);

        assert!(!result.consider_hit(0.5, Vector3::new(1.0, 0.0, 0.0), None));
        assert!(!result.consider_hit(0.7, Vector3::new(1.0, 0.0, 0.0), None));
        assert_eq!(result.normal(), Vector3::new(0.0, 1.0, 0.0));

        assert!(result.consider_hit(0.2, Vector3::new(1.0, 0.0, 0.0), None));
        assert_eq!(result.fraction(), 0.2);
        assert_eq!(result.normal(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_contact_point_gating() {
        let mut plain = CastResult::new();
        plain.consider_hit(0.5, Vector3::new(0.0, 1.0, 0.0), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(plain.contact_point(), None);

        let mut requested = CastResult::with_contact_point();
        requested.consider_hit(0.5, Vector3::new(0.0, 1.0, 0.0), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(requested.contact_point(), Some(Point3::new(1.0, 2.0, 3.0)));

        // A closer hit without a contact point keeps the previous one.
        requested.consider_hit(0.3, Vector3::new(1.0, 0.0, 0.0), None);
        assert_eq!(requested.contact_point(), Some(Point3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_start_bad_forces_fraction_to_zero() {
        let mut result = CastResult::new();
        result.consider_hit(0.5, Vector3::new(0.0, 1.0, 0.0), None);

        result.mark_start_bad(Some(Vector3::new(0.0, 0.0, 1.0)));
        assert!(result.start_bad());
        assert_eq!(result.fraction(), 0.0);
        assert_eq!(result.normal(), Vector3::new(0.0, 0.0, 1.0));

        // Nothing can improve on an overlapping start.
        assert!(!result.consider_hit(0.1, Vector3::new(1.0, 0.0, 0.0), None));
    }

    #[test]
    fn test_reset_keeps_contact_point_request() {
        let mut result = CastResult::with_contact_point();
        result.consider_hit(0.5, Vector3::new(0.0, 1.0, 0.0), Some(Point3::new(1.0, 2.0, 3.0)));

        result.reset();
        assert_eq!(result.fraction(), 1.0);
        assert_eq!(result.contact_point(), None);
        assert!(result.computes_contact_point());
    }
}
