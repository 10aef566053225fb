use cgmath::{InnerSpace, Point3, Vector3, Zero};

/// A line segment between two points.
///
/// The difference vector, normalized direction, and length are cached and
/// recomputed whenever an endpoint is set. A zero-length segment has a zero
/// direction vector; casts against such a segment report no hit.
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    p0: Point3<f32>,
    p1: Point3<f32>,
    delta: Vector3<f32>,
    direction: Vector3<f32>,
    length: f32,
}

impl LineSegment {
    /// Create a new line segment from two endpoints.
    pub fn new(p0: Point3<f32>, p1: Point3<f32>) -> Self {
        let mut segment = LineSegment {
            p0,
            p1,
            delta: Vector3::zero(),
            direction: Vector3::zero(),
            length: 0.0,
        };
        segment.recompute();
        segment
    }

    fn recompute(&mut self) {
        self.delta = self.p1 - self.p0;
        self.length = self.delta.magnitude();
        self.direction = match self.length > 0.0 {
            true => self.delta / self.length,
            false => Vector3::zero(),
        };
    }

    /// Set both endpoints of the segment.
    pub fn set_points(&mut self, p0: Point3<f32>, p1: Point3<f32>) {
        self.p0 = p0;
        self.p1 = p1;
        self.recompute();
    }

    /// Set the start point of the segment.
    pub fn set_p0(&mut self, p0: Point3<f32>) {
        self.p0 = p0;
        self.recompute();
    }

    /// Set the end point of the segment.
    pub fn set_p1(&mut self, p1: Point3<f32>) {
        self.p1 = p1;
        self.recompute();
    }

    /// Get the start point of the segment.
    pub fn p0(&self) -> Point3<f32> {
        self.p0
    }

    /// Get the end point of the segment.
    pub fn p1(&self) -> Point3<f32> {
        self.p1
    }

    /// Get the difference vector from start to end.
    pub fn delta(&self) -> Vector3<f32> {
        self.delta
    }

    /// Get the normalized direction of the segment.
    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    /// Get the length of the segment.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Get the point at the given fraction along the segment.
    pub fn point_at(&self, fraction: f32) -> Point3<f32> {
        self.p0 + self.delta * fraction
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3, Zero, assert_relative_eq};

    use crate::LineSegment;

    #[test]
    fn test_new() {
        let segment = LineSegment::new(Point3::new(1.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));

        assert_eq!(segment.delta(), Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(segment.direction(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(segment.length(), 4.0);
    }

    #[test]
    fn test_set_endpoint_recomputes() {
        let mut segment = LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        segment.set_p1(Point3::new(0.0, 3.0, 0.0));

        assert_eq!(segment.delta(), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(segment.direction(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(segment.length(), 3.0);

        segment.set_p0(Point3::new(0.0, 1.0, 0.0));
        assert_eq!(segment.length(), 2.0);
    }

    #[test]
    fn test_zero_length_segment() {
        let segment = LineSegment::new(Point3::new(1.0, 2.0, 3.0), Point3::new(1.0, 2.0, 3.0));

        assert_eq!(segment.length(), 0.0);
        assert_eq!(segment.direction(), Vector3::zero());
    }

    #[test]
    fn test_point_at() {
        let segment = LineSegment::new(Point3::new(-5.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));

        assert_relative_eq!(segment.point_at(0.0), Point3::new(-5.0, 0.0, 0.0));
        assert_relative_eq!(segment.point_at(0.4), Point3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(segment.point_at(1.0), Point3::new(5.0, 0.0, 0.0));
    }
}
