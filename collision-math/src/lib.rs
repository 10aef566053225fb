//! A pure, allocation-free collision math library.
//!
//! Classifies and resolves intersections between points, line segments,
//! planes, axis-aligned and oriented boxes, spheres, triangles, and 6-plane
//! frusta. Static queries return a classification, swept queries (segment
//! casts and moving-box sweeps) accumulate the earliest time of impact into a
//! caller-owned [`CastResult`].
//!
//! All types are small `Copy` values and all queries are free of allocation
//! and shared state, so they can be called concurrently on independent
//! inputs. Broad-phase pair selection is the caller's job; this crate only
//! answers how two given shapes relate.
#![warn(missing_docs)]

mod aabb;
mod aligned_plane;
mod cast;
mod frustum;
mod line_segment;
mod obb;
mod plane;
mod sphere;
mod triangle;

pub use aabb::{AABB, ContainmentClassification, MinMaxAABB};
pub use aligned_plane::{AlignedPlane, Axis};
pub use cast::CastResult;
pub use frustum::Frustum;
pub use line_segment::LineSegment;
pub use obb::OrientedBox;
pub use plane::{IntersectionClassification, Plane};
pub use sphere::{EmptyPointSetError, Sphere};
pub use triangle::Triangle;

/// Tolerance used when classifying a position against a plane or a surface.
///
/// This is a world-scale tolerance, not a machine epsilon: two positions
/// closer than this along a normal are treated as coincident so that jitter
/// from chained float arithmetic does not flip a classification.
pub const COINCIDENCE_EPSILON: f32 = 2e-4;

/// General tolerance for swept separation tests and degeneracy detection
/// (colinear construction points, near-parallel edge pairs).
pub const GEOMETRIC_EPSILON: f32 = 1e-4;
