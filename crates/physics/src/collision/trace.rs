//! Trace queries, shapes, and results for collision probes.
//!
//! Traces move a shape from a start position to an end position and report
//! the first blocking surface encountered along the way.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// Shape swept by a trace.
///
/// The traversal engine only needs two probe shapes:
///
/// - **Sphere**: a small ball swept along the path. Used for obstacle and
///   clearance sweeps so that grazing contacts register.
/// - **Point**: an infinitesimal ray. Used for landing checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TraceShape {
    /// A sphere of the given radius, centered on the trace path.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },

    /// A single point (straight-line ray).
    Point,
}

impl TraceShape {
    /// Get the effective radius of this shape.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Sphere { radius } => *radius,
            Self::Point => 0.0,
        }
    }

    /// Check if this is a point trace (raycast).
    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self, Self::Point)
    }
}

/// A single immutable trace request.
///
/// Built fresh for every probe. Carries everything the scene needs to answer:
/// where to sweep, what shape to sweep, which contents to consider, and
/// which brushes to ignore (the querying character's own body).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceQuery {
    /// Sweep origin.
    pub start: Vec3,

    /// Sweep destination.
    pub end: Vec3,

    /// Shape moved along the path.
    pub shape: TraceShape,

    /// Content flags to collide with.
    pub mask: ContentFlags,

    /// Brush ids excluded from the query (self-exclusion).
    pub exclude: Vec<u32>,
}

impl TraceQuery {
    /// Build a sphere sweep query.
    pub fn sphere(start: Vec3, end: Vec3, radius: f32, mask: ContentFlags) -> Self {
        Self {
            start,
            end,
            shape: TraceShape::Sphere { radius },
            mask,
            exclude: Vec::new(),
        }
    }

    /// Build a straight-line ray query.
    pub fn ray(start: Vec3, end: Vec3, mask: ContentFlags) -> Self {
        Self {
            start,
            end,
            shape: TraceShape::Point,
            mask,
            exclude: Vec::new(),
        }
    }

    /// Exclude the given brush ids from the query.
    pub fn excluding(mut self, ids: &[u32]) -> Self {
        self.exclude.extend_from_slice(ids);
        self
    }

    /// Check whether a brush id is excluded.
    #[inline]
    pub fn excludes(&self, id: u32) -> bool {
        self.exclude.contains(&id)
    }
}

/// Result of a collision trace through the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    /// How far along the trace path we got before hitting something.
    ///
    /// - `1.0` = traveled the full distance (no collision)
    /// - `0.0` = hit something immediately at start
    pub fraction: f32,

    /// Position of the probe center when the trace stopped.
    pub end_position: Vec3,

    /// Point on the hit surface, if a hit occurred.
    ///
    /// For sphere sweeps this is the contact point on the surface; for rays
    /// it equals `end_position`.
    pub impact_point: Option<Vec3>,

    /// Surface normal at the impact point. `None` if no collision occurred.
    pub hit_normal: Option<Vec3>,

    /// Content flags of what was hit.
    pub hit_contents: ContentFlags,

    /// Whether the trace started inside solid geometry.
    pub started_in_solid: bool,
}

impl Default for TraceResult {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO)
    }
}

impl TraceResult {
    /// Create a trace result indicating no collision occurred.
    pub fn no_hit(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            impact_point: None,
            hit_normal: None,
            hit_contents: ContentFlags::EMPTY,
            started_in_solid: false,
        }
    }

    /// Check if this trace hit something.
    #[inline]
    pub fn hit_something(&self) -> bool {
        self.fraction < 1.0
    }

    /// Get the impact point, falling back to the end position.
    #[inline]
    pub fn impact_or_end(&self) -> Vec3 {
        self.impact_point.unwrap_or(self.end_position)
    }
}

/// A scene that can answer trace queries.
///
/// The traversal engine is written against this seam so it can run against
/// the real [`CollisionWorld`](super::CollisionWorld) or any test scene.
pub trait SceneQuery {
    /// Trace a query through the scene, returning the first blocking hit.
    fn trace(&self, query: &TraceQuery) -> TraceResult;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn trace(&self, query: &TraceQuery) -> TraceResult {
        (**self).trace(query)
    }
}
