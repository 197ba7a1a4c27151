//! Collision queries for the traversal engine.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: brush soup answering sweep and ray queries
//! - [`TraceQuery`]: one immutable probe request
//! - [`TraceResult`]: what the probe hit, if anything
//! - [`SceneQuery`]: the seam the traversal engine queries through
//!
//! Traces sweep a sphere (or cast a ray) from a start to an end point and
//! report the first blocking surface: path fraction, impact point, and
//! surface normal.

mod flags;
mod trace;
mod world;

pub use flags::ContentFlags;
pub use trace::{SceneQuery, TraceQuery, TraceResult, TraceShape};
pub use world::{CollisionBrush, CollisionWorld};
