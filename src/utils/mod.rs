//! # Utilities Module
//!
//! Angle math, distance metrics and flood-fill reachability shared by the
//! generator, the renderer and the battle resolver.

pub mod math;
pub mod reachability;

pub use math::*;
pub use reachability::*;
