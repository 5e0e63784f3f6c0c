//! Core simulation — scroll physics, geometry, synchronization, and the
//! projection to visual parameters.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Geometry arrives through [`geometry::LayoutQuery`], so everything here
//! can be driven headlessly in tests.

pub mod content;
pub mod geometry;
pub mod physics;
pub mod projection;
pub mod sync;
