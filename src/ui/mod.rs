//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* simulation state and turns it into pixels
//! on the terminal. No simulation state is mutated here.

pub mod gallery;
pub mod layout;
pub mod narrative;
pub mod scrubber;
pub mod theme;
