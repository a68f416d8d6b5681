//! Flappy Bird simulation.
//!
//! A side-scrolling arcade run: the bird hovers until the first flap, then
//! falls under gravity while pipes scroll in from the right. Passing a pipe
//! scores a point and spawns the next one; touching a pipe or leaving the
//! screen ends the run. Everything is frame-stepped and single-threaded.

pub mod autopilot;
pub mod bird;
pub mod logic;
pub mod pipe;
pub mod types;

pub use autopilot::Autopilot;
pub use bird::{Bird, BirdPose};
pub use logic::*;
pub use pipe::Pipe;
pub use types::*;
