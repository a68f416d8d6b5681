//! Flappy - terminal Flappy Bird.
//!
//! The simulation, sprites and collision silhouettes live here so they can
//! be driven headless by tests and the simulator binary.

pub mod assets;
pub mod build_info;
pub mod constants;
pub mod flappy;

pub use assets::{AssetBundle, AssetError};
pub use constants::*;
pub use flappy::{FlappyInput, GameOverCause, GameStatus, World};
