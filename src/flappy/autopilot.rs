//! Heuristic pilot used by the headless simulator.
//!
//! It keeps the bird's lower edge a little above the bottom lip of the next
//! gap: flap whenever the bird has sunk past that line and is no longer
//! rising. A jump arc climbs about 44 px, so the bird bobs inside the gap.

use super::logic::FlappyInput;
use super::types::World;
use crate::constants::{HEIGHT, PIPE_GAP};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Clearance kept between the bird's lower edge and the gap's bottom lip.
    pub floor_margin: f64,
    /// Never flap above this height.
    pub ceiling: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            floor_margin: 30.0,
            ceiling: 60.0,
        }
    }
}

impl Autopilot {
    /// Y the bird's top edge should stay above.
    pub fn flap_line<R: Rng>(&self, world: &World<R>) -> f64 {
        let (_, bird_h) = world.assets().bird_size();
        match world.next_pipe() {
            Some(pipe) => pipe.gap_center + PIPE_GAP - bird_h as f64 - self.floor_margin,
            None => HEIGHT as f64 / 2.0,
        }
    }

    pub fn decide<R: Rng>(&self, world: &World<R>) -> Option<FlappyInput> {
        if !world.is_running() {
            return None;
        }
        let bird = &world.bird;
        if !bird.started {
            return Some(FlappyInput::Flap);
        }
        let sinking = bird.displacement >= 0.0;
        if sinking && bird.y > self.flap_line(world) && bird.y > self.ceiling {
            Some(FlappyInput::Flap)
        } else {
            None
        }
    }
}
