pub mod flappy_scene;
pub mod game_common;

use flappy::World;
use rand::Rng;
use ratatui::Frame;

/// Main UI drawing function.
pub fn draw_ui<R: Rng>(frame: &mut Frame, world: &World<R>) {
    let size = frame.size();
    flappy_scene::render_flappy(frame, size, world);
}
