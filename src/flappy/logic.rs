//! Per-tick simulation: input, physics, pipe lifecycle, collisions, scoring.

use super::types::{GameOverCause, GameStatus, TickReport, World};
use crate::constants::HEIGHT;
use rand::Rng;

/// UI-agnostic input commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyInput {
    /// Jump while running; start a new run after game over.
    Flap,
    /// Leave the game. The caller ends the process.
    Quit,
    /// Any other key.
    Other,
}

/// Apply one input command.
pub fn process_input<R: Rng>(world: &mut World<R>, input: FlappyInput) {
    match (world.status, input) {
        (GameStatus::Running, FlappyInput::Flap) => world.bird.jump(),
        (GameStatus::GameOver(_), FlappyInput::Flap) => world.restart(),
        _ => {}
    }
}

/// True while the bird is strictly inside the screen vertically.
pub fn in_vertical_bounds(y: f64, bird_height: u32) -> bool {
    0.0 < y && y < HEIGHT.saturating_sub(bird_height) as f64
}

/// Advance the world by one frame. Does nothing after game over.
///
/// Order within the tick: bird physics, then each pipe in spawn order
/// (scroll, retirement check, pass check, collision), then scoring and
/// spawning, retirement, the bounds check, and finally the wing animation
/// for this frame. A collision skips the remaining pipes but the rest of
/// the tick still runs.
pub fn tick<R: Rng>(world: &mut World<R>) -> TickReport {
    let mut report = TickReport::default();
    if !world.is_running() {
        return report;
    }

    world.tick_count += 1;
    world.bird.advance();

    let bird_x = world.bird.x;
    let pipe_width = world.assets.pipe_width();
    let mut add_pipe = false;
    let mut collided = false;
    let mut offscreen = Vec::new();

    for (i, pipe) in world.pipes.iter_mut().enumerate() {
        pipe.advance();
        if pipe.has_scrolled_offscreen(pipe_width) {
            offscreen.push(i);
        }
        if pipe.mark_passed(bird_x) {
            add_pipe = true;
        }
        if pipe.collides_with(&world.bird, &world.assets) {
            collided = true;
            break;
        }
    }

    // At most one point and one new pipe per tick, however many pipes
    // crossed the bird.
    if add_pipe {
        world.score += 1;
        let pipe = world.spawn_pipe();
        world.pipes.push(pipe);
        report.scored = true;
        report.spawned = true;
        log::info!("score {}", world.score);
    }

    for &i in offscreen.iter().rev() {
        world.pipes.remove(i);
    }
    report.retired = offscreen.len();
    if report.retired > 0 {
        log::debug!("retired {} pipe(s)", report.retired);
    }

    let bird_height = world.bird.height(&world.assets);
    let cause = if collided {
        Some(GameOverCause::Collision)
    } else if !in_vertical_bounds(world.bird.y, bird_height) {
        Some(GameOverCause::OutOfBounds)
    } else {
        None
    };

    if let Some(cause) = cause {
        world.status = GameStatus::GameOver(cause);
        world.best_score = world.best_score.max(world.score);
        report.game_over = Some(cause);
        log::info!(
            "game over ({:?}) after {} ticks, score {}",
            cause,
            world.tick_count,
            world.score
        );
    }

    world.bird.render_pose();
    report
}

/// Tick until the run ends or `max_ticks` elapse, feeding inputs from `pilot`
/// before each tick. Returns the number of ticks run.
pub fn run_until_over<R, F>(world: &mut World<R>, max_ticks: u64, mut pilot: F) -> u64
where
    R: Rng,
    F: FnMut(&World<R>) -> Option<FlappyInput>,
{
    let mut ticks = 0;
    while world.is_running() && ticks < max_ticks {
        if let Some(input) = pilot(world) {
            process_input(world, input);
        }
        tick(world);
        ticks += 1;
    }
    ticks
}
