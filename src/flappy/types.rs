//! World state for a run: the bird, the active pipes and the score.

use super::bird::Bird;
use super::pipe::Pipe;
use crate::assets::AssetBundle;
use crate::constants::*;
use rand::Rng;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The bird's silhouette touched a pipe.
    Collision,
    /// The bird left the vertical play area.
    OutOfBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(GameOverCause),
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A pipe was passed this tick (score went up by one).
    pub scored: bool,
    /// A replacement pipe was spawned.
    pub spawned: bool,
    /// Pipes removed after scrolling off the left edge.
    pub retired: usize,
    /// Set on the tick the run ended.
    pub game_over: Option<GameOverCause>,
}

/// The simulation. Owns its sprites and its random source so that a seeded
/// RNG replays the same pipe layout.
pub struct World<R: Rng> {
    pub(super) assets: AssetBundle,
    pub(super) rng: R,
    pub bird: Bird,
    /// Active pipes in spawn order, which is also left-to-right order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Best score this session; survives restarts, never saved.
    pub best_score: u32,
    pub status: GameStatus,
    /// Ticks since the run started.
    pub tick_count: u64,
    /// Runs started this session, including the current one.
    pub runs: u32,
}

impl<R: Rng> World<R> {
    pub fn new(assets: AssetBundle, mut rng: R) -> Self {
        let first_pipe = Pipe::new(PIPE_SPAWN_X, assets.pipe_height(), &mut rng);
        Self {
            assets,
            rng,
            bird: Bird::new(BIRD_START_X, BIRD_START_Y),
            pipes: vec![first_pipe],
            score: 0,
            best_score: 0,
            status: GameStatus::Running,
            tick_count: 0,
            runs: 1,
        }
    }

    /// Put the bird, pipes and score back to their starting values.
    pub fn restart(&mut self) {
        self.bird = Bird::new(BIRD_START_X, BIRD_START_Y);
        self.pipes = vec![self.spawn_pipe()];
        self.score = 0;
        self.status = GameStatus::Running;
        self.tick_count = 0;
        self.runs += 1;
        log::info!("run {} started", self.runs);
    }

    pub(super) fn spawn_pipe(&mut self) -> Pipe {
        let pipe = Pipe::new(PIPE_SPAWN_X, self.assets.pipe_height(), &mut self.rng);
        log::debug!("spawned pipe with gap at {}", pipe.gap_center);
        pipe
    }

    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        match self.status {
            GameStatus::Running => None,
            GameStatus::GameOver(cause) => Some(cause),
        }
    }

    /// First pipe whose trailing edge is still at or ahead of the bird.
    pub fn next_pipe(&self) -> Option<&Pipe> {
        let pipe_width = self.assets.pipe_width() as f64;
        self.pipes
            .iter()
            .find(|p| p.x + pipe_width >= self.bird.x)
    }
}
