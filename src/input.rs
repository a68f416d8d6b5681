//! Input handling for the game screen.
//!
//! Maps terminal key events onto game inputs and dispatches them.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flappy::flappy::{process_input, FlappyInput};
use flappy::World;
use rand::Rng;

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the game loop normally.
    Continue,
    /// Leave the game and restore the terminal.
    Quit,
}

/// Unified key -> FlappyInput mapping.
pub fn map_key(key: KeyEvent) -> FlappyInput {
    // Terminals that report releases would otherwise flap twice per press.
    if key.kind == KeyEventKind::Release {
        return FlappyInput::Other;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => FlappyInput::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => FlappyInput::Flap,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => FlappyInput::Quit,
        _ => FlappyInput::Other,
    }
}

pub fn handle_game_input<R: Rng>(key: KeyEvent, world: &mut World<R>) -> InputResult {
    match map_key(key) {
        FlappyInput::Quit => InputResult::Quit,
        input => {
            process_input(world, input);
            InputResult::Continue
        }
    }
}
