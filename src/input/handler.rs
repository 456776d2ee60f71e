use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Steer(Direction),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputCommand {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputCommand::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => InputCommand::Steer(Direction::Up),
            KeyCode::Down => InputCommand::Steer(Direction::Down),
            KeyCode::Left => InputCommand::Steer(Direction::Left),
            KeyCode::Right => InputCommand::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => InputCommand::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => InputCommand::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => InputCommand::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => InputCommand::Steer(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputCommand::Quit,
            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => InputCommand::Restart,

            _ => InputCommand::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
