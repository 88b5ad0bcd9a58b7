use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

/// Non-blocking access to key presses during a round.
pub trait KeySource {
    fn key_available(&mut self) -> io::Result<bool>;
    fn read_key(&mut self) -> io::Result<KeyEvent>;

    /// Reads one key if one is already waiting.
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if self.key_available()? {
            self.read_key().map(Some)
        } else {
            Ok(None)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Quit,
    Ignore,
}

impl From<&KeyEvent> for Command {
    fn from(key_ev: &KeyEvent) -> Self {
        if is_ctrl_c(key_ev) {
            return Command::Quit;
        }

        match key_ev.code {
            KeyCode::Up => Command::Steer(Up),
            KeyCode::Down => Command::Steer(Down),
            KeyCode::Left => Command::Steer(Left),
            KeyCode::Right => Command::Steer(Right),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Command::Steer(Up),
                's' => Command::Steer(Down),
                'a' => Command::Steer(Left),
                'd' => Command::Steer(Right),
                'p' => Command::TogglePause,
                'q' => Command::Quit,
                _ => Command::Ignore,
            },
            _ => Command::Ignore,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
