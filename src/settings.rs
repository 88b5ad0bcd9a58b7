use thiserror::Error;

use crate::TermInt;

pub const MIN_WIDTH: TermInt = 8;
pub const MIN_HEIGHT: TermInt = 5;

pub const DEFAULT_WIDTH: TermInt = 40;
pub const DEFAULT_HEIGHT: TermInt = 20;
pub const DEFAULT_DELAY_MS: u64 = 120;

/// Grid sizes offered by the settings menu, as (width, height).
pub const SIZE_PRESETS: [(TermInt, TermInt); 3] = [(30, 16), (40, 20), (60, 24)];
pub const SIZE_PRESET_NAMES: [&str; 3] = ["Small", "Medium", "Large"];

/// Base tick intervals offered by the settings menu, in milliseconds.
pub const SPEED_PRESETS: [u64; 3] = [180, 120, 80];
pub const SPEED_PRESET_NAMES: [&str; 3] = ["Slow", "Normal", "Fast"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("width {0} is too small, the minimum is {}", MIN_WIDTH)]
    WidthTooSmall(TermInt),
    #[error("height {0} is too small, the minimum is {}", MIN_HEIGHT)]
    HeightTooSmall(TermInt),
    #[error("base delay must be at least 1 ms")]
    ZeroDelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub width: TermInt,
    pub height: TermInt,
    pub base_delay_ms: u64,
    /// `true`: touching the border ends the round. `false`: the snake wraps around.
    pub wall_kills: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            base_delay_ms: DEFAULT_DELAY_MS,
            wall_kills: true,
        }
    }
}

impl Settings {
    pub fn new(width: TermInt, height: TermInt, base_delay_ms: u64, wall_kills: bool) -> Result<Self, SettingsError> {
        let settings = Settings { width, height, base_delay_ms, wall_kills };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width < MIN_WIDTH {
            return Err(SettingsError::WidthTooSmall(self.width));
        }
        if self.height < MIN_HEIGHT {
            return Err(SettingsError::HeightTooSmall(self.height));
        }
        if self.base_delay_ms == 0 {
            return Err(SettingsError::ZeroDelay);
        }
        Ok(())
    }

    /// Applies one of `SIZE_PRESETS`. Returns false for an unknown index.
    pub fn apply_size_preset(&mut self, index: usize) -> bool {
        match SIZE_PRESETS.get(index) {
            Some(&(w, h)) => {
                self.width = w;
                self.height = h;
                true
            }
            None => false,
        }
    }

    /// Applies one of `SPEED_PRESETS`. Returns false for an unknown index.
    pub fn apply_speed_preset(&mut self, index: usize) -> bool {
        match SPEED_PRESETS.get(index) {
            Some(&delay) => {
                self.base_delay_ms = delay;
                true
            }
            None => false,
        }
    }

    pub fn toggle_wall_rule(&mut self) {
        self.wall_kills = !self.wall_kills;
    }

    pub fn wall_rule_name(&self) -> &'static str {
        if self.wall_kills { "Walls kill" } else { "Wrap" }
    }
}
