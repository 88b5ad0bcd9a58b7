use std::io;
use std::time::Duration;

use log::{error, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::engine::{Game, Outcome};
use crate::input::{Command, KeySource};
use crate::render::Renderer;
use crate::settings::{Settings, SIZE_PRESETS, SIZE_PRESET_NAMES, SPEED_PRESETS, SPEED_PRESET_NAMES};
use crate::store::HighScoreStore;

/// Everything the session needs from the terminal: line-based menus between
/// rounds, plus keys, frames and pacing while a round is running.
pub trait Console: KeySource + Renderer {
    fn clear_screen(&mut self) -> io::Result<()>;
    fn print_lines(&mut self, lines: &[String]) -> io::Result<()>;
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    fn begin_round(&mut self) -> io::Result<()>;
    fn end_round(&mut self) -> io::Result<()>;
    fn sleep(&mut self, duration: Duration);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    SettingsMenu,
    Playing,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RoundEnd {
    Died,
    Quit,
}

pub struct Session<C> {
    console: C,
    settings: Settings,
    store: HighScoreStore,
    high_score: u32,
    last_score: u32,
    rng: StdRng,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, settings: Settings, store: HighScoreStore, rng: StdRng) -> Self {
        let high_score = store.load();
        Session { console, settings, store, high_score, last_score: 0, rng }
    }

    /// Drives the menus and rounds until the player quits from the main menu
    /// or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        let mut screen = Screen::MainMenu;

        loop {
            let next = match screen {
                Screen::MainMenu => self.main_menu()?,
                Screen::SettingsMenu => self.settings_menu()?,
                Screen::Playing => Some(self.play_round()?),
                Screen::GameOver => self.game_over_menu()?,
            };

            match next {
                Some(s) => screen = s,
                None => return Ok(()),
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn main_menu(&mut self) -> io::Result<Option<Screen>> {
        loop {
            let lines = menu(&[
                "================= SNAKE =================".to_string(),
                format!("High score: {}", self.high_score),
                String::new(),
                "1. Start game".to_string(),
                "2. Settings".to_string(),
                "3. Quit".to_string(),
            ]);

            let choice = match self.prompt(&lines)? {
                Some(choice) => choice,
                None => return Ok(None),
            };

            match choice.as_str() {
                "1" => return Ok(Some(Screen::Playing)),
                "2" => return Ok(Some(Screen::SettingsMenu)),
                "3" => return Ok(None),
                _ => {
                    if !self.reject()? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn settings_menu(&mut self) -> io::Result<Option<Screen>> {
        loop {
            let s = self.settings;
            let lines = menu(&[
                "============= SETTINGS =============".to_string(),
                format!("1. Map size (current: {}x{})", s.width, s.height),
                format!("2. Starting speed (current: {} ms per tick, lower is faster)", s.base_delay_ms),
                format!("3. Wall rule (current: {})", s.wall_rule_name()),
                "4. Back to main menu".to_string(),
            ]);

            let choice = match self.prompt(&lines)? {
                Some(choice) => choice,
                None => return Ok(None),
            };

            let keep_going = match choice.as_str() {
                "1" => self.choose_size()?,
                "2" => self.choose_speed()?,
                "3" => {
                    self.settings.toggle_wall_rule();
                    true
                }
                "4" => return Ok(Some(Screen::MainMenu)),
                _ => self.reject()?,
            };

            if !keep_going {
                return Ok(None);
            }
        }
    }

    /// Returns false when input ran out.
    fn choose_size(&mut self) -> io::Result<bool> {
        let mut lines = vec!["----- Map size -----".to_string()];
        for (i, ((w, h), name)) in SIZE_PRESETS.iter().zip(SIZE_PRESET_NAMES.iter()).enumerate() {
            lines.push(format!("{}. {} ({}x{})", i + 1, name, w, h));
        }

        match self.prompt(&menu(&lines))? {
            Some(choice) => match option_index(&choice) {
                Some(i) if self.settings.apply_size_preset(i) => Ok(true),
                _ => self.reject(),
            },
            None => Ok(false),
        }
    }

    /// Returns false when input ran out.
    fn choose_speed(&mut self) -> io::Result<bool> {
        let mut lines = vec!["----- Starting speed -----".to_string()];
        for (i, (delay, name)) in SPEED_PRESETS.iter().zip(SPEED_PRESET_NAMES.iter()).enumerate() {
            lines.push(format!("{}. {} ({} ms per tick)", i + 1, name, delay));
        }

        match self.prompt(&menu(&lines))? {
            Some(choice) => match option_index(&choice) {
                Some(i) if self.settings.apply_speed_preset(i) => Ok(true),
                _ => self.reject(),
            },
            None => Ok(false),
        }
    }

    fn game_over_menu(&mut self) -> io::Result<Option<Screen>> {
        let lines = menu(&[
            "===== GAME OVER =====".to_string(),
            String::new(),
            format!("Score: {}", self.last_score),
            format!("Best: {}", self.high_score),
            String::new(),
            "1. Play again".to_string(),
            "2. Back to main menu".to_string(),
        ]);

        Ok(self.prompt(&lines)?.map(|choice| match choice.as_str() {
            "1" => Screen::Playing,
            _ => Screen::MainMenu,
        }))
    }

    fn new_game(&mut self) -> Game<StdRng> {
        Game::new(&self.settings, StdRng::seed_from_u64(self.rng.gen()))
    }

    fn play_round(&mut self) -> io::Result<Screen> {
        let mut game = self.new_game();
        info!(
            "Round started: {}x{}, {} ms base delay, {}, {} obstacles",
            self.settings.width,
            self.settings.height,
            self.settings.base_delay_ms,
            self.settings.wall_rule_name(),
            game.obstacles().len()
        );

        if let Err(e) = self.console.begin_round() {
            // Undo whatever part of the round setup did happen.
            let _ = self.console.end_round();
            return Err(e);
        }
        let end = self.round_loop(&mut game);
        let restored = self.console.end_round();
        let end = end?;
        restored?;

        info!(
            "Round ended ({:?}): score {}, length {}, level {}, {} ticks",
            end,
            game.score(),
            game.snake().len(),
            game.level(),
            game.ticks()
        );
        self.last_score = game.score();
        self.record_score(game.score());

        Ok(match end {
            RoundEnd::Died => Screen::GameOver,
            RoundEnd::Quit => Screen::MainMenu,
        })
    }

    fn round_loop(&mut self, game: &mut Game<StdRng>) -> io::Result<RoundEnd> {
        loop {
            self.console.draw(&game.view(self.high_score))?;

            if let Some(key_ev) = self.console.poll_key()? {
                match Command::from(&key_ev) {
                    Command::Steer(direction) => game.change_direction(direction),
                    Command::TogglePause => game.toggle_pause(),
                    Command::Quit => game.quit(),
                    Command::Ignore => {}
                }
            }

            if !game.is_running() {
                return Ok(RoundEnd::Quit);
            }

            if game.advance() == Outcome::Died {
                return Ok(RoundEnd::Died);
            }

            self.console.sleep(game.delay());
        }
    }

    fn record_score(&mut self, score: u32) {
        if score <= self.high_score {
            return;
        }

        info!("New high score: {} (was {})", score, self.high_score);
        self.high_score = score;
        if let Err(e) = self.store.save(score) {
            error!("Error saving high score: {}", e);
        }
    }

    fn prompt(&mut self, lines: &[String]) -> io::Result<Option<String>> {
        self.console.clear_screen()?;
        self.console.print_lines(lines)?;
        Ok(self.console.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Tells the player the choice was invalid and waits for Enter. Returns
    /// false when input ran out.
    fn reject(&mut self) -> io::Result<bool> {
        self.console.print_lines(&["Invalid option.".to_string(), "Press Enter to continue...".to_string()])?;
        Ok(self.console.read_line()?.is_some())
    }
}

fn menu(items: &[String]) -> Vec<String> {
    let mut lines = items.to_vec();
    lines.push(String::new());
    lines.push("Enter an option number: ".to_string());
    lines
}

/// Turns a 1-based menu answer into a 0-based index.
fn option_index(choice: &str) -> Option<usize> {
    choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}
