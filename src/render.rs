use std::io;

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Coords;

const BORDER_CHAR: char = '#';
const SNAKE_HEAD_CHAR: char = '@';
const SNAKE_BODY_CHAR: char = 'o';
const FOOD_CHAR: char = '*';
const RARE_FOOD_CHAR: char = '$';
const OBSTACLE_CHAR: char = 'X';

pub const CONTROLS_LEGEND: &str = "Controls: WASD / arrow keys move, P pause, Q end round";
pub const PAUSED_BANNER: &str = "=== Paused, press P to resume ===";

/// Read-only snapshot of everything a frame shows.
pub struct View<'a> {
    pub grid: Grid,
    pub snake: &'a Snake,
    pub food: Coords,
    pub rare_food: Option<Coords>,
    pub obstacles: &'a [Coords],
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub paused: bool,
    pub wall_kills: bool,
}

pub trait Renderer {
    fn draw(&mut self, view: &View) -> io::Result<()>;
}

impl View<'_> {
    fn glyph_at(&self, pos: Coords) -> char {
        if self.grid.is_border(pos) {
            BORDER_CHAR
        } else if pos == self.snake.head() {
            SNAKE_HEAD_CHAR
        } else if self.snake.contains(&pos) {
            SNAKE_BODY_CHAR
        } else if pos == self.food {
            FOOD_CHAR
        } else if self.rare_food == Some(pos) {
            RARE_FOOD_CHAR
        } else if self.obstacles.contains(&pos) {
            OBSTACLE_CHAR
        } else {
            ' '
        }
    }

    /// Lays the whole screen out as text: status header, legend, blank
    /// line, the grid, and the pause banner when paused.
    pub fn compose(&self) -> Vec<String> {
        let mode = if self.wall_kills { "Walls kill" } else { "Wrap" };
        let mut lines = vec![
            format!(
                "Score: {}   High score: {}   Level: {}   Mode: {}",
                self.score, self.high_score, self.level, mode
            ),
            CONTROLS_LEGEND.to_string(),
            String::new(),
        ];

        for y in 0..self.grid.height() {
            lines.push((0..self.grid.width()).map(|x| self.glyph_at((x, y))).collect());
        }

        if self.paused {
            lines.push(String::new());
            lines.push(PAUSED_BANNER.to_string());
        }

        lines
    }
}
