use std::cmp::max;
use std::time::Duration;

use rand::Rng;

use crate::grid::Grid;
use crate::placement::{self, RareFood};
use crate::render::View;
use crate::settings::Settings;
use crate::snake::{Direction::{self, Right}, Snake};
use crate::Coords;

pub const INITIAL_SNAKE_LENGTH: i16 = 3;

const FOOD_POINTS: u32 = 10;
const RARE_FOOD_POINTS: u32 = 40;
const LENGTH_PER_LEVEL: i64 = 5;
const DELAY_STEP_MS: u64 = 8;
const MIN_DELAY_MS: u64 = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Died,
}

/// Level reached by a snake of `length` cells.
pub fn level_for_length(length: usize) -> u32 {
    let level = 1 + (length as i64 - INITIAL_SNAKE_LENGTH as i64) / LENGTH_PER_LEVEL;
    max(1, level) as u32
}

/// Tick interval in milliseconds at `level`.
pub fn delay_for_level(base_delay_ms: u64, level: u32) -> u64 {
    let slowdown = (level.saturating_sub(1)) as u64 * DELAY_STEP_MS;
    max(MIN_DELAY_MS, base_delay_ms.saturating_sub(slowdown))
}

/// One round of play: the board plus the counters the tick engine updates.
pub struct Game<R> {
    rng: R,
    grid: Grid,
    wall_kills: bool,
    base_delay_ms: u64,
    snake: Snake,
    food: Coords,
    rare_food: Option<RareFood>,
    obstacles: Vec<Coords>,
    score: u32,
    level: u32,
    ticks: u64,
    paused: bool,
    running: bool,
}

impl<R: Rng> Game<R> {
    pub fn new(settings: &Settings, mut rng: R) -> Self {
        let grid = Grid::new(settings.width, settings.height);
        let snake = Snake::new(grid.center(), INITIAL_SNAKE_LENGTH, Right);
        let obstacles = placement::generate_obstacles(&grid, &snake, &mut rng);
        let food = placement::place_food(&grid, &snake, &obstacles, None, &mut rng);

        Game {
            rng,
            grid,
            wall_kills: settings.wall_kills,
            base_delay_ms: settings.base_delay_ms,
            snake,
            food,
            rare_food: None,
            obstacles,
            score: 0,
            level: 1,
            ticks: 0,
            paused: false,
            running: true,
        }
    }

    /// Runs one tick. Does nothing while paused.
    pub fn advance(&mut self) -> Outcome {
        if self.paused {
            return Outcome::Continue;
        }

        self.snake.apply_turn();
        let new_head = match self.grid.step(self.snake.head(), self.snake.get_direction(), self.wall_kills) {
            Some(pos) => pos,
            None => return Outcome::Died,
        };

        if self.snake.contains(&new_head) || self.obstacles.contains(&new_head) {
            return Outcome::Died;
        }

        self.snake.push_head(new_head);

        let mut grow = false;
        if new_head == self.food {
            self.score += FOOD_POINTS;
            grow = true;
            self.food = placement::place_food(
                &self.grid,
                &self.snake,
                &self.obstacles,
                self.rare_food.as_ref(),
                &mut self.rng,
            );
        } else if self.rare_food.map_or(false, |r| r.pos == new_head) {
            self.score += RARE_FOOD_POINTS;
            grow = true;
            self.rare_food = None;
        }

        if !grow {
            self.snake.pop_tail();
        }

        match self.rare_food.as_mut() {
            Some(rare) => {
                rare.remaining_ticks -= 1;
                if rare.remaining_ticks == 0 {
                    self.rare_food = None;
                }
            }
            None => {
                self.rare_food = placement::spawn_rare_food(
                    &self.grid,
                    &self.snake,
                    &self.obstacles,
                    self.food,
                    &mut self.rng,
                );
            }
        }

        self.level = level_for_length(self.snake.len());
        self.ticks += 1;
        Outcome::Continue
    }
}

impl<R> Game<R> {
    pub fn change_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn obstacles(&self) -> &[Coords] {
        &self.obstacles
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(delay_for_level(self.base_delay_ms, self.level))
    }

    pub fn view(&self, high_score: u32) -> View<'_> {
        View {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            rare_food: self.rare_food.map(|r| r.pos),
            obstacles: &self.obstacles,
            score: self.score,
            high_score,
            level: self.level,
            paused: self.paused,
            wall_kills: self.wall_kills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::RARE_FOOD_LIFETIME;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn settings(wall_kills: bool) -> Settings {
        Settings { width: 20, height: 12, base_delay_ms: 120, wall_kills }
    }

    /// A game with no obstacles and food tucked into a corner, out of the way.
    fn open_game(wall_kills: bool) -> Game<StdRng> {
        let mut game = Game::new(&settings(wall_kills), StdRng::seed_from_u64(3));
        game.obstacles.clear();
        game.food = (1, 1);
        game
    }

    fn body(game: &Game<StdRng>) -> Vec<Coords> {
        game.snake.body().copied().collect()
    }

    #[test]
    fn new_game_layout() {
        let game = Game::new(&settings(true), StdRng::seed_from_u64(9));
        assert_eq!(body(&game), vec![(10, 6), (9, 6), (8, 6)]);
        assert_eq!(game.snake.get_direction(), Right);
        assert_eq!((game.score, game.level, game.ticks), (0, 1, 0));
        assert!(game.is_running());
        assert!(!game.paused);
        assert!(game.rare_food.is_none());
        assert_eq!(game.obstacles.len(), 3);
        assert!(!game.snake.contains(&game.food));
        assert!(!game.obstacles.contains(&game.food));
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut game = open_game(true);
        assert_eq!(game.advance(), Outcome::Continue);
        assert_eq!(body(&game), vec![(11, 6), (10, 6), (9, 6)]);
        assert_eq!(game.ticks, 1);
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut game = open_game(true);
        game.rare_food = Some(RareFood { pos: (3, 3), remaining_ticks: 10 });
        game.toggle_pause();

        let before = (body(&game), game.score, game.food, game.rare_food, game.obstacles.clone(), game.ticks);
        for _ in 0..5 {
            assert_eq!(game.advance(), Outcome::Continue);
        }
        let after = (body(&game), game.score, game.food, game.rare_food, game.obstacles.clone(), game.ticks);
        assert_eq!(before, after);

        game.toggle_pause();
        game.advance();
        assert_eq!(game.snake.head(), (11, 6));
    }

    #[test]
    fn turns_made_while_paused_cannot_reverse_the_snake() {
        let mut game = open_game(true);
        game.toggle_pause();

        game.change_direction(Up);
        assert_eq!(game.advance(), Outcome::Continue);
        game.change_direction(Left);
        assert_eq!(game.advance(), Outcome::Continue);

        game.toggle_pause();
        assert_eq!(game.advance(), Outcome::Continue);
        assert_eq!(game.snake.get_direction(), Up);
        assert_eq!(body(&game), vec![(10, 5), (10, 6), (9, 6)]);
    }

    #[test]
    fn eating_food_scores_ten_and_grows() {
        let mut game = open_game(true);
        game.rare_food = Some(RareFood { pos: (5, 9), remaining_ticks: 10 });
        game.food = (11, 6);

        assert_eq!(game.advance(), Outcome::Continue);
        assert_eq!(game.score, 10);
        assert_eq!(body(&game), vec![(11, 6), (10, 6), (9, 6), (8, 6)]);
        assert!(!game.snake.contains(&game.food));
        assert!(!game.obstacles.contains(&game.food));
        assert_ne!(Some(game.food), game.rare_food.map(|r| r.pos));
    }

    #[test]
    fn eating_rare_food_scores_forty_and_grows() {
        let mut game = open_game(true);
        game.rare_food = Some(RareFood { pos: (11, 6), remaining_ticks: 10 });

        assert_eq!(game.advance(), Outcome::Continue);
        assert_eq!(game.score, 40);
        assert_eq!(game.snake.len(), 4);
        assert_ne!(game.rare_food.map(|r| r.pos), Some((11, 6)));
    }

    #[test]
    fn rare_food_expires() {
        let mut game = open_game(false);
        game.rare_food = Some(RareFood { pos: (3, 9), remaining_ticks: 2 });

        game.advance();
        assert_eq!(game.rare_food.map(|r| r.remaining_ticks), Some(1));
        game.advance();
        assert!(game.rare_food.is_none());
    }

    #[test]
    fn rare_food_eventually_spawns_with_full_lifetime() {
        let mut game = open_game(false);
        game.change_direction(Down);
        let mut spawned = None;

        for _ in 0..1000 {
            assert_eq!(game.advance(), Outcome::Continue);
            if let Some(rare) = game.rare_food {
                spawned = Some(rare);
                break;
            }
        }

        let rare = spawned.expect("rare food never spawned");
        assert_eq!(rare.remaining_ticks, RARE_FOOD_LIFETIME);
        assert!(!game.snake.contains(&rare.pos));
        assert_ne!(rare.pos, game.food);
    }

    #[test]
    fn deadly_walls_end_the_round_without_moving() {
        for (direction, head) in [(Right, (18, 6)), (Left, (1, 6)), (Up, (10, 1)), (Down, (10, 10))] {
            let mut game = open_game(true);
            game.snake = Snake::new(head, 3, direction);
            let before = body(&game);

            assert_eq!(game.advance(), Outcome::Died);
            assert_eq!(body(&game), before);
            assert_eq!(game.score, 0);
        }
    }

    #[test]
    fn open_walls_wrap_around() {
        let mut game = open_game(false);
        game.snake = Snake::new((1, 6), 3, Left);
        assert_eq!(game.advance(), Outcome::Continue);
        assert_eq!(game.snake.head(), (18, 6));

        game.snake = Snake::new((18, 6), 3, Right);
        game.advance();
        assert_eq!(game.snake.head(), (1, 6));

        game.snake = Snake::new((10, 1), 3, Up);
        game.advance();
        assert_eq!(game.snake.head(), (10, 10));

        game.snake = Snake::new((10, 10), 3, Down);
        game.advance();
        assert_eq!(game.snake.head(), (10, 1));
    }

    #[test]
    fn biting_yourself_is_fatal() {
        let mut game = open_game(true);
        // Head at (10, 6) heading up into its own tail at (10, 5).
        game.snake = Snake::new((10, 5), 1, Up);
        for pos in [(11, 5), (11, 6), (11, 7), (10, 7), (9, 7), (9, 6), (10, 6)] {
            game.snake.push_head(pos);
        }

        assert_eq!(game.advance(), Outcome::Died);
    }

    #[test]
    fn obstacles_are_fatal() {
        let mut game = open_game(true);
        game.obstacles.push((11, 6));
        assert_eq!(game.advance(), Outcome::Died);
    }

    #[test]
    fn level_follows_length() {
        assert_eq!(level_for_length(3), 1);
        assert_eq!(level_for_length(7), 1);
        assert_eq!(level_for_length(8), 2);
        assert_eq!(level_for_length(13), 3);
        assert_eq!(level_for_length(0), 1);
    }

    #[test]
    fn delay_shrinks_with_level_down_to_a_floor() {
        assert_eq!(delay_for_level(120, 1), 120);
        assert_eq!(delay_for_level(120, 5), 88);
        assert_eq!(delay_for_level(80, 6), 40);
        assert_eq!(delay_for_level(80, 50), 40);
    }

    #[test]
    fn level_and_delay_update_as_the_snake_grows() {
        let mut game = open_game(false);
        game.snake = Snake::new((10, 6), 7, Right);
        game.food = (11, 6);

        game.advance();
        assert_eq!(game.snake.len(), 8);
        assert_eq!(game.level(), 2);
        assert_eq!(game.delay(), Duration::from_millis(112));
    }

    #[test]
    fn quit_stops_the_round() {
        let mut game = open_game(true);
        game.quit();
        assert!(!game.is_running());
    }
}
