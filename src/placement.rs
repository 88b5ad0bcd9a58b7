use std::cmp::max;

use rand::Rng;

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Coords;

const OBSTACLE_TRIES: u32 = 100;
const FOOD_TRIES: u32 = 200;
const OBSTACLE_CELLS_PER_BLOCK: usize = 200;
const MIN_OBSTACLES: usize = 3;

pub const RARE_FOOD_CHANCE_PERCENT: u32 = 3;
pub const RARE_FOOD_LIFETIME: u32 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RareFood {
    pub pos: Coords,
    pub remaining_ticks: u32,
}

/// Draws interior cells until one is free or `tries` runs out. Returns the
/// last candidate together with whether it is actually free.
fn sample<R, F>(grid: &Grid, rng: &mut R, tries: u32, is_taken: F) -> (Coords, bool)
where
    R: Rng,
    F: Fn(&Coords) -> bool,
{
    let mut candidate = grid.random_interior(rng);
    let mut attempts = 1;

    while is_taken(&candidate) && attempts < tries {
        candidate = grid.random_interior(rng);
        attempts += 1;
    }

    (candidate, !is_taken(&candidate))
}

pub fn obstacle_count(grid: &Grid) -> usize {
    max(MIN_OBSTACLES, grid.area() / OBSTACLE_CELLS_PER_BLOCK)
}

/// Scatters obstacles over the interior, away from the snake. A slot whose
/// retries run out is skipped, so fewer obstacles than requested may come back.
pub fn generate_obstacles<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Vec<Coords> {
    let mut obstacles: Vec<Coords> = vec![];

    for _ in 0..obstacle_count(grid) {
        let (pos, free) = sample(grid, rng, OBSTACLE_TRIES, |p| {
            snake.contains(p) || obstacles.contains(p)
        });
        if free {
            obstacles.push(pos);
        }
    }

    obstacles
}

/// Picks a cell for regular food. On a crowded board the last candidate is
/// kept even if it overlaps something.
pub fn place_food<R: Rng>(
    grid: &Grid,
    snake: &Snake,
    obstacles: &[Coords],
    rare_food: Option<&RareFood>,
    rng: &mut R,
) -> Coords {
    let (pos, _) = sample(grid, rng, FOOD_TRIES, |p| {
        snake.contains(p) || obstacles.contains(p) || rare_food.map_or(false, |r| r.pos == *p)
    });
    pos
}

/// Rolls the per-tick spawn chance and, on success, finds a free cell for
/// rare food. Nothing spawns when no free cell turns up.
pub fn spawn_rare_food<R: Rng>(
    grid: &Grid,
    snake: &Snake,
    obstacles: &[Coords],
    food: Coords,
    rng: &mut R,
) -> Option<RareFood> {
    if rng.gen_range(0..100) >= RARE_FOOD_CHANCE_PERCENT {
        return None;
    }

    let (pos, free) = sample(grid, rng, FOOD_TRIES, |p| {
        snake.contains(p) || obstacles.contains(p) || food == *p
    });

    if free {
        Some(RareFood { pos, remaining_ticks: RARE_FOOD_LIFETIME })
    } else {
        None
    }
}
