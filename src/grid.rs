use rand::Rng;

use crate::snake::Direction::{self, *};
use crate::{Coords, TermInt};

/// The playfield, border included. Playable cells are the interior,
/// `1..=width - 2` by `1..=height - 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: TermInt,
    height: TermInt,
}

impl Grid {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_border(&self, pos: Coords) -> bool {
        pos.0 == 0 || pos.1 == 0 || pos.0 >= self.width - 1 || pos.1 >= self.height - 1
    }

    pub fn random_interior<R: Rng>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(1..=self.width - 2), rng.gen_range(1..=self.height - 2))
    }

    /// Moves `pos` one cell towards `direction`. With `wall_kills` set, landing
    /// on the border yields `None`; otherwise the coordinate wraps to the
    /// opposite interior edge.
    pub fn step(&self, pos: Coords, direction: Direction, wall_kills: bool) -> Option<Coords> {
        let (dx, dy) = direction.offset();
        let x = pos.0 as i32 + dx;
        let y = pos.1 as i32 + dy;
        let (max_x, max_y) = (self.width as i32 - 2, self.height as i32 - 2);

        let outside = x <= 0 || y <= 0 || x > max_x || y > max_y;
        if outside && wall_kills {
            return None;
        }

        let x = if x <= 0 { max_x } else if x > max_x { 1 } else { x };
        let y = if y <= 0 { max_y } else if y > max_y { 1 } else { y };
        Some((x as TermInt, y as TermInt))
    }
}

impl Direction {
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}
