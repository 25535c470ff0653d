use std::collections::HashSet;

use crate::types::{Direction, Point};

/// The fixed playing field. Pure bounds arithmetic, no occupancy state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn is_open(&self, cell: Point, occupied: &HashSet<Point>) -> bool {
        self.in_bounds(cell) && !occupied.contains(&cell)
    }

    /// The cell one step from `from` in `direction`, or `None` at a wall.
    pub fn step(&self, from: Point, direction: Direction) -> Option<Point> {
        match direction {
            Direction::Up => {
                if from.y == 0 {
                    return None;
                }
                Some(Point::new(from.x, from.y - 1))
            }
            Direction::Down => {
                if from.y >= self.height - 1 {
                    return None;
                }
                Some(Point::new(from.x, from.y + 1))
            }
            Direction::Left => {
                if from.x == 0 {
                    return None;
                }
                Some(Point::new(from.x - 1, from.y))
            }
            Direction::Right => {
                if from.x >= self.width - 1 {
                    return None;
                }
                Some(Point::new(from.x + 1, from.y))
            }
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }
}
