use std::collections::{HashSet, VecDeque};

use crate::types::{Direction, Point};

/// Ordered body segments, head first. The set shadows the deque for O(1)
/// collision lookups and is kept exact across every mutation.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// A straight snake with its head at `head`, trailing away from the
    /// travel direction. The caller is responsible for `head` being far
    /// enough from the walls for `length` segments to fit.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        let (dx, dy): (i64, i64) = match direction {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        };

        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();

        for i in 0..length as i64 {
            let x = head.x as i64 - dx * i;
            let y = head.y as i64 - dy * i;
            debug_assert!(x >= 0 && y >= 0, "initial snake must fit on the grid");
            let segment = Point::new(x as usize, y as usize);
            body.push_back(segment);
            body_set.insert(segment);
        }

        Self { body, body_set }
    }

    #[cfg(test)]
    pub fn from_segments(segments: &[Point]) -> Self {
        let body: VecDeque<Point> = segments.iter().copied().collect();
        let body_set: HashSet<Point> = segments.iter().copied().collect();
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.body_set.contains(&cell)
    }

    pub fn occupied(&self) -> &HashSet<Point> {
        &self.body_set
    }

    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// Attaches `new_head`; unless the snake grew, the tail cell is
    /// released first so the shadow set stays exact.
    pub fn advance(&mut self, new_head: Point, grew: bool) {
        if !grew {
            let tail = self.body.pop_back().expect("snake body is never empty");
            self.body_set.remove(&tail);
        }
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }
}
