use crate::food::place_food;
use crate::grid::Grid;
use crate::log;
use crate::rng::GameRng;
use crate::snake::Snake;
use crate::types::{Direction, EndReason, Point};

const INITIAL_SNAKE_LENGTH: usize = 3;
const INITIAL_DIRECTION: Direction = Direction::Right;

pub enum TickResult {
    Continue,
    GameOver(EndReason),
}

/// Everything the game mutates, owned by the session loop. `food` is `None`
/// only before the first placement and for the instant between eating and
/// replacement inside a tick.
#[derive(Clone, Debug)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub food: Option<Point>,
    pub score: u32,
    pub grid: Grid,
}

impl GameState {
    /// A three-segment snake at the center of the grid, heading right,
    /// food not yet placed.
    pub fn new(grid: Grid) -> Self {
        let head = Point::new(grid.width() / 2, grid.height() / 2);
        Self {
            snake: Snake::new(head, INITIAL_DIRECTION, INITIAL_SNAKE_LENGTH),
            direction: INITIAL_DIRECTION,
            pending_direction: INITIAL_DIRECTION,
            food: None,
            score: 0,
            grid,
        }
    }

    /// Last write wins; the reversal rule is applied when a tick reads the
    /// slot, so an opposite keypress between ticks is silently ignored.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    pub fn peek_next_head(&self) -> Option<Point> {
        self.grid.step(self.snake.head(), self.direction)
    }

    /// Places food if none is on the board. `false` means no open cell left.
    pub fn place_food(&mut self, rng: &mut GameRng) -> bool {
        if self.food.is_some() {
            return true;
        }
        match place_food(&self.grid, self.snake.occupied(), rng) {
            Some(cell) => {
                self.food = Some(cell);
                true
            }
            None => false,
        }
    }

    /// Advances the game by one tick. On `GameOver` for a wall or self
    /// collision nothing has been mutated; the board-full case commits the
    /// final advance before reporting.
    pub fn step(&mut self, rng: &mut GameRng) -> TickResult {
        if !self.pending_direction.is_opposite(&self.direction) {
            self.direction = self.pending_direction;
        }

        let Some(next_head) = self.peek_next_head() else {
            return TickResult::GameOver(EndReason::WallCollision);
        };

        if self.snake.contains(next_head) {
            return TickResult::GameOver(EndReason::SelfCollision);
        }

        let grew = self.food == Some(next_head);
        self.snake.advance(next_head, grew);

        if grew {
            self.score += 1;
            self.food = None;
            log!(
                "Ate food at ({}, {}), score {}",
                next_head.x,
                next_head.y,
                self.score
            );
            if !self.place_food(rng) {
                return TickResult::GameOver(EndReason::BoardFull);
            }
        }

        TickResult::Continue
    }
}
