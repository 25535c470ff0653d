use std::future::Future;
use std::time::Duration;

use crate::state::GameState;
use crate::types::{Direction, EndReason, Phase, Point};

/// Read-only snapshot of a committed game state, handed to the render sink.
#[derive(Clone, Debug)]
pub struct GameFrame {
    /// Body cells, head first.
    pub snake: Vec<Point>,
    pub direction: Direction,
    pub food: Option<Point>,
    pub score: u32,
    pub phase: Phase,
    pub grid_width: usize,
    pub grid_height: usize,
    pub tick_interval_ms: u64,
}

impl GameFrame {
    pub fn capture(state: &GameState, phase: Phase, tick_interval: Duration) -> Self {
        Self {
            snake: state.snake.segments().collect(),
            direction: state.direction,
            food: state.food,
            score: state.score,
            phase,
            grid_width: state.grid.width(),
            grid_height: state.grid.height(),
            tick_interval_ms: tick_interval.as_millis() as u64,
        }
    }
}

/// Fired exactly once per game-over transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u32,
    pub reason: EndReason,
}

/// Where the session publishes frames and the end-of-game signal. Sinks must
/// not feed anything back into the game state.
pub trait GameSink: Send + Sync + Clone + 'static {
    fn render(&self, frame: GameFrame) -> impl Future<Output = ()> + Send;

    fn notify_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}
