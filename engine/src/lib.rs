pub mod config;
pub mod logger;

mod food;
mod grid;
mod rng;
mod scheduler;
mod session;
mod sink;
mod snake;
mod state;
mod types;

pub use config::GameConfig;
pub use food::place_food;
pub use grid::Grid;
pub use rng::GameRng;
pub use scheduler::{IntervalScheduler, TickScheduler};
pub use session::{Command, GameHandle, GameSession};
pub use sink::{GameFrame, GameOverSummary, GameSink};
pub use snake::Snake;
pub use state::{GameState, TickResult};
pub use types::{Direction, EndReason, Phase, Point};
