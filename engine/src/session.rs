use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::GameConfig;
use crate::grid::Grid;
use crate::log;
use crate::rng::GameRng;
use crate::scheduler::TickScheduler;
use crate::sink::{GameFrame, GameOverSummary, GameSink};
use crate::state::{GameState, TickResult};
use crate::types::{Direction, EndReason, Phase};

pub enum Command {
    Start,
    Pause,
    Restart,
    SetSpeed(Duration),
    Turn(Direction),
}

/// Control surface for a running session. Cheap to clone; commands are
/// applied in order on the session task.
#[derive(Clone)]
pub struct GameHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl GameHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { commands: tx }, rx)
    }

    pub fn start(&self) {
        let _ = self.commands.send(Command::Start);
    }

    pub fn pause(&self) {
        let _ = self.commands.send(Command::Pause);
    }

    pub fn restart(&self) {
        let _ = self.commands.send(Command::Restart);
    }

    pub fn set_speed(&self, interval: Duration) {
        let _ = self.commands.send(Command::SetSpeed(interval));
    }

    pub fn turn(&self, direction: Direction) {
        let _ = self.commands.send(Command::Turn(direction));
    }
}

pub struct GameSession;

impl GameSession {
    /// Owns the game state for its whole lifetime and serializes every
    /// mutation: commands and ticks are multiplexed on this single task.
    /// Returns when the last `GameHandle` is dropped.
    pub async fn run<S, T>(
        config: GameConfig,
        mut commands: mpsc::UnboundedReceiver<Command>,
        sink: S,
        mut scheduler: T,
    ) where
        S: GameSink,
        T: TickScheduler,
    {
        if let Err(e) = config.validate() {
            log!("Refusing to run session: {}", e);
            return;
        }

        let grid = Grid::new(config.grid_width, config.grid_height);
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_random(),
        };
        log!("Session seed: {}", rng.seed());

        let mut tick_interval = Duration::from_millis(config.tick_interval_ms);
        let mut state = GameState::new(grid);
        let mut phase = Phase::Idle;

        // validated grids always have open cells around the initial snake
        state.place_food(&mut rng);
        sink.render(GameFrame::capture(&state, phase, tick_interval)).await;

        loop {
            tokio::select! {
                // commands received before a tick are applied before it
                biased;

                maybe_command = commands.recv() => {
                    let Some(command) = maybe_command else {
                        break;
                    };

                    match command {
                        Command::Start => match phase {
                            Phase::Idle | Phase::Paused => {
                                if state.place_food(&mut rng) {
                                    scheduler.start(tick_interval);
                                    phase = Phase::Running;
                                    log!("Game running");
                                } else {
                                    phase = Phase::GameOver;
                                    scheduler.stop();
                                    sink.notify_game_over(GameOverSummary {
                                        score: state.score,
                                        reason: EndReason::BoardFull,
                                    })
                                    .await;
                                }
                            }
                            Phase::Running | Phase::GameOver => {}
                        },
                        Command::Pause => {
                            if phase == Phase::Running {
                                scheduler.stop();
                                phase = Phase::Paused;
                                log!("Game paused");
                            }
                        }
                        Command::Restart => {
                            state = GameState::new(grid);
                            state.place_food(&mut rng);
                            phase = Phase::Running;
                            scheduler.start(tick_interval);
                            log!("Game restarted");
                            sink.render(GameFrame::capture(&state, phase, tick_interval)).await;
                        }
                        Command::SetSpeed(interval) => {
                            if interval.is_zero() {
                                log!("Rejected non-positive tick interval");
                            } else {
                                tick_interval = interval;
                                if phase == Phase::Running {
                                    // replaces the live timer registration
                                    scheduler.start(tick_interval);
                                }
                                log!("Tick interval set to {} ms", tick_interval.as_millis());
                            }
                        }
                        Command::Turn(direction) => {
                            state.set_pending_direction(direction);
                        }
                    }
                }

                _ = scheduler.tick() => {
                    match state.step(&mut rng) {
                        TickResult::Continue => {
                            sink.render(GameFrame::capture(&state, phase, tick_interval)).await;
                        }
                        TickResult::GameOver(reason) => {
                            phase = Phase::GameOver;
                            scheduler.stop();
                            if reason == EndReason::BoardFull {
                                // this tick committed its advance; show it
                                sink.render(GameFrame::capture(&state, phase, tick_interval)).await;
                            }
                            log!("Game over: {:?}, final score {}", reason, state.score);
                            sink.notify_game_over(GameOverSummary {
                                score: state.score,
                                reason,
                            })
                            .await;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

    use crate::scheduler::ManualScheduler;
    use crate::types::Point;

    #[derive(Clone, Debug)]
    enum SinkEvent {
        Frame(GameFrame),
        GameOver(GameOverSummary),
    }

    #[derive(Clone)]
    struct RecordingSink {
        events: UnboundedSender<SinkEvent>,
    }

    impl GameSink for RecordingSink {
        async fn render(&self, frame: GameFrame) {
            let _ = self.events.send(SinkEvent::Frame(frame));
        }

        async fn notify_game_over(&self, summary: GameOverSummary) {
            let _ = self.events.send(SinkEvent::GameOver(summary));
        }
    }

    struct Harness {
        handle: GameHandle,
        ticks: UnboundedSender<()>,
        events: UnboundedReceiver<SinkEvent>,
        session: tokio::task::JoinHandle<()>,
    }

    impl Harness {
        fn spawn(config: GameConfig) -> Self {
            let (handle, command_rx) = GameHandle::channel();
            let (event_tx, events) = mpsc::unbounded_channel();
            let (ticks, scheduler) = ManualScheduler::new();
            let sink = RecordingSink { events: event_tx };
            let session = tokio::spawn(GameSession::run(config, command_rx, sink, scheduler));
            Self {
                handle,
                ticks,
                events,
                session,
            }
        }

        fn tick(&self) {
            self.ticks.send(()).expect("session is alive");
        }

        async fn next_frame(&mut self) -> GameFrame {
            match self.events.recv().await {
                Some(SinkEvent::Frame(frame)) => frame,
                other => panic!("expected a frame, got {:?}", other),
            }
        }

        async fn next_game_over(&mut self) -> GameOverSummary {
            match self.events.recv().await {
                Some(SinkEvent::GameOver(summary)) => summary,
                other => panic!("expected game over, got {:?}", other),
            }
        }

        /// Shuts the session down and returns whatever events it emitted
        /// beyond those already consumed.
        async fn finish(self) -> Vec<SinkEvent> {
            let Harness {
                handle,
                ticks,
                mut events,
                session,
            } = self;
            drop(handle);
            drop(ticks);
            session.await.expect("session task must not panic");

            let mut leftovers = Vec::new();
            while let Ok(event) = events.try_recv() {
                leftovers.push(event);
            }
            leftovers
        }
    }

    fn seeded_config() -> GameConfig {
        GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        }
    }

    #[tokio::test]
    async fn test_initial_frame_shows_the_starting_position() {
        let mut harness = Harness::spawn(seeded_config());

        let frame = harness.next_frame().await;
        assert_eq!(frame.phase, Phase::Idle);
        assert_eq!(
            frame.snake,
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
        assert_eq!(frame.score, 0);
        assert_eq!(frame.tick_interval_ms, 120);

        let food = frame.food.expect("food is placed before the first frame");
        assert!(!frame.snake.contains(&food));

        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_tick_advances_the_snake_one_cell() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.tick();

        let frame = harness.next_frame().await;
        assert_eq!(frame.phase, Phase::Running);
        assert_eq!(frame.snake[0], Point::new(11, 10));
        // length only ever grows with the score
        assert_eq!(frame.snake.len() as u32, 3 + frame.score);

        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_and_pause_are_idempotent() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.handle.start();
        harness.tick();
        let first = harness.next_frame().await;

        harness.handle.pause();
        harness.handle.pause();
        harness.handle.start();
        harness.tick();
        let second = harness.next_frame().await;

        // exactly one cell of travel per delivered tick, nothing in between
        assert_eq!(
            second.snake[0],
            Point::new(first.snake[0].x + 1, first.snake[0].y)
        );
        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_reversal_input_is_ignored_at_the_tick() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.handle.turn(Direction::Left);
        harness.tick();

        let frame = harness.next_frame().await;
        assert_eq!(frame.direction, Direction::Right);
        assert_eq!(frame.snake[0], Point::new(11, 10));

        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_last_turn_before_a_tick_wins() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.handle.turn(Direction::Down);
        harness.handle.turn(Direction::Up);
        harness.tick();

        let frame = harness.next_frame().await;
        assert_eq!(frame.direction, Direction::Up);
        assert_eq!(frame.snake[0], Point::new(10, 9));

        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_game_over_fires_once_with_the_final_score() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.handle.turn(Direction::Up);

        // head starts at y = 10; ten ticks reach the top row
        let mut last_score = 0;
        for _ in 0..10 {
            harness.tick();
            last_score = harness.next_frame().await.score;
        }

        harness.tick();
        let summary = harness.next_game_over().await;
        assert_eq!(summary.reason, EndReason::WallCollision);
        assert_eq!(summary.score, last_score);

        // ticks and start are dead after game over
        harness.tick();
        harness.handle.start();

        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_restart_resets_the_game_and_keeps_running() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.tick();
        harness.next_frame().await;

        harness.handle.restart();
        let frame = harness.next_frame().await;
        assert_eq!(frame.phase, Phase::Running);
        assert_eq!(frame.score, 0);
        assert_eq!(
            frame.snake,
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );

        harness.tick();
        let frame = harness.next_frame().await;
        assert_eq!(frame.snake[0], Point::new(11, 10));

        assert!(harness.finish().await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_speed_is_rejected_without_mutating_state() {
        let mut harness = Harness::spawn(seeded_config());
        harness.next_frame().await;

        harness.handle.start();
        harness.handle.set_speed(Duration::ZERO);
        harness.tick();
        let frame = harness.next_frame().await;
        assert_eq!(frame.tick_interval_ms, 120);

        harness.handle.set_speed(Duration::from_millis(60));
        harness.tick();
        let frame = harness.next_frame().await;
        assert_eq!(frame.tick_interval_ms, 60);

        assert!(harness.finish().await.is_empty());
    }
}
