use std::error::Error;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;

use snake_engine::{EndReason, GameHandle, Phase};

use crate::input::{self, UiAction};
use crate::sink::UiEvent;
use crate::term::TermScreen;

const SPEED_STEP_MS: u64 = 20;

pub async fn run(
    handle: GameHandle,
    mut events: UnboundedReceiver<UiEvent>,
) -> Result<(), Box<dyn Error>> {
    let mut screen = TermScreen::new();
    screen.setup()?;
    let result = event_loop(&handle, &mut events, &mut screen).await;
    screen.restore()?;
    result
}

async fn event_loop(
    handle: &GameHandle,
    events: &mut UnboundedReceiver<UiEvent>,
    screen: &mut TermScreen,
) -> Result<(), Box<dyn Error>> {
    let mut keys = EventStream::new();
    // tracked locally so keys make sense between frames
    let mut phase = Phase::Idle;
    let mut tick_interval_ms: u64 = 0;

    loop {
        tokio::select! {
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                match event {
                    UiEvent::Frame(frame) => {
                        phase = frame.phase;
                        tick_interval_ms = frame.tick_interval_ms;
                        screen.draw_frame(&frame)?;
                        if frame.phase == Phase::Idle {
                            screen.draw_status("Press Space to start")?;
                        }
                    }
                    UiEvent::GameOver(summary) => {
                        phase = Phase::GameOver;
                        screen.draw_status(&format!(
                            "{} Final score: {}. R to restart, Q to quit.",
                            describe_end(summary.reason),
                            summary.score
                        ))?;
                    }
                }
            }

            maybe_key = keys.next() => {
                let Some(event) = maybe_key.transpose()? else {
                    break;
                };
                let Event::Key(key) = event else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match input::map_key(&key) {
                    Some(UiAction::Quit) => break,
                    Some(UiAction::Turn(direction)) => handle.turn(direction),
                    Some(UiAction::TogglePause) => match phase {
                        Phase::Running => {
                            handle.pause();
                            phase = Phase::Paused;
                            screen.draw_status("Paused. Space to resume.")?;
                        }
                        Phase::Idle | Phase::Paused => {
                            handle.start();
                            phase = Phase::Running;
                            screen.draw_status("")?;
                        }
                        Phase::GameOver => {}
                    },
                    Some(UiAction::Restart) => {
                        handle.restart();
                        phase = Phase::Running;
                    }
                    Some(UiAction::SpeedUp) => {
                        if tick_interval_ms > SPEED_STEP_MS {
                            handle.set_speed(Duration::from_millis(tick_interval_ms - SPEED_STEP_MS));
                        }
                    }
                    Some(UiAction::SlowDown) => {
                        handle.set_speed(Duration::from_millis(tick_interval_ms + SPEED_STEP_MS));
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}

fn describe_end(reason: EndReason) -> &'static str {
    match reason {
        EndReason::WallCollision => "Hit the wall!",
        EndReason::SelfCollision => "Ran into yourself!",
        EndReason::BoardFull => "Board full, you win!",
    }
}
