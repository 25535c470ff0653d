use tokio::sync::mpsc::UnboundedSender;

use snake_engine::{GameFrame, GameOverSummary, GameSink};

pub enum UiEvent {
    Frame(GameFrame),
    GameOver(GameOverSummary),
}

/// Forwards session output to the UI task; dropped events mean the UI is
/// already gone and are ignored.
#[derive(Clone)]
pub struct ChannelSink {
    events: UnboundedSender<UiEvent>,
}

impl ChannelSink {
    pub fn new(events: UnboundedSender<UiEvent>) -> Self {
        Self { events }
    }
}

impl GameSink for ChannelSink {
    async fn render(&self, frame: GameFrame) {
        let _ = self.events.send(UiEvent::Frame(frame));
    }

    async fn notify_game_over(&self, summary: GameOverSummary) {
        let _ = self.events.send(UiEvent::GameOver(summary));
    }
}
