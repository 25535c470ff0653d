use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Drives the session's ticks.
pub trait TickScheduler: Send {
    /// Begins ticking every `period`, replacing any previous registration.
    /// There is never more than one live schedule.
    fn start(&mut self, period: Duration);

    fn stop(&mut self);

    /// Completes at the next tick; never completes while stopped.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;
}

pub struct IntervalScheduler {
    interval: Option<Interval>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self { interval: None }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        // first tick fires one full period after start, not immediately
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

/// Test scheduler: one tick per message sent on the paired channel, and only
/// while started.
#[cfg(test)]
pub struct ManualScheduler {
    ticks: tokio::sync::mpsc::UnboundedReceiver<()>,
    active: bool,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn new() -> (tokio::sync::mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (
            tx,
            Self {
                ticks: rx,
                active: false,
            },
        )
    }
}

#[cfg(test)]
impl TickScheduler for ManualScheduler {
    fn start(&mut self, _period: Duration) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    async fn tick(&mut self) {
        if !self.active {
            return std::future::pending().await;
        }
        if self.ticks.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}
