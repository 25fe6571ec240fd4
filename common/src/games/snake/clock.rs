use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockControl {
    Continue,
    Stop,
}

/// Repeating timer running on the tokio runtime. At most one timer task is
/// alive per clock: `start` aborts the previous one first.
pub struct TickClock {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self { period, task: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Calls `on_tick` every period, the first time immediately, until it
    /// returns [`ClockControl::Stop`] or the clock is stopped.
    pub fn start<F, Fut>(&mut self, mut on_tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ClockControl> + Send + 'static,
    {
        self.stop();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if on_tick().await == ClockControl::Stop {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TickClock {
    fn drop(&mut self) {
        self.stop();
    }
}
