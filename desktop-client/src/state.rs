use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use common::games::snake::{SessionInput, SnakeSnapshot};
use ringbuffer::{AllocRingBuffer, RingBuffer};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    Input(SessionInput),
    Shutdown,
}

#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<ClientCommand>,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<ClientCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: ClientCommand) {
        // the session task is gone only while the app shuts down
        let _ = self.tx.send(command);
    }
}

/// State shared between the session task and the UI thread.
#[derive(Clone)]
pub struct SharedState {
    snapshot: Arc<Mutex<Option<SnakeSnapshot>>>,
    recent_scores: Arc<Mutex<AllocRingBuffer<u32>>>,
    error: Arc<Mutex<Option<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SharedState {
    pub fn new(recent_scores_capacity: usize) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(None)),
            recent_scores: Arc::new(Mutex::new(AllocRingBuffer::new(
                recent_scores_capacity.max(1),
            ))),
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn update_snapshot(&self, snapshot: SnakeSnapshot) {
        *lock(&self.snapshot) = Some(snapshot);
    }

    pub fn get_snapshot(&self) -> Option<SnakeSnapshot> {
        lock(&self.snapshot).clone()
    }

    pub fn add_finished_score(&self, score: u32) {
        let _ = lock(&self.recent_scores).enqueue(score);
    }

    /// Newest first.
    pub fn recent_scores(&self) -> Vec<u32> {
        lock(&self.recent_scores).iter().rev().copied().collect()
    }

    pub fn set_error(&self, error: String) {
        *lock(&self.error) = Some(error);
    }

    pub fn get_error(&self) -> Option<String> {
        lock(&self.error).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_scores_keep_newest() {
        let state = SharedState::new(3);
        for score in [1, 2, 3, 4] {
            state.add_finished_score(score);
        }
        assert_eq!(state.recent_scores(), vec![4, 3, 2]);
    }

    #[test]
    fn test_clones_share_snapshot() {
        let state = SharedState::new(1);
        assert!(state.get_snapshot().is_none());
        state.set_error("boom".to_string());
        assert_eq!(state.clone().get_error().as_deref(), Some("boom"));
    }
}
