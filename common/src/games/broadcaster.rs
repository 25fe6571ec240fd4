use std::future::Future;

use super::snake::SnakeSnapshot;

/// Receives state for rendering. Called after every change visible on screen.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: SnakeSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, snapshot: SnakeSnapshot) -> impl Future<Output = ()> + Send;
}
