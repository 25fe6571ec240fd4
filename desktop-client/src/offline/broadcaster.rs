use common::games::GameBroadcaster;
use common::games::snake::{Phase, SnakeSnapshot};
use common::log;

use crate::state::SharedState;

#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl GameBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: SnakeSnapshot) {
        self.shared_state.update_snapshot(snapshot);
    }

    async fn broadcast_game_over(&self, snapshot: SnakeSnapshot) {
        match (snapshot.phase, snapshot.death_reason) {
            (Phase::Won, _) => log!("Board cleared with score {}", snapshot.score),
            (_, Some(reason)) => log!("Snake {} with score {}", reason, snapshot.score),
            _ => log!("Game ended with score {}", snapshot.score),
        }
        self.shared_state.add_finished_score(snapshot.score);
        self.shared_state.update_snapshot(snapshot);
    }
}
