use tokio::sync::mpsc;
use common::games::SessionRng;
use common::games::snake::{HighScoreStore, SnakeSession, SnakeSessionSettings};
use common::log;

use crate::state::{ClientCommand, SharedState};
use super::LocalBroadcaster;

/// Owns the session until the UI closes its command channel or asks to shut
/// down. Every input goes through this task, so ticks and turns never
/// interleave outside the session lock.
pub async fn run_snake_game<TStore: HighScoreStore>(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    settings: SnakeSessionSettings,
    store: TStore,
    rng: SessionRng,
) {
    let broadcaster = LocalBroadcaster::new(shared_state.clone());
    let mut session = match SnakeSession::create(&settings, store, rng, broadcaster) {
        Ok(session) => session,
        Err(e) => {
            log!("Failed to create snake session: {}", e);
            shared_state.set_error(e);
            return;
        }
    };
    shared_state.update_snapshot(session.snapshot().await);

    while let Some(command) = command_rx.recv().await {
        match command {
            ClientCommand::Input(input) => session.handle_input(input).await,
            ClientCommand::Shutdown => break,
        }
    }

    session.stop();
    log!("Snake session finished");
}
