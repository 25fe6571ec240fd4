use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::clock::{ClockControl, TickClock};
use super::game_state::{SnakeGameState, SnakeSnapshot};
use super::high_score::HighScoreStore;
use super::settings::SnakeSessionSettings;
use super::types::{Direction, Phase, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionInput {
    StartOrRestart,
    Turn(Direction),
}

/// One play session: the game state behind a single lock, the clock that
/// ticks it and the broadcaster that receives snapshots.
pub struct SnakeSession<TStore, TBroadcaster>
where
    TStore: HighScoreStore,
    TBroadcaster: GameBroadcaster,
{
    game_state: Arc<Mutex<SnakeGameState<TStore>>>,
    clock: TickClock,
    broadcaster: TBroadcaster,
}

impl<TStore, TBroadcaster> SnakeSession<TStore, TBroadcaster>
where
    TStore: HighScoreStore,
    TBroadcaster: GameBroadcaster,
{
    pub fn new(
        game_state: SnakeGameState<TStore>,
        tick_interval: Duration,
        broadcaster: TBroadcaster,
    ) -> Self {
        Self {
            game_state: Arc::new(Mutex::new(game_state)),
            clock: TickClock::new(tick_interval),
            broadcaster,
        }
    }

    pub fn create(
        settings: &SnakeSessionSettings,
        store: TStore,
        rng: SessionRng,
        broadcaster: TBroadcaster,
    ) -> Result<Self, String> {
        settings.validate()?;
        log!("Creating session with seed {}", rng.seed());
        let game_state = SnakeGameState::new(settings.region(), settings.start, store, rng);
        Ok(Self::new(game_state, settings.tick_interval, broadcaster))
    }

    pub async fn handle_input(&mut self, input: SessionInput) {
        match input {
            SessionInput::StartOrRestart => {
                self.start_or_restart().await;
            }
            SessionInput::Turn(direction) => {
                self.turn(direction).await;
            }
        }
    }

    /// Starts a fresh game unless one is already running.
    pub async fn start_or_restart(&mut self) -> bool {
        let snapshot = {
            let mut game_state = self.game_state.lock().await;
            if game_state.phase() == Phase::Running {
                return false;
            }
            self.clock.stop();
            game_state.reset();
            game_state.snapshot()
        };
        self.broadcaster.broadcast_state(snapshot).await;

        let game_state = self.game_state.clone();
        let broadcaster = self.broadcaster.clone();
        self.clock.start(move || {
            let game_state = game_state.clone();
            let broadcaster = broadcaster.clone();
            async move { run_tick(&game_state, &broadcaster).await }
        });
        true
    }

    pub async fn turn(&self, direction: Direction) -> bool {
        let snapshot = {
            let mut game_state = self.game_state.lock().await;
            if !game_state.set_direction(direction) {
                return false;
            }
            game_state.snapshot()
        };
        self.broadcaster.broadcast_state(snapshot).await;
        true
    }

    pub async fn snapshot(&self) -> SnakeSnapshot {
        self.game_state.lock().await.snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        self.clock.is_running()
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }
}

async fn run_tick<TStore, TBroadcaster>(
    game_state: &Mutex<SnakeGameState<TStore>>,
    broadcaster: &TBroadcaster,
) -> ClockControl
where
    TStore: HighScoreStore,
    TBroadcaster: GameBroadcaster,
{
    let (outcome, snapshot) = {
        let mut game_state = game_state.lock().await;
        let outcome = game_state.tick();
        (outcome, game_state.snapshot())
    };

    if outcome == TickOutcome::Ignored {
        return ClockControl::Stop;
    }

    broadcaster.broadcast_state(snapshot.clone()).await;

    if outcome.ends_game() {
        broadcaster.broadcast_game_over(snapshot).await;
        return ClockControl::Stop;
    }
    ClockControl::Continue
}
