mod clock;
mod entity;
mod game_state;
mod high_score;
mod region;
mod session;
mod settings;
mod types;

pub use clock::{ClockControl, TickClock};
pub use entity::Snake;
pub use game_state::{SnakeGameState, SnakeSnapshot};
pub use high_score::{
    FileHighScoreStore, HIGH_SCORE_KEY, HighScoreStore, HighScoreTable, MemoryHighScoreStore,
};
pub use region::PlayableRegion;
pub use session::{SessionInput, SnakeSession};
pub use settings::{
    DEFAULT_CELL_SIZE, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TOP_MARGIN_CELLS,
    DEFAULT_WALL_THICKNESS_CELLS, SnakeSessionSettings,
};
pub use types::{DeathReason, Direction, Phase, Point, TickOutcome};
