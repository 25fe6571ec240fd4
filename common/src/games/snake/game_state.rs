use crate::games::SessionRng;
use crate::log;
use super::entity::Snake;
use super::high_score::{HIGH_SCORE_KEY, HighScoreStore};
use super::region::PlayableRegion;
use super::types::{DeathReason, Direction, Phase, Point, TickOutcome};

const FOOD_SPAWN_ATTEMPTS: usize = 100;

/// Immutable copy of everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSnapshot {
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub direction: Direction,
    pub death_reason: Option<DeathReason>,
    pub region: PlayableRegion,
    pub tick: u64,
}

impl SnakeSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }
}

pub struct SnakeGameState<TStore: HighScoreStore> {
    snake: Snake,
    direction: Direction,
    last_moved: Direction,
    food: Option<Point>,
    score: u32,
    high_score: u32,
    phase: Phase,
    death_reason: Option<DeathReason>,
    tick: u64,
    region: PlayableRegion,
    start: Point,
    rng: SessionRng,
    store: TStore,
}

impl<TStore: HighScoreStore> SnakeGameState<TStore> {
    pub fn new(region: PlayableRegion, start: Point, store: TStore, rng: SessionRng) -> Self {
        let high_score = store.get(HIGH_SCORE_KEY);
        Self {
            snake: Snake::new(start),
            direction: Direction::Right,
            last_moved: Direction::Right,
            food: None,
            score: 0,
            high_score,
            phase: Phase::NotStarted,
            death_reason: None,
            tick: 0,
            region,
            start,
            rng,
            store,
        }
    }

    pub fn reset(&mut self) {
        self.snake = Snake::new(self.start);
        self.direction = Direction::Right;
        self.last_moved = Direction::Right;
        self.score = 0;
        self.death_reason = None;
        self.tick = 0;
        self.phase = Phase::Running;
        self.spawn_food();
        log!(
            "New game at ({}, {}), best so far {}",
            self.start.x,
            self.start.y,
            self.high_score
        );
    }

    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        // last_moved guards two turns within one tick, e.g. Right -> Up -> Left
        if requested.is_opposite(&self.direction) || requested.is_opposite(&self.last_moved) {
            return false;
        }
        self.direction = requested;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        let new_head = match self.next_head() {
            Ok(point) => point,
            Err(reason) => {
                self.phase = Phase::GameOver;
                self.death_reason = Some(reason);
                log!(
                    "Game over: snake {} at tick {} with score {}",
                    reason,
                    self.tick,
                    self.score
                );
                return TickOutcome::Collided(reason);
            }
        };

        self.snake.push_head(new_head);
        self.last_moved = self.direction;
        self.tick += 1;

        if self.food == Some(new_head) {
            self.score += 1;
            log!("Ate food at ({}, {}). Score: {}", new_head.x, new_head.y, self.score);
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store.set(HIGH_SCORE_KEY, self.high_score);
            }
            self.spawn_food();
            if self.phase == Phase::Won {
                return TickOutcome::BoardFilled;
            }
            TickOutcome::Ate
        } else {
            self.snake.pop_tail();
            TickOutcome::Moved
        }
    }

    fn next_head(&self) -> Result<Point, DeathReason> {
        let next_head = self.snake.head().step(self.direction);
        if !self.region.contains(&next_head) {
            return Err(DeathReason::WallCollision);
        }
        if self.snake.contains(&next_head) {
            return Err(DeathReason::SelfCollision);
        }
        Ok(next_head)
    }

    /// Picks a uniformly random free cell. Falls back to scanning the region
    /// when sampling keeps hitting the body; with no free cell left the game
    /// is won.
    pub fn spawn_food(&mut self) {
        self.food = None;
        if self.region.is_empty() {
            return;
        }

        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let pos = Point::new(
                self.rng.random_range(self.region.min_x..=self.region.max_x),
                self.rng.random_range(self.region.min_y..=self.region.max_y),
            );
            if !self.snake.contains(&pos) {
                self.food = Some(pos);
                return;
            }
        }

        let free_cells: Vec<Point> = self
            .region
            .cells()
            .filter(|cell| !self.snake.contains(cell))
            .collect();
        if free_cells.is_empty() {
            self.phase = Phase::Won;
            log!("Board filled with score {}", self.score);
            return;
        }
        let index = self.rng.random_range(0..free_cells.len());
        self.food = Some(free_cells[index]);
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            snake: self.snake.cells().copied().collect(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            phase: self.phase,
            direction: self.direction,
            death_reason: self.death_reason,
            region: self.region,
            tick: self.tick,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn head(&self) -> Point {
        self.snake.head()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn region(&self) -> PlayableRegion {
        self.region
    }

    #[cfg(test)]
    fn set_snake(&mut self, cells: &[Point], direction: Direction) {
        self.snake = Snake::from_cells(cells).expect("test snake must be non-empty and non-overlapping");
        self.direction = direction;
        self.last_moved = direction;
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Option<Point>) {
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::MemoryHighScoreStore;

    const REGION: PlayableRegion = PlayableRegion {
        min_x: 1,
        max_x: 16,
        min_y: 3,
        max_y: 30,
    };

    fn create_state(store: MemoryHighScoreStore) -> SnakeGameState<MemoryHighScoreStore> {
        SnakeGameState::new(REGION, Point::new(5, 4), store, SessionRng::new(42))
    }

    fn running_state() -> SnakeGameState<MemoryHighScoreStore> {
        let mut state = create_state(MemoryHighScoreStore::new());
        state.reset();
        state
    }

    #[test]
    fn test_new_state_is_not_started() {
        let state = create_state(MemoryHighScoreStore::with_value(HIGH_SCORE_KEY, 17));
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.snake_len(), 1);
        assert_eq!(state.high_score(), 17);
        assert_eq!(state.food(), None);
    }

    #[test]
    fn test_tick_and_turn_ignored_before_start() {
        let mut state = create_state(MemoryHighScoreStore::new());
        assert_eq!(state.tick(), TickOutcome::Ignored);
        assert!(!state.set_direction(Direction::Down));
        assert_eq!(state.head(), Point::new(5, 4));
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_reset_starts_running_with_food() {
        let state = running_state();
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.head(), Point::new(5, 4));
        let food = state.food().unwrap();
        assert!(REGION.contains(&food));
        assert_ne!(food, state.head());
    }

    #[test]
    fn test_single_cell_snake_moves_right() {
        let mut state = running_state();
        state.set_snake(&[Point::new(5, 5)], Direction::Right);
        state.set_food(Some(Point::new(10, 10)));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snapshot().snake, vec![Point::new(6, 5)]);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running_state();
        state.set_snake(&[Point::new(5, 5), Point::new(4, 5)], Direction::Right);
        state.set_food(Some(Point::new(6, 5)));

        assert_eq!(state.tick(), TickOutcome::Ate);
        let snapshot = state.snapshot();
        assert_eq!(
            snapshot.snake,
            vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]
        );
        assert_eq!(snapshot.score, 1);
        let food = snapshot.food.unwrap();
        assert!(!snapshot.snake.contains(&food));
        assert!(REGION.contains(&food));
    }

    #[test]
    fn test_wall_collision_leaves_snake_untouched() {
        let mut state = running_state();
        state.set_snake(&[Point::new(1, 10), Point::new(2, 10)], Direction::Left);
        state.set_food(Some(Point::new(10, 10)));
        let before = state.snapshot();

        assert_eq!(
            state.tick(),
            TickOutcome::Collided(DeathReason::WallCollision)
        );
        let after = state.snapshot();
        assert_eq!(after.phase, Phase::GameOver);
        assert_eq!(after.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.score, before.score);
        assert_eq!(after.food, before.food);
    }

    #[test]
    fn test_every_wall_ends_the_game() {
        let cases = [
            (Point::new(REGION.max_x, 10), Direction::Right),
            (Point::new(5, REGION.min_y), Direction::Up),
            (Point::new(5, REGION.max_y), Direction::Down),
        ];
        for (head, direction) in cases {
            let mut state = running_state();
            state.set_snake(&[head], direction);
            assert!(state.tick().ends_game(), "{:?} at {:?}", direction, head);
            assert_eq!(state.phase(), Phase::GameOver);
        }
    }

    #[test]
    fn test_self_collision() {
        let mut state = running_state();
        // head at (5,5) moving down into (5,6), which is part of the body
        state.set_snake(
            &[
                Point::new(5, 5),
                Point::new(6, 5),
                Point::new(6, 6),
                Point::new(5, 6),
                Point::new(4, 6),
            ],
            Direction::Down,
        );
        state.set_food(Some(Point::new(10, 10)));
        assert_eq!(
            state.tick(),
            TickOutcome::Collided(DeathReason::SelfCollision)
        );
        assert_eq!(state.snake_len(), 5);
    }

    #[test]
    fn test_moving_into_current_tail_is_a_collision() {
        let mut state = running_state();
        state.set_snake(
            &[
                Point::new(5, 5),
                Point::new(6, 5),
                Point::new(6, 6),
                Point::new(5, 6),
            ],
            Direction::Down,
        );
        state.set_food(Some(Point::new(10, 10)));
        assert_eq!(
            state.tick(),
            TickOutcome::Collided(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn test_game_over_stops_ticking() {
        let mut state = running_state();
        state.set_snake(&[Point::new(1, 10)], Direction::Left);
        state.tick();
        let frozen = state.snapshot();
        assert_eq!(state.tick(), TickOutcome::Ignored);
        assert!(!state.set_direction(Direction::Up));
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_reverse_direction_is_rejected() {
        let mut state = running_state();
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);
        assert!(state.set_direction(Direction::Up));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_two_turns_between_ticks_cannot_reverse() {
        let mut state = running_state();
        state.set_snake(&[Point::new(5, 10), Point::new(4, 10)], Direction::Right);
        assert!(state.set_direction(Direction::Up));
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.direction(), Direction::Up);

        state.set_food(Some(Point::new(15, 25)));
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert!(state.set_direction(Direction::Left));
    }

    #[test]
    fn test_direction_never_becomes_opposite() {
        let mut state = running_state();
        let all = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for i in 0..40 {
            let before = state.direction();
            state.set_direction(all[i % all.len()]);
            assert!(!state.direction().is_opposite(&before));
            if i % 3 == 0 {
                state.tick();
            }
        }
    }

    #[test]
    fn test_high_score_persisted_once_per_improvement() {
        let store = MemoryHighScoreStore::with_value(HIGH_SCORE_KEY, 1);
        let mut state = create_state(store.clone());
        state.reset();

        state.set_snake(&[Point::new(5, 5)], Direction::Right);
        state.set_food(Some(Point::new(6, 5)));
        state.tick();
        assert_eq!(state.high_score(), 1);
        assert_eq!(store.write_count(), 0);

        state.set_food(Some(Point::new(7, 5)));
        state.tick();
        assert_eq!(state.score(), 2);
        assert_eq!(state.high_score(), 2);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.get(HIGH_SCORE_KEY), 2);
    }

    #[test]
    fn test_reset_after_game_over_keeps_high_score() {
        let mut state = running_state();
        state.set_snake(&[Point::new(14, 5)], Direction::Right);
        state.set_food(Some(Point::new(15, 5)));
        state.tick();
        state.set_food(Some(Point::new(10, 10)));
        state.tick();
        state.tick();
        assert_eq!(state.phase(), Phase::GameOver);
        let best = state.high_score();
        assert_eq!(best, 1);

        state.reset();
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snake_len(), 1);
        assert_eq!(state.head(), Point::new(5, 4));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.high_score(), best);
        assert_eq!(state.snapshot().death_reason, None);
    }

    #[test]
    fn test_filling_the_board_wins() {
        let region = PlayableRegion::new(0, 1, 0, 0);
        let mut state = SnakeGameState::new(
            region,
            Point::new(0, 0),
            MemoryHighScoreStore::new(),
            SessionRng::new(1),
        );
        state.reset();
        assert_eq!(state.food(), Some(Point::new(1, 0)));

        assert_eq!(state.tick(), TickOutcome::BoardFilled);
        assert_eq!(state.phase(), Phase::Won);
        assert_eq!(state.food(), None);
        assert_eq!(state.score(), 1);
        assert_eq!(state.tick(), TickOutcome::Ignored);
    }

    #[test]
    fn test_food_found_on_nearly_full_board() {
        let region = PlayableRegion::new(0, 2, 0, 2);
        let mut state = SnakeGameState::new(
            region,
            Point::new(0, 0),
            MemoryHighScoreStore::new(),
            SessionRng::new(3),
        );
        state.reset();
        let cells: Vec<Point> = region.cells().filter(|c| *c != Point::new(2, 2)).collect();
        state.set_snake(&cells, Direction::Right);
        for _ in 0..10 {
            state.spawn_food();
            assert_eq!(state.food(), Some(Point::new(2, 2)));
        }
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut state = running_state();
        let all = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        let mut rng = SessionRng::new(99);
        let mut best = state.high_score();

        for _ in 0..2000 {
            if state.phase() != Phase::Running {
                state.reset();
            }
            let before = state.snapshot();
            state.set_direction(all[rng.random_range(0..all.len())]);
            let outcome = state.tick();
            let after = state.snapshot();

            match outcome {
                TickOutcome::Moved => {
                    assert_eq!(after.snake.len(), before.snake.len());
                    assert_eq!(after.score, before.score);
                }
                TickOutcome::Ate => {
                    assert_eq!(after.snake.len(), before.snake.len() + 1);
                    assert_eq!(after.score, before.score + 1);
                }
                TickOutcome::Collided(_) => assert_eq!(after.snake, before.snake),
                TickOutcome::BoardFilled | TickOutcome::Ignored => {}
            }

            if after.phase == Phase::Running {
                let mut seen = std::collections::HashSet::new();
                assert!(after.snake.iter().all(|c| seen.insert(*c)));
                assert!(after.snake.iter().all(|c| REGION.contains(c)));
                let food = after.food.unwrap();
                assert!(!after.snake.contains(&food));
            }
            assert!(after.high_score >= best);
            best = after.high_score;
        }
    }
}
