use common::games::snake::{Direction, Phase, Point, SessionInput, SnakeSnapshot};
use eframe::egui;

/// Turns a press at `pointer` (board pixels, origin at the top-left corner of
/// the board) into a direction, judged against the head cell's rectangle.
/// Vertical intent wins over horizontal; a press that would reverse the
/// snake falls through to the next axis.
pub fn direction_from_pointer(
    pointer: egui::Pos2,
    head: Point,
    cell_size: f32,
    current: Direction,
) -> Option<Direction> {
    let head_top = head.y as f32 * cell_size;
    let head_bottom = (head.y + 1) as f32 * cell_size;
    let head_left = head.x as f32 * cell_size;
    let head_right = (head.x + 1) as f32 * cell_size;

    if current != Direction::Down && pointer.y < head_top {
        Some(Direction::Up)
    } else if current != Direction::Up && pointer.y > head_bottom {
        Some(Direction::Down)
    } else if current != Direction::Right && pointer.x < head_left {
        Some(Direction::Left)
    } else if current != Direction::Left && pointer.x > head_right {
        Some(Direction::Right)
    } else {
        None
    }
}

/// A press either (re)starts the game or steers the running one.
pub fn pointer_command(
    snapshot: &SnakeSnapshot,
    pointer: egui::Pos2,
    cell_size: f32,
) -> Option<SessionInput> {
    if snapshot.phase != Phase::Running {
        return Some(SessionInput::StartOrRestart);
    }
    let head = snapshot.head()?;
    direction_from_pointer(pointer, head, cell_size, snapshot.direction).map(SessionInput::Turn)
}

pub fn keyboard_command(input: &egui::InputState) -> Option<SessionInput> {
    if input.key_pressed(egui::Key::ArrowUp) || input.key_pressed(egui::Key::W) {
        Some(SessionInput::Turn(Direction::Up))
    } else if input.key_pressed(egui::Key::ArrowDown) || input.key_pressed(egui::Key::S) {
        Some(SessionInput::Turn(Direction::Down))
    } else if input.key_pressed(egui::Key::ArrowLeft) || input.key_pressed(egui::Key::A) {
        Some(SessionInput::Turn(Direction::Left))
    } else if input.key_pressed(egui::Key::ArrowRight) || input.key_pressed(egui::Key::D) {
        Some(SessionInput::Turn(Direction::Right))
    } else if input.key_pressed(egui::Key::Space) || input.key_pressed(egui::Key::Enter) {
        Some(SessionInput::StartOrRestart)
    } else {
        None
    }
}
