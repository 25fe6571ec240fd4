use std::time::Duration;

use common::games::snake::{Phase, Point, SnakeSnapshot};
use eframe::egui;

use crate::config::SnakeConfig;
use crate::input::{keyboard_command, pointer_command};
use crate::state::{ClientCommand, CommandSender, SharedState};

const TOP_BAR_COLOR: egui::Color32 = egui::Color32::from_rgb(0x10, 0x23, 0x2B);
const BACKGROUND_COLOR: egui::Color32 = egui::Color32::from_rgb(0xBF, 0x82, 0x37);
const WALL_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xAD, 0x4A);
const SNAKE_COLOR: egui::Color32 = egui::Color32::BLACK;
const FOOD_COLOR: egui::Color32 = egui::Color32::RED;
const TEXT_COLOR: egui::Color32 = egui::Color32::WHITE;
const DIVIDER_WIDTH: f32 = 3.0;
const REPAINT_INTERVAL: Duration = Duration::from_millis(16);

pub struct SnakeApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    cell_size: f32,
    top_margin_cells: u32,
}

impl SnakeApp {
    pub fn new(shared_state: SharedState, command_sender: CommandSender, cfg: &SnakeConfig) -> Self {
        Self {
            shared_state,
            command_sender,
            cell_size: cfg.cell_size as f32,
            top_margin_cells: cfg.top_margin_cells,
        }
    }

    fn handle_input(&self, ctx: &egui::Context, board: egui::Rect, snapshot: &SnakeSnapshot) {
        let (key_command, press) = ctx.input(|i| {
            let press = if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            };
            (keyboard_command(i), press)
        });

        if let Some(command) = key_command {
            self.command_sender.send(ClientCommand::Input(command));
        }

        if let Some(pos) = press
            && board.contains(pos)
        {
            let local = egui::pos2(pos.x - board.min.x, pos.y - board.min.y);
            if let Some(command) = pointer_command(snapshot, local, self.cell_size) {
                self.command_sender.send(ClientCommand::Input(command));
            }
        }
    }

    fn cell_rect(&self, origin: egui::Pos2, point: Point) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(
                origin.x + point.x as f32 * self.cell_size,
                origin.y + point.y as f32 * self.cell_size,
            ),
            egui::vec2(self.cell_size, self.cell_size),
        )
    }

    fn render_board(&self, painter: &egui::Painter, board: egui::Rect, snapshot: &SnakeSnapshot) {
        let line_y = board.min.y + self.top_margin_cells as f32 * self.cell_size;
        let region = snapshot.region;
        let left_wall_end = board.min.x + region.min_x as f32 * self.cell_size;
        let right_wall_start = board.min.x + (region.max_x + 1) as f32 * self.cell_size;
        let bottom_wall_start = board.min.y + (region.max_y + 1) as f32 * self.cell_size;
        let text_size = self.cell_size * 1.1;
        let font = egui::FontId::proportional(text_size);

        painter.rect_filled(
            egui::Rect::from_min_max(board.min, egui::pos2(board.max.x, line_y)),
            0.0,
            TOP_BAR_COLOR,
        );
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(board.min.x, line_y), board.max),
            0.0,
            BACKGROUND_COLOR,
        );

        let text_y = (board.min.y + line_y) / 2.0;
        painter.text(
            egui::pos2(board.min.x + self.cell_size, text_y),
            egui::Align2::LEFT_CENTER,
            format!("Score: {}", snapshot.score),
            font.clone(),
            TEXT_COLOR,
        );
        painter.text(
            egui::pos2(board.max.x - self.cell_size, text_y),
            egui::Align2::RIGHT_CENTER,
            format!("Best: {}", snapshot.high_score),
            font.clone(),
            TEXT_COLOR,
        );

        painter.line_segment(
            [egui::pos2(board.min.x, line_y), egui::pos2(board.max.x, line_y)],
            egui::Stroke::new(DIVIDER_WIDTH, TEXT_COLOR),
        );

        // walls hug the playable cells: left, right, bottom
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(board.min.x, line_y), egui::pos2(left_wall_end, board.max.y)),
            0.0,
            WALL_COLOR,
        );
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(right_wall_start, line_y), board.max),
            0.0,
            WALL_COLOR,
        );
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(board.min.x, bottom_wall_start), board.max),
            0.0,
            WALL_COLOR,
        );

        for segment in &snapshot.snake {
            painter.rect_filled(self.cell_rect(board.min, *segment), 0.0, SNAKE_COLOR);
        }
        if let Some(food) = snapshot.food {
            painter.rect_filled(self.cell_rect(board.min, food), 0.0, FOOD_COLOR);
        }

        let caption = match snapshot.phase {
            Phase::NotStarted => Some("Tap to start".to_string()),
            Phase::GameOver => Some("Restart Game".to_string()),
            Phase::Won => Some(format!("Board cleared! Restart Game ({})", snapshot.score)),
            Phase::Running => None,
        };
        if let Some(caption) = caption {
            painter.text(board.center(), egui::Align2::CENTER_CENTER, caption, font, TEXT_COLOR);
        }
    }

    fn render_recent_scores(&self, painter: &egui::Painter, board: egui::Rect) {
        let scores = self.shared_state.recent_scores();
        if scores.is_empty() {
            return;
        }
        let line = scores
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("  ");
        painter.text(
            egui::pos2(board.center().x, board.min.y + self.cell_size * 0.4),
            egui::Align2::CENTER_TOP,
            format!("Last: {}", line),
            egui::FontId::proportional(self.cell_size * 0.5),
            TEXT_COLOR,
        );
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(error) = self.shared_state.get_error() {
                    ui.centered_and_justified(|ui| {
                        ui.label(format!("Cannot start the game: {}", error));
                    });
                    return;
                }

                let Some(snapshot) = self.shared_state.get_snapshot() else {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    return;
                };

                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let board = response.rect;

                self.handle_input(ctx, board, &snapshot);
                self.render_board(&painter, board, &snapshot);
                if snapshot.phase != Phase::Running {
                    self.render_recent_scores(&painter, board);
                }
            });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
