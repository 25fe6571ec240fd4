use std::time::Duration;

use super::region::PlayableRegion;
use super::types::Point;

pub const DEFAULT_CELL_SIZE: u32 = 60;
pub const DEFAULT_TOP_MARGIN_CELLS: u32 = 3;
pub const DEFAULT_WALL_THICKNESS_CELLS: u32 = 1;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub cell_size: u32,
    pub wall_thickness_cells: u32,
    pub top_margin_cells: u32,
    pub start: Point,
    pub tick_interval: Duration,
}

impl SnakeSessionSettings {
    pub fn region(&self) -> PlayableRegion {
        PlayableRegion::from_viewport(
            self.viewport_width,
            self.viewport_height,
            self.cell_size,
            self.wall_thickness_cells,
            self.top_margin_cells,
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size == 0 {
            return Err("Cell size must be greater than 0".to_string());
        }
        let region = self.region();
        if region.is_empty() {
            return Err(format!(
                "Viewport {}x{} leaves no playable cells at cell size {}",
                self.viewport_width, self.viewport_height, self.cell_size
            ));
        }
        if !region.contains(&self.start) {
            return Err(format!(
                "Start cell ({}, {}) is outside the playable region x {}..={}, y {}..={}",
                self.start.x, self.start.y, region.min_x, region.max_x, region.min_y, region.max_y
            ));
        }
        let tick_ms = self.tick_interval.as_millis();
        if !(50..=5000).contains(&tick_ms) {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            viewport_width: 1080,
            viewport_height: 1920,
            cell_size: DEFAULT_CELL_SIZE,
            wall_thickness_cells: DEFAULT_WALL_THICKNESS_CELLS,
            top_margin_cells: DEFAULT_TOP_MARGIN_CELLS,
            start: Point::new(5, DEFAULT_TOP_MARGIN_CELLS as i32 + 1),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}
