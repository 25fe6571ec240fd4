use std::time::Duration;

use common::config::Validate;
use common::games::snake::{Point, SnakeSessionSettings};
use serde::{Deserialize, Serialize};

/// Board geometry in window pixels. The playable region is derived from it
/// the same way for every screen size.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct SnakeConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub cell_size: u32,
    pub wall_thickness_cells: u32,
    pub top_margin_cells: u32,
    pub start_x: i32,
    pub start_y: i32,
    pub tick_interval_ms: u32,
}

impl From<&SnakeConfig> for SnakeSessionSettings {
    fn from(cfg: &SnakeConfig) -> Self {
        Self {
            viewport_width: cfg.viewport_width,
            viewport_height: cfg.viewport_height,
            cell_size: cfg.cell_size,
            wall_thickness_cells: cfg.wall_thickness_cells,
            top_margin_cells: cfg.top_margin_cells,
            start: Point::new(cfg.start_x, cfg.start_y),
            tick_interval: Duration::from_millis(cfg.tick_interval_ms as u64),
        }
    }
}

impl Validate for SnakeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cell_size < 8 || self.cell_size > 200 {
            return Err("cell_size must be between 8 and 200".to_string());
        }
        if self.viewport_width > 4096 || self.viewport_height > 4096 {
            return Err("viewport must not exceed 4096x4096".to_string());
        }
        SnakeSessionSettings::from(self).validate()
    }
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            viewport_width: 540,
            viewport_height: 960,
            cell_size: 30,
            wall_thickness_cells: 1,
            top_margin_cells: 3,
            start_x: 5,
            start_y: 4,
            tick_interval_ms: 200,
        }
    }
}
