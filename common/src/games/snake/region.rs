use super::types::Point;

/// Inclusive cell bounds inside the walls and below the score bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayableRegion {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl PlayableRegion {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// Walls take `wall_thickness` cells on the left, right and bottom edges;
    /// the top `top_margin` cell rows hold the score bar.
    pub fn from_viewport(
        viewport_width: u32,
        viewport_height: u32,
        cell_size: u32,
        wall_thickness: u32,
        top_margin: u32,
    ) -> Self {
        let cell_size = cell_size.max(1) as i64;
        let columns = viewport_width as i64 / cell_size;
        let rows = viewport_height as i64 / cell_size;
        let wall = wall_thickness as i64;
        Self {
            min_x: clamp_i32(wall),
            max_x: clamp_i32(columns - wall - 1),
            min_y: clamp_i32(top_margin as i64),
            max_y: clamp_i32(rows - wall - 1),
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    pub fn width(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_x - self.min_x + 1) as usize
        }
    }

    pub fn height(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_y - self.min_y + 1) as usize
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..=self.max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Point::new(x, y)))
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
