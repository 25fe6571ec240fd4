use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Body cells head first, mirrored in `body_set` for O(1) membership.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(start_pos: Point) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(start_pos);
        body_set.insert(start_pos);
        Self { body, body_set }
    }

    /// Builds a snake from head-first cells. Returns `None` for an empty or
    /// self-overlapping body.
    pub fn from_cells(cells: &[Point]) -> Option<Self> {
        let body: VecDeque<Point> = cells.iter().copied().collect();
        let body_set: HashSet<Point> = cells.iter().copied().collect();
        if body.is_empty() || body_set.len() != body.len() {
            return None;
        }
        Some(Self { body, body_set })
    }

    pub fn head(&self) -> Point {
        // never empty: constructors require at least one cell and pop_tail keeps one
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn push_head(&mut self, point: Point) {
        self.body.push_front(point);
        self.body_set.insert(point);
    }

    pub fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cells_rejects_overlap() {
        let cells = [Point::new(1, 1), Point::new(2, 1), Point::new(1, 1)];
        assert!(Snake::from_cells(&cells).is_none());
        assert!(Snake::from_cells(&[]).is_none());
    }

    #[test]
    fn test_push_and_pop_keep_set_in_sync() {
        let mut snake = Snake::new(Point::new(5, 5));
        snake.push_head(Point::new(6, 5));
        assert!(snake.contains(&Point::new(5, 5)));
        assert_eq!(snake.pop_tail(), Some(Point::new(5, 5)));
        assert!(!snake.contains(&Point::new(5, 5)));
        assert_eq!(snake.head(), Point::new(6, 5));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_pop_tail_keeps_last_cell() {
        let mut snake = Snake::new(Point::new(0, 0));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }
}
