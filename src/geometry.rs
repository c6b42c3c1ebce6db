use serde::{Deserialize, Serialize};

/// Pointer position in viewport pixels. Coordinates may go negative when the
/// pointer leaves the viewport mid-drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer size measured in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Rectangle anchored within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Pointer hit test. Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_edge_inclusive() {
        let rect = Rect::new(10, 10, 100, 50);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(110, 60)));
        assert!(!rect.contains(Point::new(111, 60)));
        assert!(!rect.contains(Point::new(9, 30)));
    }

    #[test]
    fn negative_pointer_misses() {
        let rect = Rect::new(0, 0, 100, 50);
        assert!(!rect.contains(Point::new(-1, 10)));
        assert!(!rect.contains(Point::new(10, -5)));
    }
}
