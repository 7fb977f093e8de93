// src/utils/geometry.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn translated(&self, delta: &Vector2D) -> Point2D {
        Point2D::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned node rectangle in graph-canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(position: Point2D, width: f64, height: f64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width,
            height,
        }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: &Point2D) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn translate(&mut self, delta: &Vector2D) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_approx_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_translated() {
        let p = Point2D::new(10.0, 20.0).translated(&Vector2D::new(-4.0, 2.5));
        assert_approx_eq!(p.x, 6.0);
        assert_approx_eq!(p.y, 22.5);
    }

    #[test]
    fn test_rect_contains_and_center() {
        let rect = Rect::new(Point2D::new(100.0, 50.0), 160.0, 75.0);
        let center = rect.center();
        assert_approx_eq!(center.x, 180.0);
        assert_approx_eq!(center.y, 87.5);
        assert!(rect.contains(&center));
        assert!(rect.contains(&Point2D::new(100.0, 50.0)));
        assert!(!rect.contains(&Point2D::new(99.0, 50.0)));
        assert!(!rect.contains(&Point2D::new(180.0, 126.0)));
    }

    #[test]
    fn test_rect_translate() {
        let mut rect = Rect::new(Point2D::new(0.0, 0.0), 10.0, 10.0);
        rect.translate(&Vector2D::new(5.0, -3.0));
        assert_approx_eq!(rect.x, 5.0);
        assert_approx_eq!(rect.y, -3.0);
        assert_approx_eq!(rect.width, 10.0);
    }
}
