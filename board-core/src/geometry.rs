//! Board geometry: positions, sizes, the viewport transform and angle helpers.
//!
//! Board space is the logical plane elements live in. Screen space is what the
//! render layer paints, obtained as `scale * board + (x, y)`:
//!
//! ```text
//! screen = viewport.scale * board + viewport.offset
//! board  = (screen - viewport.offset) / viewport.scale
//! ```

use serde::{Deserialize, Serialize};

/// A point in board space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a board-space delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of an element in board units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Floor both dimensions at `min`.
    #[must_use]
    pub fn floored(self, min: f64) -> Self {
        Self::new(self.width.max(min), self.height.max(min))
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(200.0, 100.0)
    }
}

/// A pointer location in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

impl Point {
    /// Create a screen point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Self) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Pan offset and zoom applied to the whole board.
///
/// `(x, y)` is where the board origin lands on screen; `scale` multiplies board
/// distances (1.0 = 100%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal pan offset in screen pixels.
    pub x: f64,
    /// Vertical pan offset in screen pixels.
    pub y: f64,
    /// Zoom multiplier.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Project a board position to screen space.
    #[must_use]
    pub fn board_to_screen(&self, position: Position) -> Point {
        Point::new(
            position.x * self.scale + self.x,
            position.y * self.scale + self.y,
        )
    }

    /// Map a screen point back into board space.
    #[must_use]
    pub fn screen_to_board(&self, point: Point) -> Position {
        Position::new(
            (point.x - self.x) / self.scale,
            (point.y - self.y) / self.scale,
        )
    }

    /// Convert a screen-space delta into board units.
    #[must_use]
    pub fn delta_to_board(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale, dy / self.scale)
    }
}

/// An axis-aligned rectangle in board space, before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Position,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(origin: Position, size: Size) -> Self {
        Self { origin, size }
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn far_corner(&self) -> Position {
        Position::new(
            self.origin.x + self.size.width,
            self.origin.y + self.size.height,
        )
    }

    /// Whether `p` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.height
    }
}

/// Fold any angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rotate `p` around `center` by `degrees` (clockwise on a y-down screen).
#[must_use]
pub fn rotate_about(p: Position, center: Position, degrees: f64) -> Position {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Position::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_viewport_round_trip() {
        let vp = Viewport::new(30.0, -12.0, 2.0);
        let p = Position::new(10.0, 5.0);
        let screen = vp.board_to_screen(p);
        assert!(close(screen.x, 50.0));
        assert!(close(screen.y, -2.0));
        let back = vp.screen_to_board(screen);
        assert!(close(back.x, p.x));
        assert!(close(back.y, p.y));
    }

    #[test]
    fn test_delta_to_board_divides_by_scale() {
        let vp = Viewport::new(0.0, 0.0, 4.0);
        let (dx, dy) = vp.delta_to_board(40.0, -8.0);
        assert!(close(dx, 10.0));
        assert!(close(dy, -2.0));
    }

    #[test]
    fn test_normalize_degrees() {
        assert!(close(normalize_degrees(0.0), 0.0));
        assert!(close(normalize_degrees(360.0), 0.0));
        assert!(close(normalize_degrees(-90.0), 270.0));
        assert!(close(normalize_degrees(725.0), 5.0));
        let tiny = normalize_degrees(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_rect_queries() {
        let r = Rect::new(Position::new(10.0, 20.0), Size::new(100.0, 50.0));
        assert_eq!(r.center(), Position::new(60.0, 45.0));
        assert_eq!(r.far_corner(), Position::new(110.0, 70.0));
        assert!(r.contains(Position::new(10.0, 20.0)));
        assert!(!r.contains(Position::new(9.9, 20.0)));
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let p = rotate_about(Position::new(1.0, 0.0), Position::default(), 90.0);
        assert!(close(p.x, 0.0));
        assert!(close(p.y, 1.0));
    }

    #[test]
    fn test_size_floor() {
        let s = Size::new(10.0, 80.0).floored(50.0);
        assert_eq!(s, Size::new(50.0, 80.0));
    }
}
