//! Compass resize handles.
//!
//! Each handle grows or shrinks one or both dimensions. Handles on the north or
//! west side pin the opposite edge, so the origin moves to keep that edge still:
//!
//! ```text
//! handle  width  height  x shift  y shift
//! nw      -dx    -dy     +dx      +dy
//! n        0     -dy      0       +dy
//! ne      +dx    -dy      0       +dy
//! e       +dx     0       0        0
//! se      +dx    +dy      0        0
//! s        0     +dy      0        0
//! sw      -dx    +dy     +dx       0
//! w       -dx     0      +dx       0
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Position, Rect, Size};

/// One of the eight resize handles around an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    /// All handles, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// Sign applied to the horizontal delta when computing width.
    #[must_use]
    pub const fn width_sign(self) -> f64 {
        match self {
            Self::Ne | Self::E | Self::Se => 1.0,
            Self::Nw | Self::W | Self::Sw => -1.0,
            Self::N | Self::S => 0.0,
        }
    }

    /// Sign applied to the vertical delta when computing height.
    #[must_use]
    pub const fn height_sign(self) -> f64 {
        match self {
            Self::Se | Self::S | Self::Sw => 1.0,
            Self::Nw | Self::N | Self::Ne => -1.0,
            Self::E | Self::W => 0.0,
        }
    }

    /// Whether dragging this handle moves the left edge (right edge pinned).
    #[must_use]
    pub const fn moves_left_edge(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether dragging this handle moves the top edge (bottom edge pinned).
    #[must_use]
    pub const fn moves_top_edge(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Location of the handle on an unrotated rectangle, relative to its
    /// top-left corner, as fractions of the size.
    #[must_use]
    pub const fn unit_anchor(self) -> (f64, f64) {
        match self {
            Self::N => (0.5, 0.0),
            Self::Ne => (1.0, 0.0),
            Self::E => (1.0, 0.5),
            Self::Se => (1.0, 1.0),
            Self::S => (0.5, 1.0),
            Self::Sw => (0.0, 1.0),
            Self::W => (0.0, 0.5),
            Self::Nw => (0.0, 0.0),
        }
    }

    /// Board-space location of the handle on `rect`, before rotation.
    #[must_use]
    pub fn anchor(self, rect: &Rect) -> Position {
        let (fx, fy) = self.unit_anchor();
        Position::new(
            rect.origin.x + rect.size.width * fx,
            rect.origin.y + rect.size.height * fy,
        )
    }

    /// Resize `start` by a board-space pointer delta.
    ///
    /// Each dimension is floored at `min_size`. When an edge is pinned the
    /// origin is derived from the pinned edge, so the opposite side stays put
    /// even when the floor kicks in.
    #[must_use]
    pub fn resize(self, start: Rect, dx: f64, dy: f64, min_size: f64) -> Rect {
        let size = Size::new(
            start.size.width + self.width_sign() * dx,
            start.size.height + self.height_sign() * dy,
        )
        .floored(min_size);

        let far = start.far_corner();
        let x = if self.moves_left_edge() {
            far.x - size.width
        } else {
            start.origin.x
        };
        let y = if self.moves_top_edge() {
            far.y - size.height
        } else {
            start.origin.y
        };

        Rect::new(Position::new(x, y), size)
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        };
        f.write_str(name)
    }
}
