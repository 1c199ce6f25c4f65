//! Pointer events delivered by the host event loop.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::handle::ResizeHandle;
use crate::ElementId;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
}

/// What a pointer-down landed on, as decided by hit testing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HitTarget {
    /// Empty board.
    Background,
    /// An element's body.
    Element {
        /// Element under the pointer.
        id: ElementId,
    },
    /// One of an element's resize handles.
    ResizeHandle {
        /// Element owning the handle.
        id: ElementId,
        /// Which handle.
        handle: ResizeHandle,
    },
    /// An element's rotation handle.
    RotateHandle {
        /// Element owning the handle.
        id: ElementId,
    },
}

impl HitTarget {
    /// Element involved in the hit, if any.
    #[must_use]
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            Self::Background => None,
            Self::Element { id } | Self::ResizeHandle { id, .. } | Self::RotateHandle { id } => {
                Some(id)
            }
        }
    }
}

/// A raw pointer event in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// Screen x.
    pub x: f64,
    /// Screen y.
    pub y: f64,
    /// Mouse button (0 = primary).
    #[serde(default)]
    pub button: u8,
    /// Hit-test result for `Down` events. When absent the board hit-tests itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<HitTarget>,
}

impl PointerEvent {
    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
            button: 0,
            target: None,
        }
    }

    /// Press at `(x, y)` with a known hit target.
    #[must_use]
    pub fn down_on(x: f64, y: f64, target: HitTarget) -> Self {
        Self {
            target: Some(target),
            ..Self::down(x, y)
        }
    }

    /// Pointer move to `(x, y)`.
    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Move,
            ..Self::down(x, y)
        }
    }

    /// Release at `(x, y)`.
    #[must_use]
    pub fn up(x: f64, y: f64) -> Self {
        Self {
            phase: PointerPhase::Up,
            ..Self::down(x, y)
        }
    }

    /// Event location as a screen point.
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the primary button generated this event.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.button == 0
    }
}
