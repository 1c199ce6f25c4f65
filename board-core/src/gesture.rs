//! # Pointer Gesture Engine
//!
//! Turns a pointer-down / move / up stream into exactly one of four sessions:
//!
//! ```text
//! Idle --down on background-------> Pan     --up--> Idle  [viewport commit]
//! Idle --down on element body-----> Drag    --up--> Idle  [position commit]
//! Idle --down on resize handle----> Resize  --up--> Idle  [size + position commit]
//! Idle --down on rotation handle--> Rotate  --up--> Idle  [rotation commit]
//! any active --move--> same state [live preview, no store write]
//! ```
//!
//! Only one session runs at a time, engine-wide. Each session owns its
//! captured start state; the board is only written once, on release. Moves
//! produce a [`Preview`] that goes to the registered listener and is also
//! returned to the caller.
//!
//! Drag and resize add the pointer delta to the start geometry as is. With
//! [`crate::BoardConfig::scale_pointer_deltas`] set, the delta is first
//! divided by the viewport scale captured when the session began.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::geometry::{normalize_degrees, Point, Position, Rect, Size, Viewport};
use crate::handle::ResizeHandle;
use crate::patch::ElementPatch;
use crate::{Board, BoardError, BoardResult};

/// The four kinds of session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Viewport pan.
    Pan,
    /// Element reposition.
    Drag,
    /// Element resize from a handle.
    Resize,
    /// Element rotation.
    Rotate,
}

impl GestureKind {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Rotate => "rotate",
        }
    }
}

impl std::fmt::Display for GestureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient geometry for an element under manipulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPreview {
    /// Element being manipulated.
    pub id: ElementId,
    /// Live position, if the gesture moves the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Live size, if the gesture resizes the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Live rotation, if the gesture rotates the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Visual-only update emitted on every move of an active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum Preview {
    /// Live viewport while panning.
    Viewport(Viewport),
    /// Live element geometry while dragging, resizing or rotating.
    Element(ElementPreview),
}

/// The single store write made when a session completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum Commit {
    /// Viewport replaced.
    Viewport(Viewport),
    /// Element patched.
    Element {
        /// Patched element.
        id: ElementId,
        /// Patch that was applied.
        patch: ElementPatch,
    },
}

#[derive(Debug, Clone)]
struct PanSession {
    last: Point,
    viewport: Viewport,
}

#[derive(Debug, Clone)]
struct DragSession {
    id: ElementId,
    start_pointer: Point,
    start: Position,
    scale: f64,
    current: Position,
}

#[derive(Debug, Clone)]
struct ResizeSession {
    id: ElementId,
    handle: ResizeHandle,
    start_pointer: Point,
    start: Rect,
    scale: f64,
    current: Rect,
}

#[derive(Debug, Clone)]
struct RotateSession {
    id: ElementId,
    degrees: f64,
}

#[derive(Debug, Clone)]
enum Session {
    Pan(PanSession),
    Drag(DragSession),
    Resize(ResizeSession),
    Rotate(RotateSession),
}

impl Session {
    fn kind(&self) -> GestureKind {
        match self {
            Self::Pan(_) => GestureKind::Pan,
            Self::Drag(_) => GestureKind::Drag,
            Self::Resize(_) => GestureKind::Resize,
            Self::Rotate(_) => GestureKind::Rotate,
        }
    }

    fn target(&self) -> Option<&ElementId> {
        match self {
            Self::Pan(_) => None,
            Self::Drag(s) => Some(&s.id),
            Self::Resize(s) => Some(&s.id),
            Self::Rotate(s) => Some(&s.id),
        }
    }
}

type PreviewListener = Box<dyn FnMut(&Preview)>;

/// Owner of the one active gesture session.
#[derive(Default)]
pub struct GestureEngine {
    session: Option<Session>,
    listener: Option<PreviewListener>,
}

impl std::fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEngine")
            .field("session", &self.session)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl GestureEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback that receives every live preview.
    pub fn set_preview_listener(&mut self, listener: impl FnMut(&Preview) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Drop the preview callback.
    pub fn clear_preview_listener(&mut self) {
        self.listener = None;
    }

    /// Whether a session is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Kind of the running session.
    #[must_use]
    pub fn active_kind(&self) -> Option<GestureKind> {
        self.session.as_ref().map(Session::kind)
    }

    /// Element targeted by the running session.
    #[must_use]
    pub fn target(&self) -> Option<&ElementId> {
        self.session.as_ref().and_then(Session::target)
    }

    // -----------------------------------------------------------------------
    // Session entry points
    // -----------------------------------------------------------------------

    /// Start panning the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::GestureActive`] if a session is already running.
    pub fn begin_pan(&mut self, board: &Board, pointer: Point) -> BoardResult<()> {
        self.ensure_idle()?;
        self.start(Session::Pan(PanSession {
            last: pointer,
            viewport: board.viewport(),
        }));
        Ok(())
    }

    /// Start dragging an element.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::GestureActive`] if a session is already running,
    /// or [`BoardError::ElementNotFound`] if the element does not exist.
    pub fn begin_drag(&mut self, board: &Board, id: &ElementId, pointer: Point) -> BoardResult<()> {
        self.ensure_idle()?;
        let element = board
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        self.start(Session::Drag(DragSession {
            id: id.clone(),
            start_pointer: pointer,
            start: element.position,
            scale: delta_divisor(board),
            current: element.position,
        }));
        Ok(())
    }

    /// Start resizing an element from `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::GestureActive`] if a session is already running,
    /// or [`BoardError::ElementNotFound`] if the element does not exist.
    pub fn begin_resize(
        &mut self,
        board: &Board,
        id: &ElementId,
        handle: ResizeHandle,
        pointer: Point,
    ) -> BoardResult<()> {
        self.ensure_idle()?;
        let element = board
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        self.start(Session::Resize(ResizeSession {
            id: id.clone(),
            handle,
            start_pointer: pointer,
            start: element.rect(),
            scale: delta_divisor(board),
            current: element.rect(),
        }));
        Ok(())
    }

    /// Start rotating an element.
    ///
    /// Until the first move the session holds the element's current rotation,
    /// so a press and release without movement changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::GestureActive`] if a session is already running,
    /// or [`BoardError::ElementNotFound`] if the element does not exist.
    pub fn begin_rotate(&mut self, board: &Board, id: &ElementId, _pointer: Point) -> BoardResult<()> {
        self.ensure_idle()?;
        let element = board
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        self.start(Session::Rotate(RotateSession {
            id: id.clone(),
            degrees: element.rotation,
        }));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Move / release
    // -----------------------------------------------------------------------

    /// Feed a pointer move to the active session.
    ///
    /// Returns the live preview, or `None` when idle or when the target
    /// vanished (which aborts the session).
    pub fn on_pointer_move(&mut self, board: &Board, pointer: Point) -> Option<Preview> {
        if let Some(id) = self.target() {
            if !board.contains(id) {
                self.abort("target vanished during move");
                return None;
            }
        }

        let config = board.config();
        let preview = match self.session.as_mut()? {
            Session::Pan(s) => {
                let (dx, dy) = pointer.delta_from(s.last);
                s.viewport.x += dx;
                s.viewport.y += dy;
                s.last = pointer;
                Preview::Viewport(s.viewport)
            }
            Session::Drag(s) => {
                let (dx, dy) = pointer.delta_from(s.start_pointer);
                s.current = s.start.offset(dx / s.scale, dy / s.scale);
                Preview::Element(ElementPreview {
                    id: s.id.clone(),
                    position: Some(s.current),
                    size: None,
                    rotation: None,
                })
            }
            Session::Resize(s) => {
                let (dx, dy) = pointer.delta_from(s.start_pointer);
                s.current = s.handle.resize(
                    s.start,
                    dx / s.scale,
                    dy / s.scale,
                    config.min_element_size,
                );
                Preview::Element(ElementPreview {
                    id: s.id.clone(),
                    position: Some(s.current.origin),
                    size: Some(s.current.size),
                    rotation: None,
                })
            }
            Session::Rotate(s) => {
                let element = board.get(&s.id)?;
                let center = board.viewport().board_to_screen(element.rect().center());
                s.degrees = pointer_angle(center, pointer, config.rotation_handle_offset_degrees);
                Preview::Element(ElementPreview {
                    id: s.id.clone(),
                    position: None,
                    size: None,
                    rotation: Some(s.degrees),
                })
            }
        };

        if let Some(listener) = self.listener.as_mut() {
            listener(&preview);
        }
        Some(preview)
    }

    /// End the active session and write its result to the board.
    ///
    /// Returns the commit that was applied, or `None` when idle or when the
    /// target vanished before release.
    pub fn on_pointer_up(&mut self, board: &mut Board) -> Option<Commit> {
        let session = self.session.take()?;
        let kind = session.kind();

        if let Some(id) = session.target() {
            if !board.contains(id) {
                tracing::debug!(gesture = %kind, element = %id, "target vanished, session aborted");
                return None;
            }
        }

        let min_size = board.config().min_element_size;
        let commit = match session {
            Session::Pan(s) => {
                board.set_viewport(s.viewport);
                Commit::Viewport(board.viewport())
            }
            Session::Drag(s) => {
                let patch = ElementPatch::position(s.current);
                board.update(&s.id, patch.clone());
                Commit::Element { id: s.id, patch }
            }
            Session::Resize(s) => {
                let bounds = s.handle.resize(s.current, 0.0, 0.0, min_size);
                let patch = ElementPatch::bounds(bounds.origin, bounds.size);
                board.update(&s.id, patch.clone());
                Commit::Element { id: s.id, patch }
            }
            Session::Rotate(s) => {
                let patch = ElementPatch::rotation(normalize_degrees(s.degrees));
                board.update(&s.id, patch.clone());
                Commit::Element { id: s.id, patch }
            }
        };

        tracing::debug!(gesture = %kind, "session committed");
        Some(commit)
    }

    fn ensure_idle(&self) -> BoardResult<()> {
        match self.active_kind() {
            Some(kind) => {
                tracing::debug!(gesture = %kind, "begin rejected, session already active");
                Err(BoardError::GestureActive(kind.as_str()))
            }
            None => Ok(()),
        }
    }

    fn start(&mut self, session: Session) {
        tracing::debug!(gesture = %session.kind(), element = ?session.target(), "session started");
        self.session = Some(session);
    }

    fn abort(&mut self, reason: &str) {
        if let Some(session) = self.session.take() {
            tracing::debug!(gesture = %session.kind(), reason, "session aborted");
        }
    }
}

fn delta_divisor(board: &Board) -> f64 {
    if board.config().scale_pointer_deltas {
        board.viewport().scale
    } else {
        1.0
    }
}

/// Angle of `pointer` around `center` in degrees, shifted by `offset` and
/// folded into `[0, 360)`.
///
/// With an offset of 90 a pointer straight above the center reads 0, which
/// matches a rotation handle drawn at top-center.
#[must_use]
pub fn pointer_angle(center: Point, pointer: Point, offset: f64) -> f64 {
    let (dx, dy) = pointer.delta_from(center);
    normalize_degrees(dy.atan2(dx).to_degrees() + offset)
}
