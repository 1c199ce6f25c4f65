//! Board interaction state: the board plus the sessions acting on it.

use crate::edit::ContentEditor;
use crate::element::ElementId;
use crate::event::{HitTarget, PointerEvent, PointerPhase};
use crate::gesture::{Commit, GestureEngine, Preview};
use crate::{Board, BoardResult};

/// What processing a pointer event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// A session started.
    Began(HitTarget),
    /// Live preview from the active session.
    Preview(Preview),
    /// A session finished and wrote to the board.
    Committed(Commit),
    /// The event had no effect.
    Ignored,
}

/// The complete interaction state of one open board.
#[derive(Debug, Default)]
pub struct BoardState {
    /// The element store.
    pub board: Board,
    /// The gesture engine.
    pub gestures: GestureEngine,
    /// Inline text edit in progress, if any.
    editor: Option<ContentEditor>,
    /// Whether there are unsaved local changes.
    pub has_local_changes: bool,
}

impl BoardState {
    /// Wrap a loaded board.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    /// Process a pointer event.
    ///
    /// On press, an element hit selects the element and starts a drag, resize
    /// or rotate; a background hit clears the selection and starts a pan.
    /// Only the primary button starts sessions.
    pub fn process_event(&mut self, event: &PointerEvent) -> EventOutcome {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self
                .gestures
                .on_pointer_move(&self.board, event.point())
                .map_or(EventOutcome::Ignored, EventOutcome::Preview),
            PointerPhase::Up => match self.gestures.on_pointer_up(&mut self.board) {
                Some(commit) => {
                    self.has_local_changes = true;
                    EventOutcome::Committed(commit)
                }
                None => EventOutcome::Ignored,
            },
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> EventOutcome {
        if !event.is_primary() || self.gestures.is_active() {
            tracing::debug!(button = event.button, "pointer down ignored");
            return EventOutcome::Ignored;
        }

        let pointer = event.point();
        let target = event
            .target
            .clone()
            .unwrap_or_else(|| self.board.hit_test(pointer));

        let began = match &target {
            HitTarget::Background => {
                self.board.deselect();
                self.gestures.begin_pan(&self.board, pointer)
            }
            HitTarget::Element { id } => self
                .board
                .select(id)
                .and_then(|()| self.gestures.begin_drag(&self.board, id, pointer)),
            HitTarget::ResizeHandle { id, handle } => self.board.select(id).and_then(|()| {
                self.gestures
                    .begin_resize(&self.board, id, *handle, pointer)
            }),
            HitTarget::RotateHandle { id } => self
                .board
                .select(id)
                .and_then(|()| self.gestures.begin_rotate(&self.board, id, pointer)),
        };

        match began {
            Ok(()) => EventOutcome::Began(target),
            Err(e) => {
                tracing::debug!("pointer down rejected: {e}");
                EventOutcome::Ignored
            }
        }
    }

    /// Delete an element. A running session on it aborts at its next event.
    pub fn delete(&mut self, id: &ElementId) -> bool {
        if self.editor.as_ref().is_some_and(|e| e.id() == id) {
            self.editor = None;
        }
        let removed = self.board.delete(id).is_some();
        self.has_local_changes |= removed;
        removed
    }

    /// Start editing an element's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn begin_edit(&mut self, id: &ElementId) -> BoardResult<()> {
        self.editor = Some(ContentEditor::begin(&self.board, id)?);
        Ok(())
    }

    /// Edit in progress.
    #[must_use]
    pub fn editor(&self) -> Option<&ContentEditor> {
        self.editor.as_ref()
    }

    /// Replace the draft text of the edit in progress.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.set_draft(text);
        }
    }

    /// Commit the edit in progress. Returns whether anything was written.
    pub fn commit_edit(&mut self) -> bool {
        let written = self
            .editor
            .take()
            .is_some_and(|editor| editor.commit(&mut self.board));
        self.has_local_changes |= written;
        written
    }

    /// Abandon the edit in progress.
    pub fn cancel_edit(&mut self) {
        if let Some(editor) = self.editor.take() {
            let _ = editor.cancel();
        }
    }

    /// Mark everything as saved.
    pub fn mark_saved(&mut self) {
        self.has_local_changes = false;
    }
}
