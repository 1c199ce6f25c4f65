//! Inline content editing.
//!
//! Separate from the gesture engine: editing changes an element's content,
//! never its geometry, and unlike gestures it can be cancelled.

use crate::element::ElementId;
use crate::patch::ElementPatch;
use crate::{Board, BoardError, BoardResult};

/// An in-progress text edit on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEditor {
    id: ElementId,
    original: String,
    draft: String,
}

impl ContentEditor {
    /// Start editing an element's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn begin(board: &Board, id: &ElementId) -> BoardResult<Self> {
        let element = board
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        Ok(Self {
            id: id.clone(),
            original: element.content.clone(),
            draft: element.content.clone(),
        })
    }

    /// Element being edited.
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Current draft text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the draft differs from the content at edit start.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Write the draft to the board. Returns `false` if the element vanished.
    pub fn commit(self, board: &mut Board) -> bool {
        board.update(&self.id, ElementPatch::content(self.draft))
    }

    /// Abandon the edit and return the original content. Nothing is written.
    #[must_use]
    pub fn cancel(self) -> String {
        self.original
    }
}
