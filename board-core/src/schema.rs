//! Persisted board document.
//!
//! A single JSON object `{ "elements": [...], "viewport": {x, y, scale} }`
//! holding plain data only.

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::element::Element;
use crate::geometry::Viewport;
use crate::{Board, BoardResult};

/// Canonical board document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Elements in z-order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Pan and zoom.
    #[serde(default)]
    pub viewport: Viewport,
}

impl BoardDocument {
    /// Build a document from a runtime board.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            elements: board.elements().cloned().collect(),
            viewport: board.viewport(),
        }
    }

    /// Materialise a board with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BoardError::DuplicateId`] if two elements share an id.
    pub fn into_board(self, config: BoardConfig) -> BoardResult<Board> {
        let mut board = Board::with_config(config);
        board.set_viewport(self.viewport);
        for element in self.elements {
            board.insert(element)?;
        }
        Ok(board)
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a board.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
