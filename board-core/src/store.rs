//! Slot-keyed board persistence.
//!
//! A [`BoardStore`] keeps one [`BoardDocument`] per named slot, optionally
//! mirrored to `<data_dir>/<slot>.json`. Loading never fails: a missing or
//! corrupt slot yields the default empty board. Slot names are limited to
//! letters, digits, `-` and `_`, so each name maps to exactly one file.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::config::BoardConfig;
use crate::{Board, BoardDocument};

/// Default storage slot.
pub const DEFAULT_SLOT: &str = "memory-board";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An operation needed a data directory and none is configured.
    #[error("No data directory configured")]
    NoDataDir,
    /// Slot names must be non-empty and use only letters, digits, `-` and `_`.
    #[error("Invalid slot name: {0:?}")]
    InvalidSlot(String),
}

/// Board documents keyed by slot name.
///
/// # Example
///
/// ```
/// use board_core::store::{BoardStore, DEFAULT_SLOT};
/// use board_core::{presets, Position};
///
/// let mut store = BoardStore::new();
/// let mut board = store.load(DEFAULT_SLOT);
/// board.create(presets::note(Position::new(10.0, 10.0)));
/// store.save(DEFAULT_SLOT, &board).unwrap();
///
/// assert_eq!(store.load(DEFAULT_SLOT).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    slots: HashMap<String, BoardDocument>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
    /// Configuration handed to every loaded board.
    config: BoardConfig,
}

impl BoardStore {
    /// Create an in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with filesystem persistence.
    ///
    /// The directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir: Some(data_dir),
            ..Self::default()
        })
    }

    /// Use `config` for boards loaded from now on.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Data directory, if persistence is enabled.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Load the board in `slot`.
    ///
    /// Memory wins over disk. A missing, unreadable or malformed slot yields
    /// an empty board, as does an invalid slot name.
    pub fn load(&mut self, slot: &str) -> Board {
        if let Err(e) = check_slot(slot) {
            tracing::warn!("{e}, starting empty");
            return Board::with_config(self.config.clone());
        }
        let doc = match self.slots.get(slot) {
            Some(doc) => doc.clone(),
            None => {
                let doc = self.read_slot(slot).unwrap_or_default();
                self.slots.insert(slot.to_string(), doc.clone());
                doc
            }
        };
        match doc.into_board(self.config.clone()) {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!("Slot {slot} is inconsistent, starting empty: {e}");
                Board::with_config(self.config.clone())
            }
        }
    }

    /// Store `board` in `slot`, writing it to disk when persistence is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSlot`] for a bad slot name, or an error if
    /// serialization or the file write fails. The in-memory copy is updated
    /// whenever the name is valid.
    pub fn save(&mut self, slot: &str, board: &Board) -> Result<(), StoreError> {
        check_slot(slot)?;
        let doc = BoardDocument::from_board(board);
        self.slots.insert(slot.to_string(), doc.clone());
        let Some(ref data_dir) = self.data_dir else {
            return Ok(());
        };
        let json = doc
            .to_json()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(slot_path(data_dir, slot), json)?;
        tracing::debug!(slot, elements = board.len(), "saved board");
        Ok(())
    }

    /// Forget a slot in memory and on disk. Returns whether anything existed.
    pub fn delete_slot(&mut self, slot: &str) -> bool {
        if check_slot(slot).is_err() {
            return false;
        }
        let mut existed = self.slots.remove(slot).is_some();
        if let Some(ref data_dir) = self.data_dir {
            let path = slot_path(data_dir, slot);
            if path.exists() {
                match std::fs::remove_file(&path) {
                    Ok(()) => existed = true,
                    Err(e) => {
                        tracing::warn!("Failed to delete slot file {}: {e}", path.display());
                    }
                }
            }
        }
        existed
    }

    /// All known slot names, in memory or on disk, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory can't be read.
    pub fn slot_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: BTreeSet<String> = self.slots.keys().cloned().collect();
        if let Some(ref data_dir) = self.data_dir {
            for entry in std::fs::read_dir(data_dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        ids.insert(stem.to_string());
                    }
                }
            }
        }
        Ok(ids.into_iter().collect())
    }

    /// Raw persisted form of a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSlot`] for a bad slot name,
    /// [`StoreError::NoDataDir`] without persistence, or the I/O and parse
    /// errors that [`BoardStore::load`] swallows.
    pub fn read_document(&self, slot: &str) -> Result<BoardDocument, StoreError> {
        check_slot(slot)?;
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let contents = std::fs::read_to_string(slot_path(data_dir, slot))?;
        BoardDocument::from_json(&contents).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn read_slot(&self, slot: &str) -> Option<BoardDocument> {
        let data_dir = self.data_dir.as_ref()?;
        let path = slot_path(data_dir, slot);
        if !path.exists() {
            return None;
        }
        match self.read_document(slot) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("Failed to load slot {slot} from {}: {e}", path.display());
                None
            }
        }
    }
}

/// Reject names that are empty or would be altered by [`sanitize_filename`],
/// so two slots can never share a file.
fn check_slot(slot: &str) -> Result<(), StoreError> {
    if slot.is_empty() || sanitize_filename(slot) != slot {
        return Err(StoreError::InvalidSlot(slot.to_string()));
    }
    Ok(())
}

fn slot_path(data_dir: &Path, slot: &str) -> PathBuf {
    data_dir.join(format!("{}.json", sanitize_filename(slot)))
}

/// Sanitize a slot name for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(slot: &str) -> String {
    slot.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
