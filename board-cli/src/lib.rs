//! # Memory Board CLI
//!
//! Command-line host for a Memory Board. Loads a board from a persistence
//! slot, drives it, and saves it back.
//!
//! ## Usage
//!
//! ```bash
//! board --data-dir ./boards replay drag.jsonl
//! board --data-dir ./boards add-note --x 120 --y 80 --text "Groceries"
//! board --data-dir ./boards show --json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved slot, data directory and board configuration
//! - `replay` - Feeds a recorded pointer script through `BoardState`
//! - `commands` - One function per subcommand

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod commands;
pub mod replay;

use std::path::PathBuf;

use board_core::{BoardConfig, BoardError, BoardStore, StoreError, DEFAULT_SLOT};
use clap::{Parser, Subcommand};

pub use commands::run;
pub use replay::{parse_script, replay, ReplayReport};

/// Errors raised by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Board operation failed.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A script line is not a pointer event.
    #[error("script line {line}: {source}")]
    Script {
        /// 1-based line number.
        line: usize,
        /// Parse failure.
        source: serde_json::Error,
    },
    /// Output could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Command-line arguments for the board CLI.
#[derive(Debug, Clone, Parser)]
#[command(name = "board")]
#[command(about = "Memory Board command-line host")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding `<slot>.json` files. Without it boards live in memory only.
    #[arg(long, global = true, env = "BOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Persistence slot to operate on
    #[arg(long, global = true, env = "BOARD_SLOT", default_value = DEFAULT_SLOT)]
    pub slot: String,

    /// JSON file with board configuration overrides
    #[arg(long, global = true, env = "BOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Board subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a JSON-lines pointer event script and save the result
    Replay {
        /// Script path; one pointer event per line
        script: PathBuf,
        /// Print outcomes without saving
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the board
    Show {
        /// Print the persisted JSON document instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Place a note at a screen point
    AddNote {
        /// Screen x of the click
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Screen y of the click
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Note text
        #[arg(long)]
        text: Option<String>,
    },
    /// Place a sticker at a screen point
    AddSticker {
        /// Screen x of the click
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Screen y of the click
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Emoji to show
        #[arg(long)]
        emoji: Option<String>,
    },
    /// Delete an element
    Delete {
        /// Element id
        id: String,
    },
    /// Unlock a protected element
    Unlock {
        /// Element id
        id: String,
        /// Unlock secret
        secret: String,
    },
    /// Remove every element and reset the viewport
    Clear,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory for persistence.
    pub data_dir: Option<PathBuf>,
    /// Slot to load and save.
    pub slot: String,
    /// Board configuration file.
    pub config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CliConfig {
    /// In-memory configuration on the default slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: None,
            slot: DEFAULT_SLOT.to_string(),
            config_path: None,
        }
    }

    /// Read the board configuration, or the defaults when no file is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid JSON.
    pub fn board_config(&self) -> Result<BoardConfig, CliError> {
        let Some(ref path) = self.config_path else {
            return Ok(BoardConfig::default());
        };
        let json = std::fs::read_to_string(path)?;
        let config = BoardConfig::from_json(&json)?;
        tracing::debug!("Loaded board config from {}", path.display());
        Ok(config)
    }

    /// Open the store described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or data directory is unusable.
    pub fn open_store(&self) -> Result<BoardStore, CliError> {
        let config = self.board_config()?;
        let store = match self.data_dir {
            Some(ref dir) => BoardStore::with_data_dir(dir)?,
            None => {
                tracing::warn!("No data directory configured, changes will not be persisted");
                BoardStore::new()
            }
        };
        Ok(store.with_config(config))
    }
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            slot: args.slot.clone(),
            config_path: args.config.clone(),
        }
    }
}
