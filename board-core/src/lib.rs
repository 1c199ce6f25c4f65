//! # Board Core
//!
//! Direct-manipulation core for a memory board: notes, images, stickers and
//! embeds placed on a pannable, zoomable plane.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 board-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Element Store   │  Gesture Engine          │
//! │  - Elements      │  - Pan / drag            │
//! │  - Viewport      │  - Resize / rotate       │
//! │  - Patches       │  - Live preview          │
//! ├─────────────────────────────────────────────┤
//! │  Persistence     │  Interaction State       │
//! │  - Documents     │  - Hit testing           │
//! │  - Slots         │  - Inline editing        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Events flow one way per gesture: the host hit-tests a press and feeds
//! pointer events to the [`GestureEngine`]; moves yield [`Preview`]s for the
//! renderer; release writes one [`Commit`] to the [`Board`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod config;
pub mod edit;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod handle;
pub mod patch;
pub mod presets;
pub mod schema;
pub mod state;
pub mod store;

pub use board::Board;
pub use config::{BoardConfig, ZoomBounds};
pub use edit::ContentEditor;
pub use element::{
    Element, ElementId, ElementKind, ElementMetadata, ElementStyle, NewElement, TextAlign,
};
pub use error::{BoardError, BoardResult};
pub use event::{HitTarget, PointerEvent, PointerPhase};
pub use geometry::{normalize_degrees, Point, Position, Rect, Size, Viewport};
pub use gesture::{Commit, ElementPreview, GestureEngine, GestureKind, Preview};
pub use handle::ResizeHandle;
pub use patch::{ElementPatch, PositionPatch, SizePatch};
pub use schema::BoardDocument;
pub use state::{BoardState, EventOutcome};
pub use store::{BoardStore, StoreError, DEFAULT_SLOT};

/// Board core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
