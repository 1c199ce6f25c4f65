//! Partial element updates.
//!
//! A patch names only the fields it changes. Applying it merges two levels
//! deep: top-level fields, then one level into `position`, `size`, `style` and
//! `metadata`. Anything deeper (the tag list) is replaced wholesale.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementMetadata, ElementStyle};
use crate::geometry::{normalize_degrees, Position, Size};

/// Partial update of a [`Position`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionPatch {
    /// New x, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl From<Position> for PositionPatch {
    fn from(p: Position) -> Self {
        Self {
            x: Some(p.x),
            y: Some(p.y),
        }
    }
}

/// Partial update of a [`Size`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizePatch {
    /// New width, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl From<Size> for SizePatch {
    fn from(s: Size) -> Self {
        Self {
            width: Some(s.width),
            height: Some(s.height),
        }
    }
}

/// A partial update to an [`Element`]. The id and variant never change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// Position fields to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionPatch>,
    /// Size fields to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizePatch>,
    /// New rotation in degrees; normalised on apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Replacement content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style fields to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
    /// Metadata fields to overwrite.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ElementMetadata>,
    /// New expanded flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    /// New locked flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

impl ElementPatch {
    /// Patch that moves an element.
    #[must_use]
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position.into()),
            ..Self::default()
        }
    }

    /// Patch that sets both size and position.
    #[must_use]
    pub fn bounds(position: Position, size: Size) -> Self {
        Self {
            position: Some(position.into()),
            size: Some(size.into()),
            ..Self::default()
        }
    }

    /// Patch that sets rotation.
    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    /// Patch that replaces content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch into `element`.
    pub fn apply(self, element: &mut Element) {
        if let Some(p) = self.position {
            if let Some(x) = p.x {
                element.position.x = x;
            }
            if let Some(y) = p.y {
                element.position.y = y;
            }
        }
        if let Some(s) = self.size {
            if let Some(width) = s.width {
                element.size.width = width;
            }
            if let Some(height) = s.height {
                element.size.height = height;
            }
        }
        if let Some(rotation) = self.rotation {
            element.rotation = normalize_degrees(rotation);
        }
        if let Some(content) = self.content {
            element.content = content;
        }
        if let Some(style) = self.style {
            match element.style {
                Some(ref mut current) => current.merge(style),
                None => element.style = Some(style),
            }
        }
        if let Some(metadata) = self.metadata {
            match element.metadata {
                Some(ref mut current) => current.merge(metadata),
                None => element.metadata = Some(metadata),
            }
        }
        if let Some(expanded) = self.is_expanded {
            element.is_expanded = expanded;
        }
        if let Some(locked) = self.is_locked {
            element.is_locked = locked;
        }
    }
}
