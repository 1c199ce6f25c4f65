//! Memory elements - the records placed on a board.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{normalize_degrees, rotate_about, Position, Rect, Size};

/// Unique, opaque identifier for an element.
///
/// Fresh ids are UUID v4 strings; ids loaded from a document are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The variant of content an element carries.
///
/// Gestures never look at this; it only drives rendering and the few
/// variant-specific operations (expand, unlock). Serialized as the bare
/// camelCase tag. A tag this version does not recognise is kept verbatim in
/// [`ElementKind::Unknown`] so saving a board never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    /// Editable sticky note.
    Note,
    /// Single-line text label.
    Label,
    /// Formatted text block.
    RichText,
    /// Card that toggles between collapsed and expanded sizes.
    Expandable,
    /// Content hidden behind a secret.
    Protected,
    /// Still image.
    Image,
    /// Video clip.
    Video,
    /// Animated GIF.
    Gif,
    /// Emoji sticker.
    Sticker,
    /// Embedded music link.
    Music,
    /// Embedded `YouTube` video, shown with its thumbnail.
    Youtube,
    /// Any tag this version does not recognise, as written.
    Unknown(String),
}

impl ElementKind {
    /// The persisted tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Note => "note",
            Self::Label => "label",
            Self::RichText => "richText",
            Self::Expandable => "expandable",
            Self::Protected => "protected",
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
            Self::Sticker => "sticker",
            Self::Music => "music",
            Self::Youtube => "youtube",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether the tag was recognised.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "note" => Self::Note,
            "label" => Self::Label,
            "richText" => Self::RichText,
            "expandable" => Self::Expandable,
            "protected" => Self::Protected,
            "image" => Self::Image,
            "video" => Self::Video,
            "gif" => Self::Gif,
            "sticker" => Self::Sticker,
            "music" => Self::Music,
            "youtube" => Self::Youtube,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Presentation attributes. Pure display data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl ElementStyle {
    /// Overlay every field set in `patch` onto `self`.
    pub fn merge(&mut self, patch: ElementStyle) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if patch.$field.is_some() { self.$field = patch.$field; })*
            };
        }
        take!(
            background_color,
            color,
            font_size,
            font_family,
            text_align,
            padding,
            border_radius,
            border,
            box_shadow,
            opacity,
            cursor
        );
    }
}

/// Variant-specific auxiliary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMetadata {
    /// Caption or title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form timestamp string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Tags. Replaced wholesale on merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// External link (embeds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Preview image for video/embeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Unlock secret for protected elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Size applied when an expandable element opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_size: Option<Size>,
    /// Size applied when an expandable element closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed_size: Option<Size>,
}

impl ElementMetadata {
    /// Overlay every field set in `patch` onto `self`.
    pub fn merge(&mut self, patch: ElementMetadata) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if patch.$field.is_some() { self.$field = patch.$field; })*
            };
        }
        take!(
            title,
            description,
            timestamp,
            tags,
            url,
            thumbnail_url,
            password,
            expanded_size,
            collapsed_size
        );
    }
}

/// Everything needed to create an element, minus the id the board assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    /// Variant tag.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Top-left corner in board space.
    pub position: Position,
    /// Extent in board units.
    pub size: Size,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Text, data URI or remote URL depending on `kind`.
    #[serde(default)]
    pub content: String,
    /// Presentation attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
    /// Auxiliary data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ElementMetadata>,
    /// Expandable state.
    #[serde(default)]
    pub is_expanded: bool,
    /// Protected state.
    #[serde(default)]
    pub is_locked: bool,
}

impl NewElement {
    /// Start a bundle with default geometry.
    #[must_use]
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            position: Position::default(),
            size: Size::default(),
            rotation: 0.0,
            content: content.into(),
            style: None,
            metadata: None,
            is_expanded: false,
            is_locked: false,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ElementMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Lock the element behind `secret`.
    #[must_use]
    pub fn locked_with(mut self, secret: impl Into<String>) -> Self {
        self.metadata.get_or_insert_with(ElementMetadata::default).password = Some(secret.into());
        self.is_locked = true;
        self
    }
}

/// A board element with identity, geometry and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier, immutable after creation.
    pub id: ElementId,
    /// Variant tag.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Top-left corner in board space.
    pub position: Position,
    /// Extent in board units.
    pub size: Size,
    /// Rotation in degrees, `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    /// Text, data URI or remote URL depending on `kind`.
    #[serde(default)]
    pub content: String,
    /// Presentation attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
    /// Auxiliary data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ElementMetadata>,
    /// Expandable state.
    #[serde(default)]
    pub is_expanded: bool,
    /// Protected state.
    #[serde(default)]
    pub is_locked: bool,
}

impl Element {
    /// Materialise a creation bundle under the given id.
    #[must_use]
    pub fn from_new(id: ElementId, new: NewElement) -> Self {
        Self {
            id,
            kind: new.kind,
            position: new.position,
            size: new.size,
            rotation: normalize_degrees(new.rotation),
            content: new.content,
            style: new.style,
            metadata: new.metadata,
            is_expanded: new.is_expanded,
            is_locked: new.is_locked,
        }
    }

    /// Unrotated bounding rectangle in board space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Check if a board-space point is within this element, honouring rotation.
    #[must_use]
    pub fn contains_point(&self, p: Position) -> bool {
        let rect = self.rect();
        let local = rotate_about(p, rect.center(), -self.rotation);
        rect.contains(local)
    }

    /// Unlock secret, if any.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.password.as_deref())
    }
}
