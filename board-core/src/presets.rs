//! Toolbar placement presets.

use crate::element::{ElementKind, ElementStyle, NewElement, TextAlign};
use crate::geometry::{Point, Position, Size, Viewport};

/// Emoji offered by the sticker picker.
pub const STICKER_PALETTE: [&str; 16] = [
    "❤️", "💕", "🌟", "✨", "🌈", "🦄", "🌸", "🎉", "💖", "🥰", "😍", "🔥", "💯", "🎈", "🍀", "🌺",
];

/// Placeholder text of a fresh note.
pub const NOTE_PLACEHOLDER: &str = "Click to edit...";

/// A note with the default amber styling.
#[must_use]
pub fn note(position: Position) -> NewElement {
    NewElement::new(ElementKind::Note, NOTE_PLACEHOLDER)
        .with_position(position)
        .with_size(Size::new(200.0, 100.0))
        .with_style(ElementStyle {
            background_color: Some("#fef3c7".into()),
            color: Some("#92400e".into()),
            font_size: Some(14.0),
            padding: Some(12.0),
            border_radius: Some(8.0),
            font_family: Some("Inter".into()),
            box_shadow: Some("0 4px 6px -1px rgba(0, 0, 0, 0.1)".into()),
            ..ElementStyle::default()
        })
}

/// A heart sticker.
#[must_use]
pub fn sticker(position: Position) -> NewElement {
    NewElement::new(ElementKind::Sticker, STICKER_PALETTE[0])
        .with_position(position)
        .with_size(Size::new(80.0, 80.0))
        .with_style(ElementStyle {
            font_size: Some(48.0),
            text_align: Some(TextAlign::Center),
            cursor: Some("pointer".into()),
            border_radius: Some(8.0),
            ..ElementStyle::default()
        })
}

/// Build a preset at a clicked screen point.
///
/// Returns `None` for kinds that are created by the upload flow instead.
#[must_use]
pub fn place(kind: ElementKind, click: Point, viewport: &Viewport) -> Option<NewElement> {
    let position = viewport.screen_to_board(click);
    match kind {
        ElementKind::Note => Some(note(position)),
        ElementKind::Sticker => Some(sticker(position)),
        _ => None,
    }
}
