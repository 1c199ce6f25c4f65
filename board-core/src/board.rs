//! The element store: ordered elements, viewport and selection.
//!
//! Insertion order is z-order; later elements paint on top. All writes go
//! through [`Board::create`], [`Board::update`], [`Board::delete`] and
//! [`Board::set_viewport`], each of which is a single indivisible assignment.

use crate::config::BoardConfig;
use crate::element::{Element, ElementId, NewElement};
use crate::event::HitTarget;
use crate::geometry::{rotate_about, Point, Position, Viewport};
use crate::handle::ResizeHandle;
use crate::patch::ElementPatch;
use crate::{BoardError, BoardResult};

/// A board holding every element and the viewport.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Elements in z-order.
    elements: Vec<Element>,
    /// Pan and zoom.
    viewport: Viewport,
    /// Currently selected element.
    selected: Option<ElementId>,
    /// Interaction parameters.
    config: BoardConfig,
}

impl Board {
    /// Create an empty board with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty board with the given configuration.
    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Replace the configuration. The viewport is re-clamped to the new zoom bounds.
    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
        let viewport = self.viewport;
        self.set_viewport(viewport);
    }

    // -----------------------------------------------------------------------
    // Elements
    // -----------------------------------------------------------------------

    /// Create an element from a bundle, assign it a fresh id, put it on top
    /// and select it.
    pub fn create(&mut self, new: NewElement) -> Element {
        let mut id = ElementId::new();
        while self.contains(&id) {
            id = ElementId::new();
        }
        let element = Element::from_new(id.clone(), new);
        tracing::debug!(element = %id, kind = ?element.kind, "created element");
        self.elements.push(element.clone());
        self.selected = Some(id);
        element
    }

    /// Insert a fully formed element, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateId`] if the id is already present.
    pub fn insert(&mut self, element: Element) -> BoardResult<()> {
        if self.contains(&element.id) {
            return Err(BoardError::DuplicateId(element.id.to_string()));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Merge a patch into an element.
    ///
    /// Returns `false` without touching anything if the id is unknown.
    pub fn update(&mut self, id: &ElementId, patch: ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) else {
            tracing::debug!(element = %id, "update on missing element ignored");
            return false;
        };
        patch.apply(element);
        true
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: &ElementId) -> Option<Element> {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        let index = self.elements.iter().position(|e| &e.id == id)?;
        tracing::debug!(element = %id, "deleted element");
        Some(self.elements.remove(index))
    }

    /// Remove every element and reset the viewport.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
        self.viewport = Viewport::default();
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Elements bottom to top.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    /// Get the number of elements on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select an element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn select(&mut self, id: &ElementId) -> BoardResult<()> {
        if !self.contains(id) {
            return Err(BoardError::ElementNotFound(id.to_string()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Id of the selected element.
    #[must_use]
    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// The selected element.
    #[must_use]
    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    // -----------------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------------

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the viewport. Scale is clamped to the configured zoom bounds.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Viewport {
            scale: self.config.zoom.clamp(viewport.scale),
            ..viewport
        };
    }

    /// Back to the origin at 100%.
    pub fn reset_viewport(&mut self) {
        self.viewport = Viewport::default();
    }

    /// Multiply the scale by `factor`, keeping the board point under `anchor`
    /// where it is on screen.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        let focus = self.viewport.screen_to_board(anchor);
        let scale = self.config.zoom.clamp(self.viewport.scale * factor);
        self.viewport = Viewport::new(
            anchor.x - focus.x * scale,
            anchor.y - focus.y * scale,
            scale,
        );
    }

    /// One configured zoom step in or out around `anchor`.
    pub fn zoom_step(&mut self, zoom_in: bool, anchor: Point) {
        let step = self.config.zoom_step;
        let factor = if zoom_in { step } else { step.recip() };
        self.zoom_at(factor, anchor);
    }

    // -----------------------------------------------------------------------
    // Variant operations
    // -----------------------------------------------------------------------

    /// Flip an element's expanded flag, applying the stored size for the new
    /// state if the metadata has one. Returns the new flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn toggle_expanded(&mut self, id: &ElementId) -> BoardResult<bool> {
        let element = self
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        let expanded = !element.is_expanded;
        let size = element.metadata.as_ref().and_then(|m| {
            if expanded {
                m.expanded_size
            } else {
                m.collapsed_size
            }
        });
        self.update(
            id,
            ElementPatch {
                is_expanded: Some(expanded),
                size: size.map(Into::into),
                ..ElementPatch::default()
            },
        );
        Ok(expanded)
    }

    /// Unlock a protected element.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::WrongSecret`] if `secret` does not match; nothing
    /// is changed in that case.
    pub fn unlock(&mut self, id: &ElementId, secret: &str) -> BoardResult<()> {
        let element = self
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        if element.secret() != Some(secret) {
            tracing::debug!(element = %id, "unlock rejected");
            return Err(BoardError::WrongSecret(id.to_string()));
        }
        self.update(
            id,
            ElementPatch {
                is_locked: Some(false),
                ..ElementPatch::default()
            },
        );
        Ok(())
    }

    /// Lock an element that carries a secret.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotProtected`] if the element has no secret.
    pub fn lock(&mut self, id: &ElementId) -> BoardResult<()> {
        let element = self
            .get(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))?;
        if element.secret().is_none() {
            return Err(BoardError::NotProtected(id.to_string()));
        }
        self.update(
            id,
            ElementPatch {
                is_locked: Some(true),
                ..ElementPatch::default()
            },
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Hit testing
    // -----------------------------------------------------------------------

    /// Find the topmost element under a screen point.
    #[must_use]
    pub fn element_at(&self, point: Point) -> Option<&ElementId> {
        let p = self.viewport.screen_to_board(point);
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(p))
            .map(|e| &e.id)
    }

    /// Screen location of an element's rotation handle.
    #[must_use]
    pub fn rotation_handle_at(&self, element: &Element) -> Point {
        let rect = element.rect();
        let top_center = Position::new(
            rect.origin.x + rect.size.width / 2.0,
            rect.origin.y - self.config.rotation_handle_distance / self.viewport.scale,
        );
        let p = rotate_about(top_center, rect.center(), element.rotation);
        self.viewport.board_to_screen(p)
    }

    /// Screen location of one of an element's resize handles.
    #[must_use]
    pub fn resize_handle_at(&self, element: &Element, handle: ResizeHandle) -> Point {
        let rect = element.rect();
        let p = rotate_about(handle.anchor(&rect), rect.center(), element.rotation);
        self.viewport.board_to_screen(p)
    }

    /// Classify a pointer-down location.
    ///
    /// Handles are only live on the selected element and win over any body
    /// underneath them.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> HitTarget {
        if let Some(selected) = self.selected() {
            let radius = self.config.handle_hit_radius;
            let near = |h: Point| {
                let (dx, dy) = point.delta_from(h);
                dx.hypot(dy) <= radius
            };
            if near(self.rotation_handle_at(selected)) {
                return HitTarget::RotateHandle {
                    id: selected.id.clone(),
                };
            }
            if let Some(handle) = ResizeHandle::ALL
                .into_iter()
                .find(|&h| near(self.resize_handle_at(selected, h)))
            {
                return HitTarget::ResizeHandle {
                    id: selected.id.clone(),
                    handle,
                };
            }
        }
        match self.element_at(point) {
            Some(id) => HitTarget::Element { id: id.clone() },
            None => HitTarget::Background,
        }
    }
}
