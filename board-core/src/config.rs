//! Tunable interaction parameters.

use serde::{Deserialize, Serialize};

use crate::{BoardError, BoardResult};

/// Minimum and maximum zoom multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    /// Smallest permitted scale.
    pub min: f64,
    /// Largest permitted scale.
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 10.0,
        }
    }
}

impl ZoomBounds {
    /// Clamp a scale into the bounds.
    ///
    /// Non-finite or non-positive input falls back to the lower bound. Bounds
    /// that are themselves unusable are replaced by the defaults, so the
    /// result is always finite and positive.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        let (min, max) = self.effective();
        if !scale.is_finite() || scale <= 0.0 {
            return min;
        }
        scale.max(min).min(max)
    }

    /// Check that `min` is finite and positive and `max` is finite and not
    /// below `min`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> BoardResult<()> {
        if !self.min.is_finite() || self.min <= 0.0 {
            return Err(BoardError::InvalidConfig(format!(
                "zoom.min must be a positive number, got {}",
                self.min
            )));
        }
        if !self.max.is_finite() || self.max < self.min {
            return Err(BoardError::InvalidConfig(format!(
                "zoom.max must be a number >= zoom.min ({}), got {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn effective(&self) -> (f64, f64) {
        let defaults = Self::default();
        let min = if self.min.is_finite() && self.min > 0.0 {
            self.min
        } else {
            defaults.min
        };
        let max = if self.max.is_finite() && self.max >= min {
            self.max
        } else {
            min.max(defaults.max)
        };
        (min, max)
    }
}

/// Configuration for the board and its gesture engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Floor applied to both dimensions of a resized element.
    pub min_element_size: f64,
    /// Added to the pointer angle while rotating. The rotation handle is drawn
    /// at top-center, which sits at -90 degrees from the element center.
    pub rotation_handle_offset_degrees: f64,
    /// Zoom limits enforced on every viewport write.
    pub zoom: ZoomBounds,
    /// Screen-pixel radius around a handle that still counts as a hit.
    pub handle_hit_radius: f64,
    /// Screen-pixel distance of the rotation handle above the top edge.
    pub rotation_handle_distance: f64,
    /// Multiplier applied per zoom step.
    pub zoom_step: f64,
    /// Divide drag and resize pointer deltas by the viewport scale, so the
    /// element tracks the pointer when zoomed. Off by default: the screen
    /// delta is applied to board geometry unchanged.
    pub scale_pointer_deltas: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_element_size: 50.0,
            rotation_handle_offset_degrees: 90.0,
            zoom: ZoomBounds::default(),
            handle_hit_radius: 8.0,
            rotation_handle_distance: 24.0,
            zoom_step: 1.1,
            scale_pointer_deltas: false,
        }
    }
}

impl BoardConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value fails
    /// [`BoardConfig::validate`].
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] for bad zoom bounds, a negative
    /// or non-finite size floor, or a zoom step that is not a positive number.
    pub fn validate(&self) -> BoardResult<()> {
        self.zoom.validate()?;
        if !self.min_element_size.is_finite() || self.min_element_size < 0.0 {
            return Err(BoardError::InvalidConfig(format!(
                "minElementSize must be a non-negative number, got {}",
                self.min_element_size
            )));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(BoardError::InvalidConfig(format!(
                "zoomStep must be a positive number, got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BoardConfig::default();
        assert!((config.min_element_size - 50.0).abs() < f64::EPSILON);
        assert!((config.rotation_handle_offset_degrees - 90.0).abs() < f64::EPSILON);
        assert!(!config.scale_pointer_deltas);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BoardConfig::from_json(r#"{"minElementSize": 20}"#).expect("parse");
        assert!((config.min_element_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.zoom, ZoomBounds::default());
    }

    #[test]
    fn test_zoom_clamp() {
        let bounds = ZoomBounds { min: 0.5, max: 2.0 };
        assert!((bounds.clamp(3.0) - 2.0).abs() < f64::EPSILON);
        assert!((bounds.clamp(0.1) - 0.5).abs() < f64::EPSILON);
        assert!((bounds.clamp(-1.0) - 0.5).abs() < f64::EPSILON);
        assert!((bounds.clamp(f64::NAN) - 0.5).abs() < f64::EPSILON);
        assert!((bounds.clamp(1.25) - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let result = BoardConfig::from_json(r#"{"zoom": {"min": 5, "max": 1}}"#);
        assert!(matches!(result, Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_zoom_min_rejected() {
        let result = BoardConfig::from_json(r#"{"zoom": {"min": 0, "max": 1}}"#);
        assert!(matches!(result, Err(BoardError::InvalidConfig(_))));
        let result = BoardConfig::from_json(r#"{"zoomStep": 0}"#);
        assert!(matches!(result, Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn test_clamp_survives_unusable_bounds() {
        let inverted = ZoomBounds { min: 5.0, max: 1.0 };
        assert!((inverted.clamp(3.0) - 5.0).abs() < f64::EPSILON);
        assert!((inverted.clamp(50.0) - 10.0).abs() < f64::EPSILON);

        let zero = ZoomBounds { min: 0.0, max: 1.0 };
        assert!((zero.clamp(-1.0) - 0.1).abs() < f64::EPSILON);
        assert!(zero.clamp(0.0) > 0.0);
    }
}
