// src/zoom_config.rs
use crate::error::ZoomError;
use serde::{Deserialize, Serialize};
use web_sys::Document;

/// Id of the inline `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "zoomable-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub zoom_step: f64,
    pub min_zoom_factor: f64,
    pub max_zoom_factor: f64,
    pub ratio_mismatch_threshold: f64,
    pub mismatch_base_scale: f64,
    pub loading_text: String,
    pub fallback_alt: String,
    pub labels: ControlLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLabels {
    pub dialog: String,
    pub zoom_in: String,
    pub zoom_out: String,
    pub close: String,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.5,
            min_zoom_factor: 0.5,
            max_zoom_factor: 4.0,
            ratio_mismatch_threshold: 0.75,
            mismatch_base_scale: 1.75,
            loading_text: String::from("Loading Image..."),
            fallback_alt: String::from("Enlarged image view"),
            labels: ControlLabels::default(),
        }
    }
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            dialog: String::from("Image fullscreen modal"),
            zoom_in: String::from("Zoom in"),
            zoom_out: String::from("Zoom out"),
            close: String::from("Close fullscreen view"),
        }
    }
}

impl ZoomConfig {
    pub fn from_json(json: &str) -> Result<Self, ZoomError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would let zooming escape its bounds.
    pub fn validate(&self) -> Result<(), ZoomError> {
        let invalid = |message: String| Err(ZoomError::InvalidConfig(message));
        if !(self.zoom_step > 1.0) {
            return invalid(format!("zoom_step must be greater than 1, got {}", self.zoom_step));
        }
        if !(self.min_zoom_factor > 0.0) || !(self.max_zoom_factor > 0.0) {
            return invalid(format!(
                "zoom factors must be positive, got {} and {}",
                self.min_zoom_factor, self.max_zoom_factor
            ));
        }
        if self.min_zoom_factor > self.max_zoom_factor {
            return invalid(format!(
                "min_zoom_factor {} exceeds max_zoom_factor {}",
                self.min_zoom_factor, self.max_zoom_factor
            ));
        }
        if !(self.mismatch_base_scale > 0.0) {
            return invalid(format!(
                "mismatch_base_scale must be positive, got {}",
                self.mismatch_base_scale
            ));
        }
        Ok(())
    }

    /// Read overrides from the page, falling back to defaults.
    pub fn from_document(document: &Document) -> Self {
        let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let json = element.text_content().unwrap_or_default();
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded zoomable configuration from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                log::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn min_scale(&self, base_scale: f64) -> f64 {
        base_scale * self.min_zoom_factor
    }

    pub fn max_scale(&self, base_scale: f64) -> f64 {
        base_scale * self.max_zoom_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ZoomConfig::default();
        assert_eq!(config.zoom_step, 1.5);
        assert_eq!(config.min_scale(1.0), 0.5);
        assert_eq!(config.max_scale(1.75), 7.0);
        assert_eq!(config.fallback_alt, "Enlarged image view");
        assert_eq!(config.labels.close, "Close fullscreen view");
    }

    #[test]
    fn test_partial_override() {
        let config =
            ZoomConfig::from_json(r#"{"zoom_step": 2.0, "labels": {"close": "Cerrar"}}"#).unwrap();
        assert_eq!(config.zoom_step, 2.0);
        assert_eq!(config.max_zoom_factor, 4.0);
        assert_eq!(config.labels.close, "Cerrar");
        assert_eq!(config.labels.zoom_in, "Zoom in");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(ZoomConfig::from_json("{}").unwrap(), ZoomConfig::default());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(ZoomConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zoom_step_not_above_one() {
        for json in [r#"{"zoom_step": 0.0}"#, r#"{"zoom_step": 0.5}"#, r#"{"zoom_step": 1.0}"#] {
            let err = ZoomConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ZoomError::InvalidConfig(_)), "{}", json);
        }
    }

    #[test]
    fn test_rejects_non_positive_factors() {
        for json in [
            r#"{"min_zoom_factor": 0.0}"#,
            r#"{"min_zoom_factor": -0.5}"#,
            r#"{"max_zoom_factor": 0.0}"#,
        ] {
            let err = ZoomConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ZoomError::InvalidConfig(_)), "{}", json);
        }
    }

    #[test]
    fn test_rejects_inverted_factors() {
        let err = ZoomConfig::from_json(r#"{"min_zoom_factor": 5.0, "max_zoom_factor": 2.0}"#)
            .unwrap_err();
        assert!(matches!(err, ZoomError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_non_positive_mismatch_scale() {
        let err = ZoomConfig::from_json(r#"{"mismatch_base_scale": 0.0}"#).unwrap_err();
        assert!(matches!(err, ZoomError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = ZoomConfig::from_json("{ zoom_step: ").unwrap_err();
        assert!(matches!(err, ZoomError::Config(_)));
    }
}
