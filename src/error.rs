// src/error.rs
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ZoomError {
    #[error("zoomable can only be bound to an <img> element, but found: {0}")]
    NotAnImage(String),

    #[error("document has no <body> to attach the overlay to")]
    MissingBody,

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("invalid zoomable configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid zoomable configuration: {0}")]
    InvalidConfig(String),
}

impl From<JsValue> for ZoomError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        ZoomError::Dom(message)
    }
}
