// src/pointer.rs
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, TouchEvent};

/// Client coordinates of a mouse or single-finger touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPoint {
    pub x: f64,
    pub y: f64,
}

impl PointerPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `None` for events without a position, e.g. a touchend with no remaining touches.
    pub fn from_event(event: &Event) -> Option<Self> {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            return Some(Self::new(mouse.client_x() as f64, mouse.client_y() as f64));
        }
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(Self::new(touch.client_x() as f64, touch.client_y() as f64))
    }
}
