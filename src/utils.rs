// src/utils.rs
use crate::error::ZoomError;
use gloo::utils::{body, window};
use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Inner width and height of the browser window in CSS pixels.
pub fn viewport_size() -> Option<(f64, f64)> {
    let window = window();
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Touch-capable devices skip the focus trap.
pub fn is_touch_device() -> bool {
    let window = window();
    let has_touch_handler =
        Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    has_touch_handler || window.navigator().max_touch_points() > 0
}

pub fn set_page_scroll_locked(locked: bool) -> Result<(), ZoomError> {
    let value = if locked { "hidden" } else { "" };
    body().style().set_property("overflow", value)?;
    Ok(())
}

pub fn is_image_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("img")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_tag_detection() {
        assert!(is_image_tag("IMG"));
        assert!(is_image_tag("img"));
        assert!(!is_image_tag("DIV"));
        assert!(!is_image_tag("picture"));
    }
}
