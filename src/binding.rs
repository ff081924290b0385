// src/binding.rs
use crate::error::ZoomError;
use crate::utils::is_image_tag;
use crate::widget::ImageZoomWidget;
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlImageElement};

/// Attribute marking an `<img>` in static markup as zoomable.
pub const MARKER_ATTRIBUTE: &str = "data-zoomable";

/// A click-to-open handler on one source image.
///
/// Dropping the binding (or calling [`Binding::unbind`]) removes the click
/// handler only. The shared overlay keeps working for every other binding.
pub struct Binding {
    element: HtmlImageElement,
    on_click: EventListener,
}

impl Binding {
    pub fn unbind(self) {
        log::debug!("Unbinding zoomable image {}", self.element.src());
        drop(self.on_click);
    }

    /// Keep the handler for the lifetime of the page.
    pub fn forget(self) {
        self.on_click.forget();
    }
}

pub fn validate_tag(tag_name: &str) -> Result<(), ZoomError> {
    if is_image_tag(tag_name) {
        Ok(())
    } else {
        Err(ZoomError::NotAnImage(tag_name.to_string()))
    }
}

/// Make `element` open the shared overlay when clicked.
///
/// Refuses, with a logged error, anything that is not an `<img>`.
pub fn bind(element: &Element) -> Result<Binding, ZoomError> {
    bind_to(&ImageZoomWidget::shared(), element)
}

pub fn bind_to(widget: &ImageZoomWidget, element: &Element) -> Result<Binding, ZoomError> {
    if let Err(e) = validate_tag(&element.tag_name()) {
        log::error!("{}", e);
        return Err(e);
    }
    let image = element
        .clone()
        .dyn_into::<HtmlImageElement>()
        .map_err(JsValue::from)?;

    let on_click = {
        let widget = widget.clone();
        let source = image.clone();
        EventListener::new(&image, "click", move |_| {
            if let Err(e) = widget.open(&source) {
                log::error!("Failed to open zoomable overlay: {}", e);
            }
        })
    };

    Ok(Binding {
        element: image,
        on_click,
    })
}

/// Bind every `[data-zoomable]` element under `root`.
pub fn bind_marked(root: &Element) -> Vec<Binding> {
    let selector = format!("[{}]", MARKER_ATTRIBUTE);
    let nodes = match root.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::error!("Failed to query {}: {:?}", selector, e);
            return Vec::new();
        }
    };

    let bindings: Vec<Binding> = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|element| bind(&element).ok())
        .collect();
    log::info!("Bound {} marked image(s)", bindings.len());
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_elements_are_accepted() {
        assert!(validate_tag("IMG").is_ok());
    }

    #[test]
    fn test_non_image_elements_are_refused() {
        let err = validate_tag("DIV").unwrap_err();
        assert!(matches!(err, ZoomError::NotAnImage(ref tag) if tag == "DIV"));
        assert_eq!(
            err.to_string(),
            "zoomable can only be bound to an <img> element, but found: DIV"
        );
    }
}
