// src/overlay.rs
//! The shared fullscreen dialog subtree.
//!
//! Class names are a styling contract and must stay stable.

use crate::error::ZoomError;
use crate::view_state::{FitAxis, ViewState};
use crate::zoom_config::ZoomConfig;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Node};

pub const CONTAINER_CLASS: &str = "zoomable-fullscreen-container";
pub const LOADING_CLASS: &str = "zoomable-loading-indicator";
pub const SPINNER_CLASS: &str = "zoomable-spinner";
pub const CONTROLS_CLASS: &str = "zoomable-controls-panel";
pub const BUTTON_CLASS: &str = "zoomable-control-button";
pub const ZOOM_IN_CLASS: &str = "zoomable-zoom-in";
pub const ZOOM_OUT_CLASS: &str = "zoomable-zoom-out";
pub const CLOSE_CLASS: &str = "zoomable-close";
pub const IMAGE_CLASS: &str = "zoomable-fullscreen-image";
pub const DRAGGING_CLASS: &str = "dragging";

const ICON_PLUS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M12 4.5v15m7.5-7.5h-15" /></svg>"#;
const ICON_MINUS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M5 12h14" /></svg>"#;
const ICON_CLOSE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" stroke-width="1.5" stroke="currentColor" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M6 18 18 6M6 6l12 12" /></svg>"#;

#[derive(Clone)]
pub struct Overlay {
    pub container: HtmlElement,
    pub loading: HtmlElement,
    pub controls: HtmlElement,
    pub zoom_in: HtmlElement,
    pub zoom_out: HtmlElement,
    pub close: HtmlElement,
    pub image: HtmlImageElement,
}

impl Overlay {
    /// Find the overlay in `document`, building whichever parts are missing.
    pub fn ensure(document: &Document, config: &ZoomConfig) -> Result<Self, ZoomError> {
        let container = match find_in_document(document, CONTAINER_CLASS)? {
            Some(existing) => existing,
            None => {
                let container = create(document, "div", CONTAINER_CLASS)?;
                container.set_attribute("role", "dialog")?;
                container.set_attribute("aria-modal", "true")?;
                container.set_attribute("aria-label", &config.labels.dialog)?;
                container.style().set_property("display", "none")?;
                document
                    .body()
                    .ok_or(ZoomError::MissingBody)?
                    .append_child(&container)?;
                container
            }
        };

        let loading = match find(&container, LOADING_CLASS)? {
            Some(existing) => existing,
            None => build_loading_indicator(document, &container, config)?,
        };

        let controls = match find(&container, CONTROLS_CLASS)? {
            Some(existing) => existing,
            None => {
                let panel = create(document, "div", CONTROLS_CLASS)?;
                container.append_child(&panel)?;
                panel
            }
        };
        let zoom_in = ensure_button(
            document,
            &controls,
            ZOOM_IN_CLASS,
            &config.labels.zoom_in,
            ICON_PLUS,
        )?;
        let zoom_out = ensure_button(
            document,
            &controls,
            ZOOM_OUT_CLASS,
            &config.labels.zoom_out,
            ICON_MINUS,
        )?;
        let close = ensure_button(
            document,
            &controls,
            CLOSE_CLASS,
            &config.labels.close,
            ICON_CLOSE,
        )?;

        let image = match find(&container, IMAGE_CLASS)? {
            Some(existing) => existing
                .dyn_into::<HtmlImageElement>()
                .map_err(JsValue::from)?,
            None => {
                let image = create(document, "img", IMAGE_CLASS)?
                    .dyn_into::<HtmlImageElement>()
                    .map_err(JsValue::from)?;
                image.set_alt("");
                container.append_child(&image)?;
                image
            }
        };

        Ok(Self {
            container,
            loading,
            controls,
            zoom_in,
            zoom_out,
            close,
            image,
        })
    }

    pub fn is_attached(&self) -> bool {
        self.container.is_connected()
    }

    pub fn reattach(&self, document: &Document) -> Result<(), ZoomError> {
        document
            .body()
            .ok_or(ZoomError::MissingBody)?
            .append_child(&self.container)?;
        Ok(())
    }

    pub fn set_visible(&self, visible: bool) -> Result<(), ZoomError> {
        let display = if visible { "block" } else { "none" };
        self.container.style().set_property("display", display)?;
        Ok(())
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set_hidden(!loading);
    }

    pub fn show_image(&self, src: &str, alt: &str) {
        self.image.set_src(src);
        self.image.set_alt(alt);
    }

    pub fn render(&self, view: &ViewState) -> Result<(), ZoomError> {
        self.image
            .style()
            .set_property("transform", &view.transform())?;
        Ok(())
    }

    pub fn fit_image(&self, axis: FitAxis) -> Result<(), ZoomError> {
        let style = self.image.style();
        match axis {
            FitAxis::Width(width) => {
                style.set_property("width", &format!("{}px", width))?;
                style.set_property("height", "auto")?;
            }
            FitAxis::Height(height) => {
                style.set_property("height", &format!("{}px", height))?;
                style.set_property("width", "auto")?;
            }
            FitAxis::Natural => {
                style.remove_property("width")?;
                style.remove_property("height")?;
            }
        }
        Ok(())
    }

    pub fn set_dragging(&self, dragging: bool) -> Result<(), ZoomError> {
        self.image
            .class_list()
            .toggle_with_force(DRAGGING_CLASS, dragging)?;
        Ok(())
    }

    /// True when `target` lies inside the control panel.
    pub fn is_control(&self, target: &Element) -> bool {
        let node: &Node = target;
        self.controls.contains(Some(node))
    }

    pub fn is_backdrop(&self, target: &Element) -> bool {
        let container: &Element = &self.container;
        container == target
    }
}

fn find_in_document(document: &Document, class: &str) -> Result<Option<HtmlElement>, ZoomError> {
    let found = document.query_selector(&format!(".{}", class))?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn find(root: &Element, class: &str) -> Result<Option<HtmlElement>, ZoomError> {
    let found = root.query_selector(&format!(".{}", class))?;
    Ok(found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, ZoomError> {
    let element = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    element.set_class_name(class);
    Ok(element)
}

fn build_loading_indicator(
    document: &Document,
    container: &HtmlElement,
    config: &ZoomConfig,
) -> Result<HtmlElement, ZoomError> {
    let indicator = create(document, "div", LOADING_CLASS)?;
    indicator.set_attribute("role", "status")?;
    indicator.set_attribute("aria-live", "polite")?;
    indicator.set_hidden(true);

    let spinner = create(document, "div", SPINNER_CLASS)?;
    let text = document.create_element("div")?;
    text.set_text_content(Some(&config.loading_text));
    indicator.append_child(&spinner)?;
    indicator.append_child(&text)?;
    container.append_child(&indicator)?;
    Ok(indicator)
}

fn ensure_button(
    document: &Document,
    panel: &HtmlElement,
    class: &str,
    label: &str,
    icon: &str,
) -> Result<HtmlElement, ZoomError> {
    if let Some(existing) = find(panel, class)? {
        return Ok(existing);
    }
    let button = create(document, "button", &format!("{} {}", BUTTON_CLASS, class))?;
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", label)?;
    button.set_attribute("tabindex", "0")?;
    button.set_inner_html(icon);
    panel.append_child(&button)?;
    Ok(button)
}
