// src/widget.rs
use crate::error::ZoomError;
use crate::focus_trap::FocusTrap;
use crate::overlay::Overlay;
use crate::pointer::PointerPoint;
use crate::utils::{is_touch_device, set_page_scroll_locked, viewport_size};
use crate::view_state::{fit_to_viewport, ViewState};
use crate::zoom_config::ZoomConfig;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{document, window};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlImageElement, KeyboardEvent};

thread_local! {
    static SHARED: RefCell<Option<ImageZoomWidget>> = RefCell::new(None);
}

/// What a pointer-down inside the overlay should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressAction {
    Ignore,
    Close,
    StartDrag,
}

pub fn classify_press(is_open: bool, on_control: bool, on_backdrop: bool) -> PressAction {
    if !is_open || on_control {
        PressAction::Ignore
    } else if on_backdrop {
        PressAction::Close
    } else {
        PressAction::StartDrag
    }
}

pub fn closes_on_key(is_open: bool, key: &str) -> bool {
    is_open && key == "Escape"
}

#[derive(Debug, Clone, Copy)]
enum Control {
    ZoomIn,
    ZoomOut,
    Close,
}

/// The page-wide fullscreen zoom widget. Cloning yields another handle to the same widget.
#[derive(Clone)]
pub struct ImageZoomWidget {
    inner: Rc<Inner>,
}

struct Inner {
    document: Document,
    config: ZoomConfig,
    overlay: RefCell<Option<Overlay>>,
    view: RefCell<ViewState>,
    focus_trap: RefCell<FocusTrap>,
    listeners_attached: Cell<bool>,
    // live for the whole page, never removed per binding
    global_listeners: RefCell<Vec<EventListener>>,
    tab_listener: RefCell<Option<EventListener>>,
    load_listeners: RefCell<Vec<EventListener>>,
}

impl ImageZoomWidget {
    pub fn new(document: Document, config: ZoomConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                config,
                overlay: RefCell::new(None),
                view: RefCell::new(ViewState::default()),
                focus_trap: RefCell::new(FocusTrap::default()),
                listeners_attached: Cell::new(false),
                global_listeners: RefCell::new(Vec::new()),
                tab_listener: RefCell::new(None),
                load_listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The widget shared by every binding on the page, created on first use.
    pub fn shared() -> Self {
        SHARED.with(|slot| {
            if let Some(widget) = slot.borrow().as_ref() {
                return widget.clone();
            }
            let document = document();
            let config = ZoomConfig::from_document(&document);
            let widget = Self::new(document, config);
            *slot.borrow_mut() = Some(widget.clone());
            widget
        })
    }

    pub fn is_open(&self) -> bool {
        self.inner.view.borrow().is_open()
    }

    fn overlay(&self) -> Option<Overlay> {
        self.inner.overlay.borrow().clone()
    }

    /// Return the overlay, building it and wiring its listeners on first use
    /// and re-attaching it if something removed it from the document.
    pub fn ensure_overlay(&self) -> Result<Overlay, ZoomError> {
        let overlay = match self.overlay() {
            Some(overlay) => overlay,
            None => {
                let overlay = Overlay::ensure(&self.inner.document, &self.inner.config)?;
                *self.inner.overlay.borrow_mut() = Some(overlay.clone());
                overlay
            }
        };
        if !overlay.is_attached() {
            log::debug!("Overlay was detached from the document, re-attaching");
            overlay.reattach(&self.inner.document)?;
        }
        self.attach_global_listeners(&overlay);
        Ok(overlay)
    }

    pub fn open(&self, source: &HtmlImageElement) -> Result<(), ZoomError> {
        let overlay = self.ensure_overlay()?;
        let src = source.src();
        let alt = match source.alt() {
            alt if alt.is_empty() => self.inner.config.fallback_alt.clone(),
            alt => alt,
        };

        let generation = self.inner.view.borrow_mut().open();
        *self.inner.focus_trap.borrow_mut() = FocusTrap::default();
        self.watch_load(&overlay, generation, src.clone());

        overlay.show_image(&src, &alt);
        overlay.set_visible(true)?;
        set_page_scroll_locked(true)?;
        self.engage_tab_listener();

        overlay.set_loading(true);
        overlay.set_dragging(false)?;
        overlay.render(&self.inner.view.borrow())?;
        log::debug!("Opened zoomable overlay for {} (load #{})", src, generation);
        Ok(())
    }

    pub fn close(&self) {
        if !self.inner.view.borrow_mut().close() {
            return;
        }
        if let Some(overlay) = self.overlay() {
            report("hide overlay", overlay.set_visible(false));
            report("clear drag state", overlay.set_dragging(false));
        }
        report("restore page scroll", set_page_scroll_locked(false));
        self.inner.tab_listener.borrow_mut().take();
        log::debug!("Closed zoomable overlay");
    }

    pub fn zoom_in(&self) {
        self.inner.view.borrow_mut().zoom_in(&self.inner.config);
        self.render();
    }

    pub fn zoom_out(&self) {
        self.inner.view.borrow_mut().zoom_out(&self.inner.config);
        self.render();
    }

    fn render(&self) {
        if let Some(overlay) = self.overlay() {
            report("render transform", overlay.render(&self.inner.view.borrow()));
        }
    }

    fn perform(&self, control: Control) {
        match control {
            Control::ZoomIn => self.zoom_in(),
            Control::ZoomOut => self.zoom_out(),
            Control::Close => self.close(),
        }
    }

    fn listen<F>(
        &self,
        target: &EventTarget,
        event_type: &'static str,
        prevent_default: bool,
        handler: F,
    ) -> EventListener
    where
        F: Fn(&ImageZoomWidget, &Event) + 'static,
    {
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        let options = if prevent_default {
            EventListenerOptions::enable_prevent_default()
        } else {
            EventListenerOptions::default()
        };
        EventListener::new_with_options(target, event_type, options, move |event| {
            if let Some(inner) = weak.upgrade() {
                handler(&ImageZoomWidget { inner }, event);
            }
        })
    }

    fn attach_global_listeners(&self, overlay: &Overlay) {
        if self.inner.listeners_attached.replace(true) {
            return;
        }
        let window = window();
        let mut listeners = Vec::new();

        for (button, control) in [
            (&overlay.zoom_in, Control::ZoomIn),
            (&overlay.zoom_out, Control::ZoomOut),
            (&overlay.close, Control::Close),
        ] {
            listeners.push(self.listen(button, "click", false, move |widget, _| {
                widget.perform(control)
            }));
            // no synthetic click after a tap
            listeners.push(self.listen(button, "touchend", true, move |widget, event| {
                event.prevent_default();
                widget.perform(control);
            }));
        }

        let container = &overlay.container;
        listeners.push(self.listen(container, "mousedown", true, |widget, event| {
            widget.start_drag(event)
        }));
        listeners.push(self.listen(container, "touchstart", true, |widget, event| {
            widget.start_drag(event)
        }));
        listeners.push(self.listen(&window, "mousemove", true, |widget, event| {
            widget.drag(event)
        }));
        listeners.push(self.listen(container, "touchmove", true, |widget, event| {
            widget.drag(event);
            if widget.is_open() {
                event.prevent_default();
            }
        }));
        listeners.push(self.listen(&window, "mouseup", false, |widget, _| {
            widget.stop_drag()
        }));
        listeners.push(self.listen(container, "touchend", false, |widget, _| {
            widget.stop_drag()
        }));
        listeners.push(self.listen(&self.inner.document, "keydown", false, |widget, event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if closes_on_key(widget.is_open(), &event.key()) {
                    widget.close();
                }
            }
        }));

        log::debug!("Attached {} overlay listeners", listeners.len());
        self.inner.global_listeners.borrow_mut().extend(listeners);
    }

    fn engage_tab_listener(&self) {
        let listener = self.listen(&self.inner.document, "keydown", true, |widget, event| {
            if !widget.is_open() {
                return;
            }
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                widget.inner.focus_trap.borrow().handle_keydown(event);
            }
        });
        *self.inner.tab_listener.borrow_mut() = Some(listener);
    }

    fn establish_focus_trap(&self, overlay: &Overlay) {
        if !self.is_open() || is_touch_device() {
            return;
        }
        match FocusTrap::collect(&overlay.container) {
            Ok(trap) => {
                if trap.is_empty() {
                    log::warn!("Overlay has no focusable controls");
                }
                trap.focus_first();
                *self.inner.focus_trap.borrow_mut() = trap;
            }
            Err(e) => log::error!("Failed to collect overlay controls: {}", e),
        }
    }

    fn watch_load(&self, overlay: &Overlay, generation: u64, src: String) {
        let on_load = {
            let src = src.clone();
            self.listen(&overlay.image, "load", false, move |widget, _| {
                widget.image_loaded(generation, &src)
            })
        };
        let on_error = self.listen(&overlay.image, "error", false, move |widget, _| {
            widget.image_failed(generation, &src)
        });
        *self.inner.load_listeners.borrow_mut() = vec![on_load, on_error];
    }

    fn is_current_load(&self, overlay: &Overlay, generation: u64, src: &str) -> bool {
        self.inner.view.borrow().is_current(generation) && overlay.image.src() == src
    }

    fn image_loaded(&self, generation: u64, src: &str) {
        let Some(overlay) = self.overlay() else {
            return;
        };
        if !self.is_current_load(&overlay, generation, src) {
            log::debug!("Ignoring stale load of {}", src);
            return;
        }

        let natural = (
            overlay.image.natural_width() as f64,
            overlay.image.natural_height() as f64,
        );
        if natural.0 == 0.0 || natural.1 == 0.0 {
            log::warn!("Image {} reports no natural size", src);
        }
        let viewport = viewport_size().unwrap_or(natural);
        let fit = fit_to_viewport(viewport, natural, &self.inner.config);
        self.inner.view.borrow_mut().apply_fit(generation, &fit);

        report("fit image", overlay.fit_image(fit.axis));
        self.render();
        overlay.set_loading(false);
        self.establish_focus_trap(&overlay);
    }

    fn image_failed(&self, generation: u64, src: &str) {
        let Some(overlay) = self.overlay() else {
            return;
        };
        if !self.is_current_load(&overlay, generation, src) {
            return;
        }
        log::warn!("Failed to load image {}", src);
        overlay.set_loading(false);
        self.establish_focus_trap(&overlay);
    }

    fn start_drag(&self, event: &Event) {
        let Some(overlay) = self.overlay() else {
            return;
        };
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        let (on_control, on_backdrop) = match &target {
            Some(target) => (overlay.is_control(target), overlay.is_backdrop(target)),
            None => (false, false),
        };

        match classify_press(self.is_open(), on_control, on_backdrop) {
            PressAction::Ignore => {}
            PressAction::Close => self.close(),
            PressAction::StartDrag => {
                let Some(point) = PointerPoint::from_event(event) else {
                    return;
                };
                self.inner.view.borrow_mut().begin_drag(point);
                report("mark dragging", overlay.set_dragging(true));
                event.prevent_default();
            }
        }
    }

    fn drag(&self, event: &Event) {
        let Some(point) = PointerPoint::from_event(event) else {
            return;
        };
        let moved = self.inner.view.borrow_mut().drag_to(point);
        if moved {
            self.render();
            event.prevent_default();
        }
    }

    fn stop_drag(&self) {
        let mut view = self.inner.view.borrow_mut();
        if !view.dragging {
            return;
        }
        view.end_drag();
        drop(view);
        if let Some(overlay) = self.overlay() {
            report("clear drag state", overlay.set_dragging(false));
        }
    }
}

fn report(action: &str, result: Result<(), ZoomError>) {
    if let Err(e) = result {
        log::error!("Failed to {}: {}", action, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_on_backdrop_closes() {
        assert_eq!(classify_press(true, false, true), PressAction::Close);
    }

    #[test]
    fn test_press_on_image_starts_drag() {
        assert_eq!(classify_press(true, false, false), PressAction::StartDrag);
    }

    #[test]
    fn test_press_on_controls_is_ignored() {
        assert_eq!(classify_press(true, true, false), PressAction::Ignore);
    }

    #[test]
    fn test_press_while_closed_is_ignored() {
        assert_eq!(classify_press(false, false, true), PressAction::Ignore);
        assert_eq!(classify_press(false, false, false), PressAction::Ignore);
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        assert!(closes_on_key(true, "Escape"));
        assert!(!closes_on_key(false, "Escape"));
        assert!(!closes_on_key(true, "Enter"));
        assert!(!closes_on_key(true, "Esc"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod dom_tests {
    use super::*;
    use crate::binding::bind_to;
    use crate::overlay::CONTAINER_CLASS;
    use gloo::utils::body;
    use wasm_bindgen_test::*;
    use web_sys::{EventInit, HtmlElement};

    wasm_bindgen_test_configure!(run_in_browser);

    const PIXEL: &str =
        "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='4' height='3'/%3E";

    fn fresh_widget() -> ImageZoomWidget {
        let document = document();
        let stale = document
            .query_selector(&format!(".{}", CONTAINER_CLASS))
            .unwrap();
        if let Some(stale) = stale {
            stale.remove();
        }
        ImageZoomWidget::new(document, ZoomConfig::default())
    }

    fn append_image(alt: &str) -> HtmlImageElement {
        let image = document()
            .create_element("img")
            .unwrap()
            .dyn_into::<HtmlImageElement>()
            .unwrap();
        image.set_src(PIXEL);
        image.set_alt(alt);
        body().append_child(&image).unwrap();
        image
    }

    fn bubbling(event_type: &str) -> Event {
        let init = EventInit::new();
        init.set_bubbles(true);
        Event::new_with_event_init_dict(event_type, &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn unbinding_one_image_keeps_overlay_controls_working() {
        let widget = fresh_widget();
        let first = append_image("first");
        let second = append_image("second");
        let first_binding = bind_to(&widget, &first).unwrap();
        let _second_binding = bind_to(&widget, &second).unwrap();

        first_binding.unbind();
        first.click();
        assert!(!widget.is_open());

        second.click();
        assert!(widget.is_open());
        let overlay = widget.ensure_overlay().unwrap();
        overlay.zoom_in.click();
        let transform = overlay.image.style().get_property_value("transform").unwrap();
        assert!(transform.contains("scale(1.5)"), "{}", transform);

        overlay.close.click();
        assert!(!widget.is_open());
    }

    #[wasm_bindgen_test]
    fn refused_element_gets_no_click_handler() {
        let widget = fresh_widget();
        let div = document()
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        body().append_child(&div).unwrap();

        assert!(matches!(bind_to(&widget, &div), Err(ZoomError::NotAnImage(_))));
        div.click();
        assert!(!widget.is_open());
        assert!(widget.overlay().is_none());
    }

    #[wasm_bindgen_test]
    fn press_on_backdrop_closes_but_press_on_controls_does_not() {
        let widget = fresh_widget();
        let image = append_image("backdrop");
        let _binding = bind_to(&widget, &image).unwrap();
        image.click();
        let overlay = widget.ensure_overlay().unwrap();

        assert!(overlay.is_backdrop(&overlay.container));
        assert!(!overlay.is_backdrop(&overlay.image));
        assert!(overlay.is_control(&overlay.zoom_in));
        assert!(!overlay.is_control(&overlay.image));

        overlay.zoom_out.dispatch_event(&bubbling("mousedown")).unwrap();
        assert!(widget.is_open());

        overlay.container.dispatch_event(&bubbling("mousedown")).unwrap();
        assert!(!widget.is_open());
        assert_eq!(
            overlay.container.style().get_property_value("display").unwrap(),
            "none"
        );
    }

    #[wasm_bindgen_test]
    fn focus_trap_focuses_first_control() {
        let widget = fresh_widget();
        let overlay = widget.ensure_overlay().unwrap();
        overlay.set_visible(true).unwrap();

        let trap = FocusTrap::collect(&overlay.container).unwrap();
        assert_eq!(trap.len(), 3);
        trap.focus_first();
        let active = document().active_element().unwrap();
        let zoom_in: &Element = &overlay.zoom_in;
        assert_eq!(&active, zoom_in);

        overlay.set_visible(false).unwrap();
    }
}
