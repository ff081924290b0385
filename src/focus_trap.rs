// src/focus_trap.rs
use crate::error::ZoomError;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

const FOCUSABLE_SELECTOR: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex='-1'])";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabMove {
    WrapToFirst,
    WrapToLast,
    Default,
}

/// Decide where Tab goes given the index of the focused control, if it is one of ours.
pub fn tab_move(focused: Option<usize>, len: usize, shift: bool) -> TabMove {
    if len == 0 {
        return TabMove::Default;
    }
    match focused {
        Some(0) if shift => TabMove::WrapToLast,
        Some(i) if !shift && i == len - 1 => TabMove::WrapToFirst,
        _ => TabMove::Default,
    }
}

/// Focusable controls of the overlay, in document order.
#[derive(Default)]
pub struct FocusTrap {
    elements: Vec<HtmlElement>,
}

impl FocusTrap {
    pub fn collect(container: &Element) -> Result<Self, ZoomError> {
        let nodes = container.query_selector_all(FOCUSABLE_SELECTOR)?;
        let elements = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();
        Ok(Self { elements })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn focus_first(&self) {
        if let Some(first) = self.elements.first() {
            if let Err(e) = first.focus() {
                log::error!("Failed to focus overlay control: {:?}", e);
            }
        }
    }

    pub fn handle_keydown(&self, event: &KeyboardEvent) {
        if event.key() != "Tab" {
            return;
        }
        let active = gloo::utils::document().active_element();
        let focused = active.and_then(|active| {
            self.elements.iter().position(|el| {
                let el: &Element = el;
                el == &active
            })
        });

        let target = match tab_move(focused, self.len(), event.shift_key()) {
            TabMove::WrapToFirst => self.elements.first(),
            TabMove::WrapToLast => self.elements.last(),
            TabMove::Default => None,
        };
        if let Some(target) = target {
            if let Err(e) = target.focus() {
                log::error!("Failed to move focus inside the overlay: {:?}", e);
            }
            event.prevent_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_tab_on_first_wraps_backward() {
        assert_eq!(tab_move(Some(0), 3, true), TabMove::WrapToLast);
    }

    #[test]
    fn test_tab_on_last_wraps_forward() {
        assert_eq!(tab_move(Some(2), 3, false), TabMove::WrapToFirst);
    }

    #[test]
    fn test_middle_and_outside_use_default_order() {
        assert_eq!(tab_move(Some(1), 3, false), TabMove::Default);
        assert_eq!(tab_move(Some(1), 3, true), TabMove::Default);
        assert_eq!(tab_move(Some(0), 3, false), TabMove::Default);
        assert_eq!(tab_move(Some(2), 3, true), TabMove::Default);
        assert_eq!(tab_move(None, 3, false), TabMove::Default);
    }

    #[test]
    fn test_single_control_wraps_onto_itself() {
        assert_eq!(tab_move(Some(0), 1, false), TabMove::WrapToFirst);
        assert_eq!(tab_move(Some(0), 1, true), TabMove::WrapToLast);
    }

    #[test]
    fn test_empty_trap_is_inert() {
        assert_eq!(tab_move(None, 0, true), TabMove::Default);
        assert!(FocusTrap::default().is_empty());
    }
}
