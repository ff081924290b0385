// src/view_state.rs
use crate::pointer::PointerPoint;
use crate::zoom_config::ZoomConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayState {
    Closed,
    Open,
}

/// Which axis pins the image to the viewport after load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitAxis {
    Width(f64),
    Height(f64),
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub base_scale: f64,
    pub axis: FitAxis,
}

/// Scale, translation and drag bookkeeping for the image in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub state: OverlayState,
    pub dragging: bool,
    pub scale: f64,
    pub base_scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    anchor: (f64, f64),
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            state: OverlayState::Closed,
            dragging: false,
            scale: 1.0,
            base_scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            anchor: (0.0, 0.0),
            generation: 0,
        }
    }
}

impl ViewState {
    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    /// Enter the open state for a new image and return its load generation.
    pub fn open(&mut self) -> u64 {
        self.state = OverlayState::Open;
        self.dragging = false;
        self.scale = 1.0;
        self.base_scale = 1.0;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.generation += 1;
        self.generation
    }

    /// Returns false when already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = OverlayState::Closed;
        self.dragging = false;
        true
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Adopt the fitted base scale. Ignored when `generation` has been superseded.
    pub fn apply_fit(&mut self, generation: u64, fit: &Fit) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.base_scale = fit.base_scale;
        self.scale = fit.base_scale;
        true
    }

    pub fn zoom_in(&mut self, config: &ZoomConfig) {
        self.scale = self.clamp_scale(self.scale * config.zoom_step, config);
    }

    pub fn zoom_out(&mut self, config: &ZoomConfig) {
        self.scale = self.clamp_scale(self.scale / config.zoom_step, config);
    }

    // max/min rather than f64::clamp, which panics on inverted bounds
    fn clamp_scale(&self, scale: f64, config: &ZoomConfig) -> f64 {
        let min = config.min_scale(self.base_scale);
        let max = config.max_scale(self.base_scale);
        if scale.is_finite() {
            scale.max(min).min(max)
        } else {
            max
        }
    }

    pub fn begin_drag(&mut self, at: PointerPoint) {
        self.dragging = true;
        self.anchor = (at.x - self.translate_x, at.y - self.translate_y);
    }

    /// Returns true when the translation changed.
    pub fn drag_to(&mut self, at: PointerPoint) -> bool {
        if !self.dragging {
            return false;
        }
        self.translate_x = at.x - self.anchor.0;
        self.translate_y = at.y - self.anchor.1;
        true
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// CSS transform: centred on 50%/50%, offset in pixels, then scaled.
    pub fn transform(&self) -> String {
        format!(
            "translate(calc(-50% + {}px), calc(-50% + {}px)) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Choose the base scale and the constraining axis for a freshly loaded image.
///
/// An empty viewport is replaced by the natural size. Images without a
/// natural size keep their own dimensions at base scale 1.
pub fn fit_to_viewport(viewport: (f64, f64), natural: (f64, f64), config: &ZoomConfig) -> Fit {
    let (nat_w, nat_h) = natural;
    if nat_w <= 0.0 || nat_h <= 0.0 {
        return Fit {
            base_scale: 1.0,
            axis: FitAxis::Natural,
        };
    }
    let (view_w, view_h) = if viewport.0 > 0.0 && viewport.1 > 0.0 {
        viewport
    } else {
        natural
    };

    let window_ratio = view_w / view_h;
    let image_ratio = nat_w / nat_h;
    let base_scale = if (window_ratio - image_ratio).abs() > config.ratio_mismatch_threshold {
        config.mismatch_base_scale
    } else {
        1.0
    };

    let axis = if image_ratio > window_ratio {
        FitAxis::Width(view_w)
    } else {
        FitAxis::Height(view_h)
    };

    Fit { base_scale, axis }
}
