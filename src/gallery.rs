// src/gallery.rs

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

impl GalleryItem {
    pub fn new(src: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: String::new(),
            caption: String::new(),
        }
    }

    pub fn with_alt(mut self, alt: &str) -> Self {
        self.alt = alt.to_string();
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = caption.to_string();
        self
    }

    /// Caption shown under the thumbnail, falling back to the alt text.
    pub fn label(&self) -> &str {
        if self.caption.is_empty() {
            &self.alt
        } else {
            &self.caption
        }
    }
}

// Demo images with differing aspect ratios
pub fn demo_items() -> Vec<GalleryItem> {
    vec![
        GalleryItem::new("public/images/panorama.svg")
            .with_alt("Mountain panorama at dusk")
            .with_caption("Wide panorama"),
        GalleryItem::new("public/images/lighthouse.svg")
            .with_alt("Lighthouse on a rocky coast")
            .with_caption("Portrait"),
        GalleryItem::new("public/images/harbour.svg").with_alt("Harbour with fishing boats"),
        // no alt text: the overlay falls back to its generic label
        GalleryItem::new("public/images/map.svg").with_caption("Scanned map"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_caption() {
        let item = GalleryItem::new("a.jpg").with_alt("Alt").with_caption("Caption");
        assert_eq!(item.label(), "Caption");
        let item = GalleryItem::new("a.jpg").with_alt("Alt");
        assert_eq!(item.label(), "Alt");
    }

    #[test]
    fn test_demo_items() {
        let items = demo_items();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|item| !item.src.is_empty()));
        assert!(items.iter().any(|item| item.alt.is_empty()));
    }

    #[test]
    fn test_demo_images_are_shipped() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        for item in demo_items() {
            assert!(root.join(&item.src).is_file(), "missing {}", item.src);
        }
    }
}
