pub mod zoomable_image;
