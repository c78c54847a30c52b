// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/mod.rs
//
// Custom widgets module.

pub mod crop_view;
pub mod highlight_view;
pub mod region_overlay;

// Re-exports for convenience
pub use crop_view::crop_view;
pub use highlight_view::highlight_view;
pub use region_overlay::region_overlay;

use cosmic::iced::{Point, Rectangle, Size};

/// Aspect-fit a `width x height` image inside `bounds`, centered.
pub(crate) fn fit_rect(bounds: Rectangle, width: u32, height: u32) -> Rectangle {
    if width == 0 || height == 0 {
        return bounds;
    }
    let img_w = width as f32;
    let img_h = height as f32;
    let scale = (bounds.width / img_w).min(bounds.height / img_h);
    let display_w = img_w * scale;
    let display_h = img_h * scale;
    Rectangle::new(
        Point::new(
            bounds.x + (bounds.width - display_w) / 2.0,
            bounds.y + (bounds.height - display_h) / 2.0,
        ),
        Size::new(display_w, display_h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_rect_preserves_aspect_and_centers() {
        let bounds = Rectangle::new(Point::new(0.0, 0.0), Size::new(400.0, 400.0));

        // Wide image letterboxes vertically.
        let rect = fit_rect(bounds, 200, 100);
        assert!((rect.width - 400.0).abs() < 0.01);
        assert!((rect.height - 200.0).abs() < 0.01);
        assert!((rect.y - 100.0).abs() < 0.01);

        // Tall image pillarboxes horizontally.
        let rect = fit_rect(bounds, 100, 200);
        assert!((rect.height - 400.0).abs() < 0.01);
        assert!((rect.x - 100.0).abs() < 0.01);
    }
}
