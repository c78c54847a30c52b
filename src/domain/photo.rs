// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/photo.rs
//
// Imported photo decoding and display handle creation.

use std::path::Path;

use anyhow::Context;
use image::GenericImageView;

/// Re-export the image handle type for use by the rest of the app.
pub type ImageHandle = cosmic::widget::image::Handle;

/// A decoded photo ready for display.
#[derive(Debug, Clone)]
pub struct Photo {
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
}

impl Photo {
    /// Decode a photo file into a display handle.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("Failed to decode photo {}", path.display()))?;
        let (width, height) = img.dimensions();
        let handle = create_image_handle(&img);
        Ok(Self {
            handle,
            width,
            height,
        })
    }
}

/// Create an iced image handle from a DynamicImage.
pub fn create_image_handle(img: &image::DynamicImage) -> ImageHandle {
    let (w, h) = img.dimensions();
    let rgba = img.to_rgba8();
    let pixels = rgba.into_raw();
    ImageHandle::from_rgba(w, h, pixels)
}
