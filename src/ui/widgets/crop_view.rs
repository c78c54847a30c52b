// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/crop_view.rs
//
// Crop renderer: shows only the interior of a question region by
// drawing the photo scaled and shifted inside a clipped container.

use cosmic::{
    Element, Renderer,
    iced::{
        Length, Point, Radians, Rectangle, Size,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            layout::{Limits, Node},
            widget::Tree,
        },
        event::{Event, Status},
        mouse::{self, Button, Cursor},
    },
    iced_core::image::{FilterMethod, Renderer as ImageRenderer},
};

use crate::domain::crop::CropTransform;
use crate::domain::photo::Photo;
use crate::domain::region::NormalizedRegion;

pub struct CropView<Msg> {
    photo: Photo,
    transform: CropTransform,
    /// Published when the crop is activated, so the caller can show the
    /// untransformed original full-screen.
    on_zoom: Option<Msg>,
}

impl<Msg: Clone> CropView<Msg> {
    pub fn new(photo: &Photo, region: &NormalizedRegion) -> Self {
        Self {
            photo: photo.clone(),
            transform: CropTransform::for_region(region),
            on_zoom: None,
        }
    }

    pub fn on_zoom(mut self, message: Msg) -> Self {
        self.on_zoom = Some(message);
        self
    }
}

impl<Msg: Clone + 'static> Widget<Msg, cosmic::Theme, Renderer> for CropView<Msg> {
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Shrink)
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, limits: &Limits) -> Node {
        // Fill the available width; the height follows from the region's
        // own aspect ratio.
        let max = limits.max();
        let mut width = max.width;
        let mut height = width / self.transform.aspect_ratio;
        if height > max.height {
            height = max.height;
            width = height * self.transform.aspect_ratio;
        }
        Node::new(Size::new(width, height))
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced::advanced::renderer::Style,
        layout: Layout<'_>,
        _cursor: Cursor,
        _viewport: &Rectangle,
    ) {
        use cosmic::iced_core::Renderer as _;

        let bounds = layout.bounds();
        let (x, y, w, h) = self.transform.image_placement(bounds.width, bounds.height);
        let image = Rectangle::new(
            Point::new(bounds.x + x, bounds.y + y),
            Size::new(w, h),
        );

        // Clip to the container so only the region interior shows.
        renderer.with_layer(bounds, |renderer| {
            ImageRenderer::draw_image(
                renderer,
                self.photo.handle.clone(),
                FilterMethod::Linear,
                image,
                Radians(0.0),
                1.0,
                [0.0, 0.0, 0.0, 0.0],
            );
        });
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Msg>,
        _viewport: &Rectangle,
    ) -> Status {
        if let Event::Mouse(mouse::Event::ButtonPressed(Button::Left)) = event {
            if cursor.position_over(layout.bounds()).is_some() {
                if let Some(message) = &self.on_zoom {
                    shell.publish(message.clone());
                    return Status::Captured;
                }
            }
        }
        Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if self.on_zoom.is_some() && cursor.position_over(layout.bounds()).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Msg: Clone + 'static> From<CropView<Msg>> for Element<'a, Msg> {
    fn from(widget: CropView<Msg>) -> Self {
        Element::new(widget)
    }
}

pub fn crop_view<Msg: Clone>(photo: &Photo, region: &NormalizedRegion) -> CropView<Msg> {
    CropView::new(photo, region)
}
