// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/highlight_view.rs
//
// Passive photo display with the detected question region outlined.

use cosmic::{
    Element, Renderer,
    iced::{
        Color, Length, Point, Radians, Rectangle, Size,
        advanced::{
            Layout, Widget,
            layout::{Limits, Node},
            renderer::{Quad, Renderer as QuadRenderer},
            widget::Tree,
        },
        mouse::Cursor,
    },
    iced_core::image::{FilterMethod, Renderer as ImageRenderer},
};

use crate::domain::photo::Photo;
use crate::domain::region::{NormalizedRegion, RenderRect};
use crate::ui::widgets::fit_rect;

const HIGHLIGHT_BORDER: Color = Color::from_rgb(0.35, 0.38, 0.9);
const HIGHLIGHT_FILL: Color = Color::from_rgba(0.35, 0.38, 0.9, 0.1);
const BORDER_WIDTH: f32 = 2.0;

pub struct HighlightView {
    photo: Photo,
    region: Option<NormalizedRegion>,
}

impl HighlightView {
    pub fn new(photo: &Photo, region: Option<NormalizedRegion>) -> Self {
        Self {
            photo: photo.clone(),
            region,
        }
    }
}

impl<Msg> Widget<Msg, cosmic::Theme, Renderer> for HighlightView {
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, limits: &Limits) -> Node {
        Node::new(limits.max())
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
        let bounds = layout.bounds();
        let image = fit_rect(bounds, self.photo.width, self.photo.height);

        ImageRenderer::draw_image(
            renderer,
            self.photo.handle.clone(),
            FilterMethod::Linear,
            image,
            Radians(0.0),
            1.0,
            [0.0, 0.0, 0.0, 0.0],
        );

        // Outline the detected region; an absent region draws nothing
        // extra (the full image is already showing).
        let Some(region) = &self.region else { return };
        let rect = RenderRect::from_region(Some(region));
        let highlight = Rectangle::new(
            Point::new(
                image.x + image.width * rect.left / 100.0,
                image.y + image.height * rect.top / 100.0,
            ),
            Size::new(
                image.width * rect.width / 100.0,
                image.height * rect.height / 100.0,
            ),
        );

        draw_quad(renderer, highlight, HIGHLIGHT_FILL);
        let edges = [
            Rectangle::new(
                highlight.position(),
                Size::new(highlight.width, BORDER_WIDTH),
            ),
            Rectangle::new(
                Point::new(highlight.x, highlight.y + highlight.height - BORDER_WIDTH),
                Size::new(highlight.width, BORDER_WIDTH),
            ),
            Rectangle::new(
                highlight.position(),
                Size::new(BORDER_WIDTH, highlight.height),
            ),
            Rectangle::new(
                Point::new(highlight.x + highlight.width - BORDER_WIDTH, highlight.y),
                Size::new(BORDER_WIDTH, highlight.height),
            ),
        ];
        for edge in edges {
            draw_quad(renderer, edge, HIGHLIGHT_BORDER);
        }
    }
}

impl<'a, Msg: 'a> From<HighlightView> for Element<'a, Msg> {
    fn from(widget: HighlightView) -> Self {
        Element::new(widget)
    }
}

pub fn highlight_view<'a, Msg: 'a>(
    photo: &Photo,
    region: Option<NormalizedRegion>,
) -> Element<'a, Msg> {
    HighlightView::new(photo, region).into()
}

fn draw_quad(renderer: &mut Renderer, bounds: Rectangle, color: Color) {
    renderer.fill_quad(
        Quad {
            bounds,
            ..Quad::default()
        },
        color,
    );
}
