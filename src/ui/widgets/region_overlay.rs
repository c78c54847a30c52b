// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/region_overlay.rs
//
// Interactive region editor: photo with a draggable question region.

use cosmic::{
    Element, Renderer,
    iced::{
        Color, Length, Point, Radians, Rectangle, Size, touch,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            layout::{Limits, Node},
            renderer::{Quad, Renderer as QuadRenderer},
            widget::Tree,
        },
        event::{Event, Status},
        mouse::{self, Button, Cursor},
    },
    iced_core::image::{FilterMethod, Renderer as ImageRenderer},
};

use crate::app::editor::DragMode;
use crate::app::message::AppMessage;
use crate::constant::REGION_SCALE;
use crate::domain::photo::Photo;
use crate::domain::region::{NormalizedRegion, RenderRect};
use crate::ui::widgets::fit_rect;

const HANDLE_SIZE: f32 = 16.0;
const HANDLE_HIT_SIZE: f32 = 32.0;
const OVERLAY_COLOR: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.5);
const REGION_FILL: Color = Color::from_rgba(0.35, 0.38, 0.9, 0.2);
const BORDER_COLOR: Color = Color::WHITE;
const BORDER_WIDTH: f32 = 2.0;

pub struct RegionOverlay {
    photo: Photo,
    region: NormalizedRegion,
    is_dragging: bool,
}

impl RegionOverlay {
    pub fn new(photo: &Photo, region: NormalizedRegion, is_dragging: bool) -> Self {
        Self {
            photo: photo.clone(),
            region,
            is_dragging,
        }
    }

    /// On-screen rectangle of the photo inside the widget bounds.
    fn image_rect(&self, bounds: Rectangle) -> Rectangle {
        fit_rect(bounds, self.photo.width, self.photo.height)
    }

    /// On-screen rectangle of the region inside the photo rectangle.
    fn region_rect(&self, image: Rectangle) -> Rectangle {
        region_rect_in(image, &self.region)
    }

    /// Translate a screen point into region units. The result is not
    /// clamped; the drag session presses it against the image edges.
    fn to_units(&self, image: Rectangle, point: Point) -> (f32, f32) {
        let scale = REGION_SCALE as f32;
        (
            (point.x - image.x) / image.width * scale,
            (point.y - image.y) / image.height * scale,
        )
    }

    fn press(&self, image: Rectangle, point: Point, shell: &mut Shell<'_, AppMessage>) -> Status {
        let Some(mode) = hit_test(self.region_rect(image), point) else {
            return Status::Ignored;
        };
        let (x, y) = self.to_units(image, point);
        shell.publish(AppMessage::RegionDragStart { x, y, mode });
        Status::Captured
    }

    fn drag_to(&self, image: Rectangle, point: Point, shell: &mut Shell<'_, AppMessage>) -> Status {
        if !self.is_dragging {
            return Status::Ignored;
        }
        let (x, y) = self.to_units(image, point);
        shell.publish(AppMessage::RegionDragMoved { x, y });
        Status::Captured
    }

    fn release(&self, shell: &mut Shell<'_, AppMessage>) -> Status {
        if !self.is_dragging {
            return Status::Ignored;
        }
        shell.publish(AppMessage::RegionDragEnd);
        Status::Captured
    }
}

/// Screen rectangle of a region laid over an image rectangle.
fn region_rect_in(image: Rectangle, region: &NormalizedRegion) -> Rectangle {
    let rect = RenderRect::from_region(Some(region));
    Rectangle::new(
        Point::new(
            image.x + image.width * rect.left / 100.0,
            image.y + image.height * rect.top / 100.0,
        ),
        Size::new(
            image.width * rect.width / 100.0,
            image.height * rect.height / 100.0,
        ),
    )
}

/// Priority-ordered hit test: the resize corner wins over the move
/// body wherever the two overlap.
fn hit_test(region: Rectangle, point: Point) -> Option<DragMode> {
    let corner = Point::new(region.x + region.width, region.y + region.height);
    let half = HANDLE_HIT_SIZE / 2.0;
    let in_corner = point.x >= corner.x - half
        && point.x <= corner.x + half
        && point.y >= corner.y - half
        && point.y <= corner.y + half;
    if in_corner {
        return Some(DragMode::Resize);
    }
    if region.contains(point) {
        return Some(DragMode::Move);
    }
    None
}

impl Widget<AppMessage, cosmic::Theme, Renderer> for RegionOverlay {
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
        let image = self.image_rect(bounds);
        let region = self.region_rect(image);

        ImageRenderer::draw_image(
            renderer,
            self.photo.handle.clone(),
            FilterMethod::Linear,
            image,
            Radians(0.0),
            1.0,
            [0.0, 0.0, 0.0, 0.0],
        );

        // Dim the photo outside the region.
        let strips = [
            Rectangle::new(
                image.position(),
                Size::new(image.width, region.y - image.y),
            ),
            Rectangle::new(
                Point::new(image.x, region.y + region.height),
                Size::new(image.width, image.y + image.height - region.y - region.height),
            ),
            Rectangle::new(
                Point::new(image.x, region.y),
                Size::new(region.x - image.x, region.height),
            ),
            Rectangle::new(
                Point::new(region.x + region.width, region.y),
                Size::new(image.x + image.width - region.x - region.width, region.height),
            ),
        ];
        for strip in strips {
            if strip.width > 0.0 && strip.height > 0.0 {
                draw_quad(renderer, strip, OVERLAY_COLOR);
            }
        }

        // Region fill and border.
        draw_quad(renderer, region, REGION_FILL);
        let edges = [
            Rectangle::new(region.position(), Size::new(region.width, BORDER_WIDTH)),
            Rectangle::new(
                Point::new(region.x, region.y + region.height - BORDER_WIDTH),
                Size::new(region.width, BORDER_WIDTH),
            ),
            Rectangle::new(region.position(), Size::new(BORDER_WIDTH, region.height)),
            Rectangle::new(
                Point::new(region.x + region.width - BORDER_WIDTH, region.y),
                Size::new(BORDER_WIDTH, region.height),
            ),
        ];
        for edge in edges {
            draw_quad(renderer, edge, BORDER_COLOR);
        }

        // Bottom-right resize handle.
        let half = HANDLE_SIZE / 2.0;
        draw_quad(
            renderer,
            Rectangle::new(
                Point::new(
                    region.x + region.width - half,
                    region.y + region.height - half,
                ),
                Size::new(HANDLE_SIZE, HANDLE_SIZE),
            ),
            BORDER_COLOR,
        );
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, AppMessage>,
        _viewport: &Rectangle,
    ) -> Status {
        let bounds = layout.bounds();
        let image = self.image_rect(bounds);

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(Button::Left)) => {
                if let Some(pos) = cursor.position_over(bounds) {
                    return self.press(image, pos, shell);
                }
            }
            // While a drag is active the pointer is tracked across the
            // whole window, so dragging past the photo edge keeps
            // pressing the region against the wall.
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if let Some(pos) = cursor.position() {
                    return self.drag_to(image, pos, shell);
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(Button::Left)) => {
                return self.release(shell);
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if bounds.contains(position) {
                    return self.press(image, position, shell);
                }
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                return self.drag_to(image, position, shell);
            }
            Event::Touch(
                touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. },
            ) => {
                return self.release(shell);
            }
            _ => {}
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
        let bounds = layout.bounds();
        let image = self.image_rect(bounds);

        if self.is_dragging {
            return mouse::Interaction::Grabbing;
        }
        if let Some(pos) = cursor.position_over(bounds) {
            return match hit_test(self.region_rect(image), pos) {
                Some(DragMode::Resize) => mouse::Interaction::ResizingDiagonallyDown,
                Some(DragMode::Move) => mouse::Interaction::Grab,
                None => mouse::Interaction::default(),
            };
        }
        mouse::Interaction::default()
    }
}

impl<'a> From<RegionOverlay> for Element<'a, AppMessage> {
    fn from(widget: RegionOverlay) -> Self {
        Element::new(widget)
    }
}

pub fn region_overlay<'a>(
    photo: &Photo,
    region: NormalizedRegion,
    is_dragging: bool,
) -> Element<'a, AppMessage> {
    RegionOverlay::new(photo, region, is_dragging).into()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn region_px() -> Rectangle {
        Rectangle::new(Point::new(100.0, 100.0), Size::new(200.0, 200.0))
    }

    #[test]
    fn corner_beats_body_where_they_overlap() {
        // Just inside the region but within the corner hit box.
        let point = Point::new(295.0, 295.0);
        assert_eq!(hit_test(region_px(), point), Some(DragMode::Resize));
    }

    #[test]
    fn body_hits_move() {
        assert_eq!(
            hit_test(region_px(), Point::new(150.0, 150.0)),
            Some(DragMode::Move)
        );
    }

    #[test]
    fn corner_extends_past_the_region_edge() {
        // Outside the region, still within the corner hit box.
        assert_eq!(
            hit_test(region_px(), Point::new(310.0, 310.0)),
            Some(DragMode::Resize)
        );
    }

    #[test]
    fn outside_hits_nothing() {
        assert_eq!(hit_test(region_px(), Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn region_rect_maps_units_to_pixels() {
        let image = Rectangle::new(Point::new(10.0, 20.0), Size::new(500.0, 1000.0));
        let region = NormalizedRegion::new(200, 200, 800, 800).unwrap();
        let rect = region_rect_in(image, &region);
        assert!((rect.x - (10.0 + 100.0)).abs() < 0.01);
        assert!((rect.y - (20.0 + 200.0)).abs() < 0.01);
        assert!((rect.width - 300.0).abs() < 0.01);
        assert!((rect.height - 600.0).abs() < 0.01);
    }
}
