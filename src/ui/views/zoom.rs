// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/zoom.rs
//
// Full-screen photo view, with the detected region outlined for records.

use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, ZoomTarget};
use crate::fl;
use crate::ui::widgets::highlight_view;

pub fn view(model: &AppModel, target: ZoomTarget) -> Element<'_, AppMessage> {
    let body: Element<'_, AppMessage> = match target {
        ZoomTarget::Record(id) => match model.record(id).zip(model.photos.get(&id)) {
            Some((record, photo)) => highlight_view(photo, record.region()),
            None => missing(),
        },
        ZoomTarget::CapturePhoto(index) => {
            match model
                .capture
                .previews
                .get(index)
                .or_else(|| model.capture.previews.first())
            {
                Some(photo) => cosmic::iced_widget::image(photo.handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into(),
                None => missing(),
            }
        }
    };

    column()
        .push(
            row()
                .push(cosmic::widget::horizontal_space())
                .push(
                    button::icon(icon::from_name("window-close-symbolic"))
                        .on_press(AppMessage::CloseZoom),
                )
                .align_y(Alignment::Center),
        )
        .push(container(body).width(Length::Fill).height(Length::Fill))
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn missing<'a>() -> Element<'a, AppMessage> {
    container(text::body(fl!("photo-missing")))
        .center(Length::Fill)
        .into()
}
