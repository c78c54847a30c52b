// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/editor.rs
//
// Full-screen region editor: live preview over the uncropped photo.

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text};
use cosmic::Element;

use crate::app::editor::RegionEditSession;
use crate::app::message::AppMessage;
use crate::app::model::AppModel;
use crate::fl;
use crate::ui::widgets::region_overlay;

pub fn view<'a>(model: &'a AppModel, session: &'a RegionEditSession) -> Element<'a, AppMessage> {
    let body: Element<'a, AppMessage> = match model.photos.get(&session.record_id()) {
        Some(photo) => region_overlay(photo, session.region(), session.is_dragging()),
        None => container(text::body(fl!("photo-missing")))
            .center(Length::Fill)
            .into(),
    };

    column()
        .push(
            column()
                .push(text::title3(fl!("editor-title")))
                .push(text::caption(fl!("editor-hint")))
                .spacing(4),
        )
        .push(
            container(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(8),
        )
        .push(
            row()
                .push(button::standard(fl!("cancel")).on_press(AppMessage::CancelRegion))
                .push(button::suggested(fl!("save")).on_press(AppMessage::SaveRegion))
                .spacing(8)
                .align_y(Alignment::Center),
        )
        .spacing(12)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
