// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/mod.rs
//
// Screen composition: per-view render functions and shared banners.

pub mod capture;
pub mod detail;
pub mod dialogs;
pub mod editor;
pub mod header;
pub mod list;
pub mod paper;
pub mod report;
pub mod zoom;

use cosmic::iced::Length;
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, AppView};
use crate::fl;

/// Render the window content for the current state.
///
/// The region editor and the zoom overlay are modal: while one is open
/// it replaces the whole content area, mirroring how the capture flow
/// takes over during analysis.
pub fn view(model: &AppModel) -> Element<'_, AppMessage> {
    if let Some(session) = &model.editor {
        return editor::view(model, session);
    }
    if let Some(target) = model.zoom {
        return zoom::view(model, target);
    }

    let screen = match model.view {
        AppView::List => list::view(model),
        AppView::Capture => capture::view(model),
        AppView::Detail(id) => detail::view(model, id),
        AppView::Paper => paper::view(model),
        AppView::Report => report::view(model),
    };

    let mut content = column().width(Length::Fill).height(Length::Fill);
    if model.level_up {
        content = content.push(level_up_banner(model.stats.level));
    }
    if let Some(error) = &model.error {
        content = content.push(error_banner(error));
    }
    content.push(screen).into()
}

fn level_up_banner<'a>(level: u32) -> Element<'a, AppMessage> {
    container(
        row()
            .push(icon::from_name("starred-symbolic").size(16).icon())
            .push(text::body(fl!("level-up", level = level)))
            .push(cosmic::widget::horizontal_space())
            .push(
                button::icon(icon::from_name("window-close-symbolic"))
                    .on_press(AppMessage::DismissLevelUp),
            )
            .spacing(8)
            .align_y(cosmic::iced::Alignment::Center),
    )
    .padding(8)
    .width(Length::Fill)
    .into()
}

fn error_banner<'a>(message: &'a str) -> Element<'a, AppMessage> {
    container(
        row()
            .push(icon::from_name("dialog-warning-symbolic").size(16).icon())
            .push(text::body(message))
            .push(cosmic::widget::horizontal_space())
            .push(
                button::icon(icon::from_name("window-close-symbolic"))
                    .on_press(AppMessage::ClearError),
            )
            .spacing(8)
            .align_y(cosmic::iced::Alignment::Center),
    )
    .padding(8)
    .width(Length::Fill)
    .into()
}
