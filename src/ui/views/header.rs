// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/header.rs
//
// Header bar buttons.

use cosmic::widget::{button, icon};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, AppView};
use crate::fl;

pub fn start(model: &AppModel) -> Vec<Element<'_, AppMessage>> {
    // Overlays close layer by layer; plain screens go straight back.
    let back = if model.editor.is_some() || model.zoom.is_some() {
        AppMessage::EscapePressed
    } else if model.view != AppView::List {
        AppMessage::ShowList
    } else {
        return Vec::new();
    };
    vec![
        button::icon(icon::from_name("go-previous-symbolic"))
            .on_press(back)
            .into(),
    ]
}

pub fn end(model: &AppModel) -> Vec<Element<'_, AppMessage>> {
    if model.view != AppView::List || model.editor.is_some() || model.zoom.is_some() {
        return Vec::new();
    }
    vec![
        button::standard(fl!("smart-paper")).on_press(AppMessage::OpenSmartDialog).into(),
        button::standard(fl!("growth-report")).on_press(AppMessage::ShowReport).into(),
        button::suggested(fl!("capture")).on_press(AppMessage::ShowCapture).into(),
    ]
}
