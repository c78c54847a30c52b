// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/dialogs.rs
//
// Modal dialogs: destructive confirmations and the smart paper builder.

use cosmic::widget::{button, column, dialog, flex_row, row, text};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, ConfirmAction, SmartPaperDraft};
use crate::domain::practice;
use crate::domain::record::Subject;
use crate::fl;
use crate::ui::views::list::subject_label;

pub fn view(model: &AppModel) -> Option<Element<'_, AppMessage>> {
    if let Some(action) = model.confirm {
        return Some(confirm(action));
    }
    model
        .smart_dialog
        .as_ref()
        .map(|draft| smart_paper(model, draft))
}

fn confirm<'a>(action: ConfirmAction) -> Element<'a, AppMessage> {
    let (title, body) = match action {
        ConfirmAction::DeleteRecord(_) => (fl!("delete-record-title"), fl!("delete-record-body")),
        ConfirmAction::ClearDone => (fl!("clear-done-title"), fl!("clear-done-body")),
    };

    dialog()
        .title(title)
        .body(body)
        .primary_action(button::destructive(fl!("delete")).on_press(AppMessage::ConfirmAccepted))
        .secondary_action(button::standard(fl!("cancel")).on_press(AppMessage::ConfirmCancelled))
        .into()
}

fn smart_paper<'a>(model: &'a AppModel, draft: &'a SmartPaperDraft) -> Element<'a, AppMessage> {
    let mut subjects = row().spacing(8);
    let chip = |label: String, active: bool, message: AppMessage| {
        if active {
            button::suggested(label).on_press(message)
        } else {
            button::standard(label).on_press(message)
        }
    };
    subjects = subjects.push(chip(
        fl!("subject-mixed"),
        draft.subject.is_none(),
        AppMessage::SmartDialogSubject(None),
    ));
    for subject in Subject::ALL {
        subjects = subjects.push(chip(
            subject_label(subject),
            draft.subject == Some(subject),
            AppMessage::SmartDialogSubject(Some(subject)),
        ));
    }

    let count = row()
        .push(
            button::standard("-")
                .on_press(AppMessage::SmartDialogCount(draft.count.saturating_sub(1))),
        )
        .push(text::heading(draft.count.to_string()))
        .push(button::standard("+").on_press(AppMessage::SmartDialogCount(draft.count + 1)))
        .spacing(8)
        .align_y(cosmic::iced::Alignment::Center);

    let mut controls = column()
        .push(text::caption(fl!("capture-subject")))
        .push(subjects)
        .push(text::caption(fl!("question-count")))
        .push(count)
        .spacing(8);

    let tags = practice::tags_for_subject(&model.records, draft.subject);
    if !tags.is_empty() {
        let chips: Vec<Element<'_, AppMessage>> = tags
            .into_iter()
            .map(|tag| {
                let active = draft.tags.contains(&tag);
                let chip = if active {
                    button::suggested(tag.clone())
                } else {
                    button::standard(tag.clone())
                };
                chip.on_press(AppMessage::SmartDialogToggleTag(tag)).into()
            })
            .collect();
        controls = controls
            .push(text::caption(fl!("tag-filter")))
            .push(flex_row(chips).row_spacing(8).column_spacing(8));
    }

    dialog()
        .title(fl!("smart-paper-title"))
        .body(fl!("smart-paper-body"))
        .control(controls)
        .primary_action(
            button::suggested(fl!("build-paper")).on_press(AppMessage::ConfirmSmartPaper),
        )
        .secondary_action(button::standard(fl!("cancel")).on_press(AppMessage::CloseSmartDialog))
        .into()
}
