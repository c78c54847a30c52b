// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/detail.rs
//
// Record detail: photo with the detected region, analysis sections.

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::Element;
use uuid::Uuid;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, ZoomTarget};
use crate::fl;
use crate::ui::views::list::{difficulty_label, subject_label};
use crate::ui::widgets::highlight_view;

pub fn view(model: &AppModel, id: Uuid) -> Element<'_, AppMessage> {
    let Some(record) = model.record(id) else {
        return container(text::body(fl!("record-missing")))
            .center(Length::Fill)
            .into();
    };

    let mut content = column().spacing(16).padding(16).width(Length::Fill);

    content = content.push(
        row()
            .push(text::caption(subject_label(record.subject)))
            .push(text::caption(
                record.created_at.format("%Y-%m-%d").to_string(),
            ))
            .push(cosmic::widget::horizontal_space())
            .push(
                button::standard(if record.reviewed {
                    fl!("reviewed")
                } else {
                    fl!("not-reviewed")
                })
                .on_press(AppMessage::ToggleReviewed(record.id)),
            )
            .push(
                button::icon(icon::from_name("user-trash-symbolic"))
                    .on_press(AppMessage::RequestDeleteRecord(record.id)),
            )
            .spacing(8)
            .align_y(Alignment::Center),
    );

    // Photo with the detected region outlined; click-through to the
    // full-screen view and into the region editor.
    match model.photos.get(&record.id) {
        Some(photo) => {
            content = content.push(
                container(highlight_view(photo, record.region()))
                    .width(Length::Fill)
                    .height(Length::Fixed(360.0)),
            );
            content = content.push(
                row()
                    .push(
                        button::standard(fl!("view-full-photo"))
                            .on_press(AppMessage::ShowZoom(ZoomTarget::Record(record.id))),
                    )
                    .push(
                        button::standard(fl!("adjust-region"))
                            .on_press(AppMessage::OpenRegionEditor(record.id)),
                    )
                    .spacing(8),
            );
        }
        None => {
            content = content.push(text::body(fl!("photo-missing")));
        }
    }

    if let Some(analysis) = &record.analysis {
        content = content
            .push(section(fl!("question-text"), analysis.question_text.clone()))
            .push(
                row()
                    .push(section(
                        fl!("correct-answer"),
                        analysis.correct_answer.clone(),
                    ))
                    .push(section(
                        fl!("difficulty"),
                        difficulty_label(analysis.difficulty),
                    ))
                    .spacing(16),
            )
            .push(section(fl!("explanation"), analysis.explanation.clone()));

        if let Some(original) = &analysis.original_answer {
            content = content.push(section(fl!("original-answer"), original.clone()));
        }

        if !analysis.tags.is_empty() {
            let mut tags = row().spacing(8);
            for tag in &analysis.tags {
                tags = tags.push(text::caption(format!("#{tag}")));
            }
            content = content.push(tags);
        }
    }

    scrollable(content).width(Length::Fill).height(Length::Fill).into()
}

fn section<'a>(title: String, body: String) -> Element<'a, AppMessage> {
    container(
        column()
            .push(text::heading(title))
            .push(text::body(body))
            .spacing(4),
    )
    .padding(12)
    .width(Length::Fill)
    .into()
}
