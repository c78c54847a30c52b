// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/paper.rs
//
// Practice paper: numbered questions with cropped figures and answers.

use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, ZoomTarget};
use crate::domain::record::MistakeRecord;
use crate::fl;
use crate::ui::views::list::subject_label;
use crate::ui::widgets::crop_view;

pub fn view(model: &AppModel) -> Element<'_, AppMessage> {
    let records = model.paper_records();

    let header = row()
        .push(
            button::icon(icon::from_name("go-previous-symbolic"))
                .on_press(AppMessage::ClosePaper),
        )
        .push(text::title3(fl!("paper-title", count = records.len())))
        .push(cosmic::widget::horizontal_space())
        .push(
            button::standard(if model.paper.show_images {
                fl!("hide-figures")
            } else {
                fl!("show-figures")
            })
            .on_press(AppMessage::TogglePaperImages),
        )
        .push(
            button::standard(if model.paper.show_answers {
                fl!("hide-answers")
            } else {
                fl!("show-answers")
            })
            .on_press(AppMessage::TogglePaperAnswers),
        )
        .spacing(8)
        .align_y(Alignment::Center);

    let mut questions = column().spacing(24);
    for (index, record) in records.iter().enumerate() {
        questions = questions.push(question(model, index, record));
    }

    scrollable(
        column()
            .push(header)
            .push(questions)
            .spacing(16)
            .padding(16)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn question<'a>(
    model: &'a AppModel,
    index: usize,
    record: &'a MistakeRecord,
) -> Element<'a, AppMessage> {
    let mut body = column().spacing(8);

    let question_text = record
        .analysis
        .as_ref()
        .map_or_else(|| fl!("not-analyzed"), |a| a.question_text.clone());

    body = body.push(
        row()
            .push(text::heading(format!("{}.", index + 1)))
            .push(text::caption(subject_label(record.subject)))
            .spacing(8)
            .align_y(Alignment::Center),
    );
    body = body.push(text::body(question_text));

    // Cropped figure with zoom and region-adjust affordances.
    if model.paper.show_images {
        if let Some(photo) = model.photos.get(&record.id) {
            let figure: Element<'_, AppMessage> = match record.region() {
                Some(region) => crop_view(photo, &region)
                    .on_zoom(AppMessage::ShowZoom(ZoomTarget::Record(record.id)))
                    .into(),
                None => cosmic::iced_widget::image(photo.handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .into(),
            };
            body = body.push(container(figure).width(Length::Fixed(480.0)));
            body = body.push(
                row()
                    .push(
                        button::standard(fl!("adjust-region"))
                            .on_press(AppMessage::OpenRegionEditor(record.id)),
                    )
                    .push(
                        button::standard(fl!("view-full-photo"))
                            .on_press(AppMessage::ShowZoom(ZoomTarget::Record(record.id))),
                    )
                    .spacing(8),
            );
        }
    }

    // Blank answer area.
    body = body.push(
        container(text::caption(fl!("answer-area")))
            .width(Length::Fill)
            .height(Length::Fixed(96.0))
            .padding(12),
    );

    if model.paper.show_answers {
        if let Some(analysis) = &record.analysis {
            body = body.push(
                container(
                    column()
                        .push(text::heading(fl!("correct-answer")))
                        .push(text::body(analysis.correct_answer.clone()))
                        .push(text::heading(fl!("explanation")))
                        .push(text::body(analysis.explanation.clone()))
                        .spacing(4),
                )
                .padding(12)
                .width(Length::Fill),
            );
        }
    }

    container(body).padding(8).width(Length::Fill).into()
}
