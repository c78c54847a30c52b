// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/capture.rs
//
// Capture flow: pick photos, scan, confirm detected questions.

use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget::{button, checkbox, column, container, icon, row, scrollable, text};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, CaptureStep, ZoomTarget};
use crate::constant::MAX_CAPTURE_PHOTOS;
use crate::domain::record::Subject;
use crate::fl;
use crate::ui::views::list::{difficulty_label, subject_label};
use crate::ui::widgets::crop_view;

pub fn view(model: &AppModel) -> Element<'_, AppMessage> {
    match model.capture.step {
        CaptureStep::Pick => pick(model),
        CaptureStep::Analyzing => analyzing(),
        CaptureStep::Select => select(model),
    }
}

fn pick(model: &AppModel) -> Element<'_, AppMessage> {
    let capture = &model.capture;

    let mut subjects = row().spacing(8);
    for subject in Subject::ALL {
        let chip = if capture.subject == Some(subject) {
            button::suggested(subject_label(subject))
        } else {
            button::standard(subject_label(subject))
        };
        subjects = subjects.push(chip.on_press(AppMessage::SetCaptureSubject(subject)));
    }

    let mut photos = column().spacing(8);
    for (index, photo) in capture.previews.iter().enumerate() {
        photos = photos.push(
            row()
                .push(
                    container(
                        cosmic::iced_widget::image(photo.handle.clone())
                            .content_fit(ContentFit::Contain)
                            .width(Length::Fixed(160.0))
                            .height(Length::Fixed(120.0)),
                    )
                    .padding(2),
                )
                .push(
                    button::icon(icon::from_name("user-trash-symbolic"))
                        .on_press(AppMessage::RemovePhoto(index)),
                )
                .spacing(8)
                .align_y(Alignment::Center),
        );
    }
    if capture.photo_paths.len() < MAX_CAPTURE_PHOTOS {
        photos = photos.push(button::standard(fl!("add-photo")).on_press(AppMessage::PickPhotos));
    }

    let scan = {
        let scan = button::suggested(fl!("start-scan"));
        if capture.photo_paths.is_empty() {
            scan
        } else {
            scan.on_press(AppMessage::StartScan)
        }
    };

    scrollable(
        column()
            .push(text::title3(fl!("capture-title")))
            .push(text::caption(fl!("capture-subject")))
            .push(subjects)
            .push(text::caption(fl!(
                "capture-photos",
                count = capture.photo_paths.len(),
                max = MAX_CAPTURE_PHOTOS
            )))
            .push(photos)
            .push(scan)
            .push(button::standard(fl!("cancel")).on_press(AppMessage::CancelCapture))
            .spacing(16)
            .padding(16)
            .width(Length::Fill),
    )
    .into()
}

fn analyzing<'a>() -> Element<'a, AppMessage> {
    container(
        column()
            .push(text::title3(fl!("analyzing-title")))
            .push(text::body(fl!("analyzing-hint")))
            .spacing(8)
            .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center(Length::Fill)
    .into()
}

fn select(model: &AppModel) -> Element<'_, AppMessage> {
    let capture = &model.capture;

    let header = row()
        .push(
            button::icon(icon::from_name("window-close-symbolic"))
                .on_press(AppMessage::CancelCapture),
        )
        .push(text::title3(fl!("select-title")))
        .push(cosmic::widget::horizontal_space())
        .push(
            button::standard(if capture.all_selected() {
                fl!("deselect-all")
            } else {
                fl!("select-all")
            })
            .on_press(AppMessage::ToggleAllDetected),
        )
        .spacing(12)
        .align_y(Alignment::Center);

    let mut questions = column().spacing(12);
    for (index, question) in capture.detected.iter().enumerate() {
        let analysis = &question.analysis;
        let mut body = column().spacing(8);

        // Crop preview of the identified region, when both the photo
        // and a usable region are available.
        let photo = capture
            .previews
            .get(analysis.source_image_index)
            .or_else(|| capture.previews.first());
        if let (Some(photo), Some(region)) = (photo, analysis.region.as_ref()) {
            body = body.push(
                crop_view(photo, region)
                    .on_zoom(AppMessage::ShowZoom(ZoomTarget::CapturePhoto(
                        analysis.source_image_index,
                    ))),
            );
        }

        body = body.push(text::body(analysis.question_text.clone()));
        body = body.push(
            row()
                .push(text::caption(analysis.question_type.clone()))
                .push(text::caption(difficulty_label(analysis.difficulty)))
                .spacing(8),
        );

        questions = questions.push(
            container(
                row()
                    .push(
                        checkbox("", question.selected)
                            .on_toggle(move |_| AppMessage::ToggleDetected(index)),
                    )
                    .push(body)
                    .spacing(8),
            )
            .padding(12)
            .width(Length::Fill),
        );
    }

    let confirm = {
        let label = fl!("confirm-detected", count = capture.selected_count());
        let confirm = button::suggested(label);
        if capture.selected_count() == 0 {
            confirm
        } else {
            confirm.on_press(AppMessage::ConfirmDetected)
        }
    };

    scrollable(
        column()
            .push(header)
            .push(text::caption(fl!("select-hint")))
            .push(questions)
            .push(confirm)
            .spacing(16)
            .padding(16)
            .width(Length::Fill),
    )
    .into()
}
