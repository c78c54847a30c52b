// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/list.rs
//
// Record list: tabs, filters, search, and the mistake cards.

use cosmic::iced::{Alignment, Length};
use cosmic::iced_widget::progress_bar;
use cosmic::widget::{
    button, checkbox, column, container, flex_row, icon, row, scrollable, text, text_input,
};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::AppModel;
use crate::domain::practice::{self, ListTab};
use crate::domain::record::{Difficulty, MistakeRecord, Subject};
use crate::fl;

pub fn view(model: &AppModel) -> Element<'_, AppMessage> {
    let mut content = column().spacing(16).padding(16).width(Length::Fill);

    if model.selection_mode {
        content = content.push(selection_hud(model));
    } else {
        content = content
            .push(stats_strip(model))
            .push(tabs(model))
            .push(
                text_input(fl!("search-placeholder"), &model.filter.search)
                    .on_input(AppMessage::SetSearch),
            )
            .push(subject_filter(model));

        let tags = practice::tags_for_subject(&model.records, model.filter.subject);
        if model.filter.subject.is_some() && !tags.is_empty() {
            content = content.push(tag_cloud(&tags, &model.filter.tags));
        }
        content = content.push(list_toolbar(model));
    }

    let filtered = model.filter.apply(&model.records);
    let cards: Element<'_, AppMessage> = if filtered.is_empty() {
        container(text::body(fl!("empty-list")))
            .width(Length::Fill)
            .padding(48)
            .center_x(Length::Fill)
            .into()
    } else {
        let mut cards = column().spacing(12);
        for record in filtered {
            cards = cards.push(card(model, record));
        }
        cards.into()
    };

    scrollable(content.push(cards))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Level, XP progress, and streak in one row.
fn stats_strip(model: &AppModel) -> Element<'_, AppMessage> {
    let stats = &model.stats;
    row()
        .push(text::heading(fl!("level-label", level = stats.level)))
        .push(
            container(progress_bar(0.0..=1.0, stats.level_progress()).height(8.0))
                .width(Length::Fixed(160.0)),
        )
        .push(text::caption(fl!(
            "xp-label",
            xp = stats.xp,
            needed = stats.xp_for_next_level()
        )))
        .push(cosmic::widget::horizontal_space())
        .push(icon::from_name("weather-clear-symbolic").size(16).icon())
        .push(text::body(fl!("streak-label", days = stats.streak)))
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

fn tabs(model: &AppModel) -> Element<'_, AppMessage> {
    let todo = model.records.iter().filter(|r| !r.reviewed).count();
    let done = model.records.len() - todo;

    let tab = |label: String, active: bool, message: AppMessage| {
        if active {
            button::suggested(label).on_press(message)
        } else {
            button::standard(label).on_press(message)
        }
    };

    row()
        .push(tab(
            fl!("tab-todo", count = todo),
            model.filter.tab == ListTab::Todo,
            AppMessage::SetTab(ListTab::Todo),
        ))
        .push(tab(
            fl!("tab-done", count = done),
            model.filter.tab == ListTab::Done,
            AppMessage::SetTab(ListTab::Done),
        ))
        .spacing(8)
        .into()
}

fn subject_filter(model: &AppModel) -> Element<'_, AppMessage> {
    let mut filters = row().spacing(8);
    let chip = |label: String, active: bool, message: AppMessage| {
        if active {
            button::suggested(label).on_press(message)
        } else {
            button::standard(label).on_press(message)
        }
    };

    filters = filters.push(chip(
        fl!("subject-all"),
        model.filter.subject.is_none(),
        AppMessage::SetSubjectFilter(None),
    ));
    for subject in Subject::ALL {
        filters = filters.push(chip(
            subject_label(subject),
            model.filter.subject == Some(subject),
            AppMessage::SetSubjectFilter(Some(subject)),
        ));
    }
    filters.into()
}

fn tag_cloud<'a>(tags: &[String], selected: &[String]) -> Element<'a, AppMessage> {
    let chips: Vec<Element<'a, AppMessage>> = tags
        .iter()
        .map(|tag| {
            let active = selected.contains(tag);
            let chip = if active {
                button::suggested(tag.clone())
            } else {
                button::standard(tag.clone())
            };
            chip.on_press(AppMessage::ToggleTagFilter(tag.clone()))
                .into()
        })
        .collect();

    column()
        .push(text::caption(fl!("tag-filter")))
        .push(flex_row(chips).row_spacing(8).column_spacing(8))
        .spacing(8)
        .into()
}

fn list_toolbar(model: &AppModel) -> Element<'_, AppMessage> {
    let mut toolbar = row().spacing(8).align_y(Alignment::Center);

    if !model.filter.tags.is_empty() && model.filter.tab == ListTab::Todo {
        toolbar = toolbar
            .push(button::suggested(fl!("targeted-practice")).on_press(AppMessage::QuickPractice));
    }

    toolbar = toolbar.push(cosmic::widget::horizontal_space());
    toolbar = toolbar.push(match model.filter.tab {
        ListTab::Todo => {
            button::standard(fl!("manual-paper")).on_press(AppMessage::ToggleSelectionMode)
        }
        ListTab::Done => {
            button::destructive(fl!("clear-done")).on_press(AppMessage::RequestClearDone)
        }
    });
    toolbar.into()
}

/// Banner shown while picking questions for a manual paper.
fn selection_hud(model: &AppModel) -> Element<'_, AppMessage> {
    row()
        .push(
            button::icon(icon::from_name("window-close-symbolic"))
                .on_press(AppMessage::ToggleSelectionMode),
        )
        .push(text::heading(fl!(
            "selection-count",
            count = model.selected_ids.len()
        )))
        .push(cosmic::widget::horizontal_space())
        .push({
            let confirm = button::suggested(fl!("build-paper"));
            if model.selected_ids.is_empty() {
                confirm
            } else {
                confirm.on_press(AppMessage::StartManualPaper)
            }
        })
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}

fn card<'a>(model: &'a AppModel, record: &'a MistakeRecord) -> Element<'a, AppMessage> {
    let mut info = column().spacing(4);

    info = info.push(
        row()
            .push(text::caption(subject_label(record.subject)))
            .push(text::caption(
                record.created_at.format("%Y-%m-%d").to_string(),
            ))
            .spacing(8),
    );

    match &record.analysis {
        Some(analysis) => {
            info = info.push(text::body(analysis.question_text.clone()));
            let mut meta = row().spacing(8);
            meta = meta.push(text::caption(analysis.question_type.clone()));
            meta = meta.push(text::caption(difficulty_label(analysis.difficulty)));
            for tag in &analysis.tags {
                meta = meta.push(text::caption(format!("#{tag}")));
            }
            info = info.push(meta);
        }
        None => {
            info = info.push(text::body(fl!("not-analyzed")));
        }
    }

    let open_message = if model.selection_mode {
        AppMessage::ToggleSelected(record.id)
    } else {
        AppMessage::ShowDetail(record.id)
    };

    let mut line = row().spacing(8).align_y(Alignment::Center);
    if model.selection_mode {
        let id = record.id;
        line = line.push(
            checkbox("", model.selected_ids.contains(&record.id))
                .on_toggle(move |_| AppMessage::ToggleSelected(id)),
        );
    }
    line = line.push(
        button::custom(info)
            .on_press(open_message)
            .width(Length::Fill),
    );
    if !model.selection_mode {
        line = line.push(
            button::icon(icon::from_name(if record.reviewed {
                "object-select-symbolic"
            } else {
                "radio-symbolic"
            }))
            .on_press(AppMessage::ToggleReviewed(record.id)),
        );
        line = line.push(
            button::icon(icon::from_name("user-trash-symbolic"))
                .on_press(AppMessage::RequestDeleteRecord(record.id)),
        );
    }

    container(line).padding(12).width(Length::Fill).into()
}

pub fn subject_label(subject: Subject) -> String {
    match subject {
        Subject::Math => fl!("subject-math"),
        Subject::Chinese => fl!("subject-chinese"),
        Subject::English => fl!("subject-english"),
    }
}

pub fn difficulty_label(difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Easy => fl!("difficulty-easy"),
        Difficulty::Medium => fl!("difficulty-medium"),
        Difficulty::Hard => fl!("difficulty-hard"),
    }
}
