// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/views/report.rs
//
// Growth report: level hero, AI weak-point review, achievement wall.

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{column, container, icon, row, scrollable, text};
use cosmic::Element;

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, ReportState};
use crate::domain::stats::Achievement;
use crate::fl;

pub fn view(model: &AppModel) -> Element<'_, AppMessage> {
    let mut content = column().spacing(16).padding(16).width(Length::Fill);

    content = content.push(hero(model));
    content = content.push(weak_points(model));
    content = content.push(achievements(model));

    scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn hero(model: &AppModel) -> Element<'_, AppMessage> {
    let stats = &model.stats;
    let overall = match &model.report {
        ReportState::Ready(report) => report.overall_level.clone(),
        _ => fl!("default-rank"),
    };

    container(
        column()
            .push(text::title2(fl!("level-label", level = stats.level)))
            .push(text::body(fl!("total-xp", xp = stats.total_xp())))
            .push(text::caption(fl!("current-rank", rank = overall)))
            .push(text::caption(fl!("streak-label", days = stats.streak)))
            .spacing(4),
    )
    .padding(24)
    .width(Length::Fill)
    .into()
}

fn weak_points(model: &AppModel) -> Element<'_, AppMessage> {
    let mut section = column()
        .spacing(12)
        .push(text::title3(fl!("weak-points-title")));

    match &model.report {
        ReportState::Idle => {
            section = section.push(text::body(fl!("report-empty")));
        }
        ReportState::Loading => {
            section = section.push(text::body(fl!("report-loading")));
        }
        ReportState::Failed(message) => {
            section = section.push(text::body(message.clone()));
        }
        ReportState::Ready(report) => {
            section = section.push(text::body(report.summary.clone()));
            for point in &report.weak_points {
                section = section.push(
                    container(
                        column()
                            .push(
                                row()
                                    .push(text::heading(point.topic.clone()))
                                    .push(cosmic::widget::horizontal_space())
                                    .push(text::caption(fl!(
                                        "seen-count",
                                        count = point.count
                                    )))
                                    .align_y(Alignment::Center),
                            )
                            .push(text::body(point.description.clone()))
                            .push(text::caption(fl!("coach-suggestion")))
                            .push(text::body(point.suggestion.clone()))
                            .spacing(4),
                    )
                    .padding(12)
                    .width(Length::Fill),
                );
            }
        }
    }

    section.into()
}

fn achievements(model: &AppModel) -> Element<'_, AppMessage> {
    let total = model.records.len();
    let reviewed = model.records.iter().filter(|r| r.reviewed).count();

    let mut wall = row().spacing(12);
    for achievement in Achievement::ALL {
        let unlocked = achievement.unlocked(total, reviewed, &model.stats);
        let (title, desc) = achievement_text(achievement);
        wall = wall.push(
            container(
                column()
                    .push(
                        icon::from_name(if unlocked {
                            "emblem-favorite-symbolic"
                        } else {
                            "changes-prevent-symbolic"
                        })
                        .size(32)
                        .icon(),
                    )
                    .push(text::heading(title))
                    .push(text::caption(desc))
                    .push(text::caption(if unlocked {
                        fl!("unlocked")
                    } else {
                        fl!("locked")
                    }))
                    .spacing(4)
                    .align_x(Alignment::Center),
            )
            .padding(16),
        );
    }

    column()
        .push(text::title3(fl!("achievements-title")))
        .push(wall)
        .spacing(12)
        .into()
}

fn achievement_text(achievement: Achievement) -> (String, String) {
    match achievement {
        Achievement::DiligentBee => (fl!("ach-bee"), fl!("ach-bee-desc")),
        Achievement::Persistent => (fl!("ach-persistent"), fl!("ach-persistent-desc")),
        Achievement::ReviewAce => (fl!("ach-review"), fl!("ach-review-desc")),
        Achievement::TopOfClass => (fl!("ach-top"), fl!("ach-top-desc")),
    }
}
