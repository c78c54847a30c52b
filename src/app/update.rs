// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Message handling: state transitions and tasks.

use cosmic::{Action, Task};

use crate::app::App;
use crate::app::editor::RegionEditSession;
use crate::app::message::AppMessage;
use crate::app::model::{
    AppView, CaptureStep, ConfirmAction, DetectedQuestion, ReportState, SmartPaperDraft,
    ZoomTarget,
};
use crate::constant::{
    MAX_CAPTURE_PHOTOS, SMART_PAPER_DEFAULT_COUNT, XP_FIRST_REVIEW, XP_PER_MISTAKE,
    XP_SMART_PAPER, XP_TAGGED_PAPER,
};
use crate::domain::photo::Photo;
use crate::domain::practice::{self, ListTab, SmartPaperRequest};
use crate::domain::record::MistakeRecord;
use crate::fl;
use crate::services::vision::{PhotoPayload, RecordDigest, VisionClient, VisionConfig};

pub fn update(app: &mut App, message: AppMessage) -> Task<Action<AppMessage>> {
    match message {
        // ---------------------------------------------------------------------
        // Navigation
        // ---------------------------------------------------------------------
        AppMessage::ShowList => {
            app.model.view = AppView::List;
        }

        AppMessage::ShowCapture => {
            app.model.capture = Default::default();
            app.model.capture.subject = Some(app.config.default_subject);
            app.model.view = AppView::Capture;
        }

        AppMessage::ShowReport => {
            app.model.view = AppView::Report;
            return start_report(app);
        }

        AppMessage::ShowDetail(id) => {
            app.ensure_photo(id);
            app.model.view = AppView::Detail(id);
        }

        // ---------------------------------------------------------------------
        // List filters
        // ---------------------------------------------------------------------
        AppMessage::SetTab(tab) => {
            app.model.filter.tab = tab;
        }

        AppMessage::SetSubjectFilter(subject) => {
            app.model.filter.subject = subject;
            // Tags belong to a subject; changing it invalidates them.
            app.model.filter.tags.clear();
        }

        AppMessage::SetSearch(query) => {
            app.model.filter.search = query;
        }

        AppMessage::ToggleTagFilter(tag) => {
            toggle_tag(&mut app.model.filter.tags, tag);
        }

        // ---------------------------------------------------------------------
        // Paper building
        // ---------------------------------------------------------------------
        AppMessage::ToggleSelectionMode => {
            if app.model.selection_mode {
                app.model.reset_selection();
            } else {
                app.model.selection_mode = true;
            }
        }

        AppMessage::ToggleSelected(id) => {
            if !app.model.selected_ids.insert(id) {
                app.model.selected_ids.remove(&id);
            }
        }

        AppMessage::StartManualPaper => {
            if app.model.selected_ids.is_empty() {
                return Task::none();
            }
            // Paper order follows the list order, not click order.
            app.model.paper.ids = app
                .model
                .records
                .iter()
                .filter(|r| app.model.selected_ids.contains(&r.id))
                .map(|r| r.id)
                .collect();
            for id in app.model.paper.ids.clone() {
                app.ensure_photo(id);
            }
            app.model.reset_selection();
            app.model.view = AppView::Paper;
        }

        AppMessage::OpenSmartDialog => {
            app.model.smart_dialog = Some(SmartPaperDraft {
                subject: app.model.filter.subject,
                ..SmartPaperDraft::default()
            });
        }

        AppMessage::CloseSmartDialog => {
            app.model.smart_dialog = None;
        }

        AppMessage::SmartDialogSubject(subject) => {
            if let Some(draft) = app.model.smart_dialog.as_mut() {
                draft.subject = subject;
                draft.tags.clear();
            }
        }

        AppMessage::SmartDialogCount(count) => {
            if let Some(draft) = app.model.smart_dialog.as_mut() {
                draft.count = count.max(1);
            }
        }

        AppMessage::SmartDialogToggleTag(tag) => {
            if let Some(draft) = app.model.smart_dialog.as_mut() {
                toggle_tag(&mut draft.tags, tag);
            }
        }

        AppMessage::ConfirmSmartPaper => {
            if let Some(draft) = app.model.smart_dialog.take() {
                let request = SmartPaperRequest {
                    subject: draft.subject,
                    count: draft.count,
                    tags: draft.tags,
                };
                open_smart_paper(app, &request);
            }
        }

        AppMessage::QuickPractice => {
            let request = SmartPaperRequest {
                subject: app.model.filter.subject,
                count: SMART_PAPER_DEFAULT_COUNT,
                tags: app.model.filter.tags.clone(),
            };
            open_smart_paper(app, &request);
        }

        // ---------------------------------------------------------------------
        // Record operations
        // ---------------------------------------------------------------------
        AppMessage::ToggleReviewed(id) => {
            let Some(record) = app.model.records.iter_mut().find(|r| r.id == id) else {
                return Task::none();
            };
            record.reviewed = !record.reviewed;
            let now_reviewed = record.reviewed;
            let updated = record.clone();

            if let Err(e) = app.store.upsert_records(std::slice::from_ref(&updated)) {
                app.model.set_error(e.to_string());
                return Task::none();
            }
            if now_reviewed {
                app.model.stats.reviewed_count += 1;
                app.award_xp(XP_FIRST_REVIEW);
            }
        }

        AppMessage::RequestDeleteRecord(id) => {
            app.model.confirm = Some(ConfirmAction::DeleteRecord(id));
        }

        AppMessage::RequestClearDone => {
            if app.model.records.iter().any(|r| r.reviewed) {
                app.model.confirm = Some(ConfirmAction::ClearDone);
            }
        }

        AppMessage::ConfirmAccepted => {
            match app.model.confirm.take() {
                Some(ConfirmAction::DeleteRecord(id)) => delete_record(app, id),
                Some(ConfirmAction::ClearDone) => clear_done(app),
                None => {}
            }
        }

        AppMessage::ConfirmCancelled => {
            app.model.confirm = None;
        }

        // ---------------------------------------------------------------------
        // Capture flow
        // ---------------------------------------------------------------------
        AppMessage::PickPhotos => {
            let picked = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
                .pick_files()
                .unwrap_or_default();
            for path in picked {
                if app.model.capture.photo_paths.len() >= MAX_CAPTURE_PHOTOS {
                    break;
                }
                match Photo::open(&path) {
                    Ok(photo) => {
                        app.model.capture.photo_paths.push(path);
                        app.model.capture.previews.push(photo);
                    }
                    Err(e) => {
                        log::warn!("Skipping photo {}: {e}", path.display());
                        app.model.set_error(fl!("photo-open-failed"));
                    }
                }
            }
        }

        AppMessage::RemovePhoto(index) => {
            if index < app.model.capture.photo_paths.len() {
                app.model.capture.photo_paths.remove(index);
                app.model.capture.previews.remove(index);
            }
        }

        AppMessage::SetCaptureSubject(subject) => {
            app.model.capture.subject = Some(subject);
        }

        AppMessage::StartScan => {
            return start_scan(app);
        }

        AppMessage::ScanFinished(result) => match result {
            Ok(questions) if questions.is_empty() => {
                app.model.capture.step = CaptureStep::Pick;
                app.model.set_error(fl!("no-questions-found"));
            }
            Ok(questions) => {
                app.model.capture.detected = questions
                    .into_iter()
                    .map(|analysis| DetectedQuestion {
                        analysis,
                        selected: true,
                    })
                    .collect();
                app.model.capture.step = CaptureStep::Select;
            }
            Err(e) => {
                log::error!("Scan failed: {e}");
                app.model.capture.step = CaptureStep::Pick;
                app.model.set_error(fl!("scan-failed"));
            }
        },

        AppMessage::ToggleDetected(index) => {
            if let Some(question) = app.model.capture.detected.get_mut(index) {
                question.selected = !question.selected;
            }
        }

        AppMessage::ToggleAllDetected => {
            let target = !app.model.capture.all_selected();
            for question in &mut app.model.capture.detected {
                question.selected = target;
            }
        }

        AppMessage::ConfirmDetected => {
            confirm_detected(app);
        }

        AppMessage::CancelCapture => {
            app.model.capture = Default::default();
            app.model.view = AppView::List;
        }

        // ---------------------------------------------------------------------
        // Zoom overlay
        // ---------------------------------------------------------------------
        AppMessage::ShowZoom(target) => {
            if let ZoomTarget::Record(id) = target {
                app.ensure_photo(id);
            }
            app.model.zoom = Some(target);
        }

        AppMessage::CloseZoom => {
            app.model.zoom = None;
        }

        // ---------------------------------------------------------------------
        // Region editor
        // ---------------------------------------------------------------------
        AppMessage::OpenRegionEditor(id) => {
            app.ensure_photo(id);
            if let Some(record) = app.model.record(id) {
                app.model.editor = Some(RegionEditSession::start(record));
            }
        }

        AppMessage::RegionDragStart { x, y, mode } => {
            if let Some(editor) = app.model.editor.as_mut() {
                editor.begin_drag(mode, x, y);
            }
        }

        AppMessage::RegionDragMoved { x, y } => {
            if let Some(editor) = app.model.editor.as_mut() {
                editor.update_drag(x, y);
            }
        }

        AppMessage::RegionDragEnd => {
            if let Some(editor) = app.model.editor.as_mut() {
                editor.end_drag();
            }
        }

        AppMessage::SaveRegion => {
            save_region(app);
        }

        AppMessage::CancelRegion => {
            // Dropping the session discards every in-session change.
            app.model.editor = None;
        }

        // ---------------------------------------------------------------------
        // Practice paper
        // ---------------------------------------------------------------------
        AppMessage::TogglePaperAnswers => {
            app.model.paper.show_answers = !app.model.paper.show_answers;
        }

        AppMessage::TogglePaperImages => {
            app.model.paper.show_images = !app.model.paper.show_images;
        }

        AppMessage::ClosePaper => {
            app.model.paper.ids.clear();
            app.model.view = AppView::List;
        }

        // ---------------------------------------------------------------------
        // Report
        // ---------------------------------------------------------------------
        AppMessage::ReportLoaded(result) => {
            app.model.report = match result {
                Ok(report) => ReportState::Ready(report),
                Err(e) => {
                    log::error!("Report generation failed: {e}");
                    ReportState::Failed(fl!("report-failed"))
                }
            };
        }

        // ---------------------------------------------------------------------
        // Gamification
        // ---------------------------------------------------------------------
        AppMessage::DismissLevelUp => {
            app.model.level_up = false;
        }

        // ---------------------------------------------------------------------
        // Keyboard
        // ---------------------------------------------------------------------
        AppMessage::EscapePressed => {
            escape(app);
        }

        // ---------------------------------------------------------------------
        // Errors
        // ---------------------------------------------------------------------
        AppMessage::ShowError(msg) => {
            app.model.set_error(msg);
        }

        AppMessage::ClearError => {
            app.model.clear_error();
        }
    }

    Task::none()
}

// =============================================================================
// Helpers
// =============================================================================

/// Escape closes the topmost layer: overlays first, then modal flows,
/// then navigation back to the list.
fn escape(app: &mut App) {
    if app.model.editor.is_some() {
        app.model.editor = None;
    } else if app.model.zoom.is_some() {
        app.model.zoom = None;
    } else if app.model.confirm.is_some() {
        app.model.confirm = None;
    } else if app.model.smart_dialog.is_some() {
        app.model.smart_dialog = None;
    } else if app.model.error.is_some() {
        app.model.clear_error();
    } else if app.model.selection_mode {
        app.model.reset_selection();
    } else if app.model.view != AppView::List {
        app.model.view = AppView::List;
    }
}

fn toggle_tag(tags: &mut Vec<String>, tag: String) {
    if let Some(index) = tags.iter().position(|t| *t == tag) {
        tags.remove(index);
    } else {
        tags.push(tag);
    }
}

fn open_smart_paper(app: &mut App, request: &SmartPaperRequest) {
    let ids = practice::build_smart_paper(&app.model.records, request);
    if ids.is_empty() {
        app.model.set_error(fl!("no-matching-questions"));
        return;
    }
    let bonus = if request.tags.is_empty() {
        XP_SMART_PAPER
    } else {
        XP_TAGGED_PAPER
    };
    app.award_xp(bonus);

    for id in &ids {
        app.ensure_photo(*id);
    }
    app.model.paper.ids = ids;
    app.model.view = AppView::Paper;
}

fn delete_record(app: &mut App, id: uuid::Uuid) {
    if let Err(e) = app.store.delete_record(id) {
        log::error!("Failed to delete record {id}: {e}");
        app.model.set_error(fl!("delete-failed"));
        return;
    }
    app.model.records.retain(|r| r.id != id);
    app.model.photos.remove(&id);
    if app.model.view == AppView::Detail(id) {
        app.model.view = AppView::List;
    }
}

/// Delete every reviewed record. The loop keeps going past individual
/// failures; whatever could not be deleted stays in the list.
fn clear_done(app: &mut App) {
    let done: Vec<uuid::Uuid> = app
        .model
        .records
        .iter()
        .filter(|r| r.reviewed)
        .map(|r| r.id)
        .collect();

    let mut failures = 0usize;
    for id in done {
        match app.store.delete_record(id) {
            Ok(()) => {
                app.model.records.retain(|r| r.id != id);
                app.model.photos.remove(&id);
            }
            Err(e) => {
                failures += 1;
                log::error!("Failed to delete record {id}: {e}");
            }
        }
    }
    if failures > 0 {
        app.model.set_error(fl!("partial-delete-failed"));
    }
}

fn start_scan(app: &mut App) -> Task<Action<AppMessage>> {
    let photo_paths = app.model.capture.photo_paths.clone();
    if photo_paths.is_empty() {
        return Task::none();
    }
    let Some(subject) = app.model.capture.subject else {
        return Task::none();
    };

    let client = match VisionClient::new(VisionConfig::from_settings(
        app.config.vision_endpoint.clone(),
        app.config.vision_model.clone(),
    )) {
        Ok(client) => client,
        Err(e) => {
            app.model.set_error(e.to_string());
            return Task::none();
        }
    };

    let mut payloads = Vec::with_capacity(photo_paths.len());
    for path in &photo_paths {
        match PhotoPayload::from_file(path) {
            Ok(payload) => payloads.push(payload),
            Err(e) => {
                app.model.set_error(e.to_string());
                return Task::none();
            }
        }
    }

    app.model.clear_error();
    app.model.capture.step = CaptureStep::Analyzing;

    Task::perform(
        async move {
            client
                .detect_questions(payloads, subject)
                .await
                .map_err(|e| e.to_string())
        },
        |result| Action::App(AppMessage::ScanFinished(result)),
    )
}

fn confirm_detected(app: &mut App) {
    let Some(subject) = app.model.capture.subject else {
        return;
    };
    let selected: Vec<_> = app
        .model
        .capture
        .detected
        .iter()
        .filter(|q| q.selected)
        .cloned()
        .collect();
    if selected.is_empty() {
        app.model.set_error(fl!("select-at-least-one"));
        return;
    }

    let mut new_records = Vec::with_capacity(selected.len());
    for question in selected {
        let source = app
            .model
            .capture
            .photo_paths
            .get(question.analysis.source_image_index)
            .or_else(|| app.model.capture.photo_paths.first());
        let Some(source) = source else { continue };

        match app.store.import_photo(source) {
            Ok(relative) => {
                new_records.push(MistakeRecord::new(
                    subject,
                    relative,
                    Some(question.analysis),
                ));
            }
            Err(e) => {
                log::error!("Photo import failed: {e}");
                app.model.set_error(e.to_string());
                return;
            }
        }
    }

    if let Err(e) = app.store.upsert_records(&new_records) {
        app.model.set_error(e.to_string());
        return;
    }

    let count = new_records.len() as u32;
    for record in new_records.into_iter().rev() {
        app.model.records.insert(0, record);
    }
    app.model.stats.total_mistakes += count;
    app.award_xp(count * XP_PER_MISTAKE);

    app.model.capture = Default::default();
    app.model.filter.tab = ListTab::Todo;
    app.model.view = AppView::List;
}

fn save_region(app: &mut App) {
    let Some(session) = app.model.editor.take() else {
        return;
    };
    let Some(record) = app.model.record(session.record_id()).cloned() else {
        return;
    };

    let mut saved = None;
    session.commit(&record, &mut |updated| saved = Some(updated));
    let Some(updated) = saved else { return };

    if let Err(e) = app.store.upsert_records(std::slice::from_ref(&updated)) {
        app.model.set_error(e.to_string());
        return;
    }
    if let Some(slot) = app.model.records.iter_mut().find(|r| r.id == updated.id) {
        *slot = updated;
    }
}

fn start_report(app: &mut App) -> Task<Action<AppMessage>> {
    if matches!(
        app.model.report,
        ReportState::Loading | ReportState::Ready(_)
    ) {
        return Task::none();
    }

    let digests: Vec<RecordDigest> = app
        .model
        .records
        .iter()
        .filter_map(RecordDigest::from_record)
        .collect();
    if digests.is_empty() {
        app.model.report = ReportState::Idle;
        return Task::none();
    }

    let client = match VisionClient::new(VisionConfig::from_settings(
        app.config.vision_endpoint.clone(),
        app.config.vision_model.clone(),
    )) {
        Ok(client) => client,
        Err(e) => {
            app.model.report = ReportState::Failed(e.to_string());
            return Task::none();
        }
    };

    app.model.report = ReportState::Loading;
    Task::perform(
        async move {
            client
                .weak_point_report(digests)
                .await
                .map_err(|e| e.to_string())
        },
        |result| Action::App(AppMessage::ReportLoaded(result)),
    )
}
