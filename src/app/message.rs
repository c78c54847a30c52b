// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: events, user actions, and internal signals.

use uuid::Uuid;

use crate::app::editor::DragMode;
use crate::app::model::ZoomTarget;
use crate::domain::practice::ListTab;
use crate::domain::record::{Analysis, Subject};
use crate::services::vision::WeakPointReport;

#[derive(Debug, Clone)]
pub enum AppMessage {
    // Navigation.
    ShowList,
    ShowCapture,
    ShowReport,
    ShowDetail(Uuid),

    // List filters.
    SetTab(ListTab),
    SetSubjectFilter(Option<Subject>),
    SetSearch(String),
    ToggleTagFilter(String),

    // Paper building.
    ToggleSelectionMode,
    ToggleSelected(Uuid),
    StartManualPaper,
    OpenSmartDialog,
    CloseSmartDialog,
    SmartDialogSubject(Option<Subject>),
    SmartDialogCount(usize),
    SmartDialogToggleTag(String),
    ConfirmSmartPaper,
    QuickPractice,

    // Record operations.
    ToggleReviewed(Uuid),
    RequestDeleteRecord(Uuid),
    RequestClearDone,
    ConfirmAccepted,
    ConfirmCancelled,

    // Capture flow.
    PickPhotos,
    RemovePhoto(usize),
    SetCaptureSubject(Subject),
    StartScan,
    ScanFinished(Result<Vec<Analysis>, String>),
    ToggleDetected(usize),
    ToggleAllDetected,
    ConfirmDetected,
    CancelCapture,

    // Zoom overlay.
    ShowZoom(ZoomTarget),
    CloseZoom,

    // Region editor.
    OpenRegionEditor(Uuid),
    RegionDragStart { x: f32, y: f32, mode: DragMode },
    RegionDragMoved { x: f32, y: f32 },
    RegionDragEnd,
    SaveRegion,
    CancelRegion,

    // Practice paper.
    TogglePaperAnswers,
    TogglePaperImages,
    ClosePaper,

    // Report.
    ReportLoaded(Result<WeakPointReport, String>),

    // Gamification.
    DismissLevelUp,

    // Keyboard.
    EscapePressed,

    // Errors.
    #[allow(dead_code)]
    ShowError(String),
    ClearError,
}
