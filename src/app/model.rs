// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Application state.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use uuid::Uuid;

use crate::app::editor::RegionEditSession;
use crate::config::AppConfig;
use crate::constant::SMART_PAPER_DEFAULT_COUNT;
use crate::domain::photo::Photo;
use crate::domain::practice::ListFilter;
use crate::domain::record::{Analysis, MistakeRecord, Subject};
use crate::domain::stats::UserStats;
use crate::services::vision::WeakPointReport;

// =============================================================================
// Enums
// =============================================================================

/// Which screen fills the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    List,
    Capture,
    Detail(Uuid),
    Paper,
    Report,
}

/// Capture flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureStep {
    #[default]
    Pick,
    Analyzing,
    Select,
}

/// What the full-screen zoom overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomTarget {
    Record(Uuid),
    CapturePhoto(usize),
}

/// Pending destructive action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteRecord(Uuid),
    ClearDone,
}

// =============================================================================
// Sub-state
// =============================================================================

/// One question the vision service found, pending user confirmation.
#[derive(Debug, Clone)]
pub struct DetectedQuestion {
    pub analysis: Analysis,
    pub selected: bool,
}

/// State of the photo capture / scan flow.
#[derive(Debug, Clone, Default)]
pub struct CaptureState {
    pub step: CaptureStep,
    pub subject: Option<Subject>,
    /// Source paths picked by the user, in order.
    pub photo_paths: Vec<PathBuf>,
    /// Decoded previews, parallel to `photo_paths`.
    pub previews: Vec<Photo>,
    pub detected: Vec<DetectedQuestion>,
}

impl CaptureState {
    pub fn selected_count(&self) -> usize {
        self.detected.iter().filter(|q| q.selected).count()
    }

    pub fn all_selected(&self) -> bool {
        !self.detected.is_empty() && self.detected.iter().all(|q| q.selected)
    }
}

/// State of an open practice paper.
#[derive(Debug, Clone, Default)]
pub struct PaperState {
    pub ids: Vec<Uuid>,
    pub show_answers: bool,
    pub show_images: bool,
}

/// Draft settings in the smart-paper dialog.
#[derive(Debug, Clone)]
pub struct SmartPaperDraft {
    pub subject: Option<Subject>,
    pub count: usize,
    pub tags: Vec<String>,
}

impl Default for SmartPaperDraft {
    fn default() -> Self {
        Self {
            subject: None,
            count: SMART_PAPER_DEFAULT_COUNT,
            tags: Vec::new(),
        }
    }
}

/// Weak-point report loading state.
#[derive(Debug, Clone, Default)]
pub enum ReportState {
    #[default]
    Idle,
    Loading,
    Ready(WeakPointReport),
    Failed(String),
}

// =============================================================================
// Model
// =============================================================================

pub struct AppModel {
    // Records.
    pub records: Vec<MistakeRecord>,
    pub stats: UserStats,
    /// Decoded photos by record id, filled lazily as records are shown.
    pub photos: HashMap<Uuid, Photo>,

    // Navigation.
    pub view: AppView,

    // List state.
    pub filter: ListFilter,
    pub selection_mode: bool,
    pub selected_ids: HashSet<Uuid>,

    // Flows.
    pub capture: CaptureState,
    pub paper: PaperState,
    pub report: ReportState,
    pub smart_dialog: Option<SmartPaperDraft>,

    // Overlays.
    pub editor: Option<RegionEditSession>,
    pub zoom: Option<ZoomTarget>,
    pub confirm: Option<ConfirmAction>,
    pub level_up: bool,

    // UI state.
    pub error: Option<String>,
}

impl AppModel {
    pub fn new(_config: AppConfig) -> Self {
        Self {
            records: Vec::new(),
            stats: UserStats::default(),
            photos: HashMap::new(),
            view: AppView::default(),
            filter: ListFilter::default(),
            selection_mode: false,
            selected_ids: HashSet::new(),
            capture: CaptureState::default(),
            paper: PaperState {
                show_images: true,
                ..PaperState::default()
            },
            report: ReportState::default(),
            smart_dialog: None,
            editor: None,
            zoom: None,
            confirm: None,
            level_up: false,
            error: None,
        }
    }

    pub fn set_error<S: Into<String>>(&mut self, msg: S) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn record(&self, id: Uuid) -> Option<&MistakeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records on the open practice paper, in paper order.
    pub fn paper_records(&self) -> Vec<&MistakeRecord> {
        self.paper
            .ids
            .iter()
            .filter_map(|id| self.record(*id))
            .collect()
    }

    /// Leave selection mode and forget the selection.
    pub fn reset_selection(&mut self) {
        self.selection_mode = false;
        self.selected_ids.clear();
    }
}
