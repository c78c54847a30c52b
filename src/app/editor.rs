// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/editor.rs
//
// Region editor session: drag state and clamped move/resize arithmetic.

use uuid::Uuid;

use crate::domain::record::MistakeRecord;
use crate::domain::region::NormalizedRegion;

/// What a drag does to the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Translate the whole region; dimensions stay fixed.
    Move,
    /// Drag the bottom-right corner; the top-left corner stays fixed.
    Resize,
}

/// An in-progress pointer drag. Created on pointer-down and dropped on
/// pointer-up, on cancel, and on editor close, so pointer capture can
/// never outlive the session.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    mode: DragMode,
    /// Pointer position at drag start, in region units.
    start_x: f32,
    start_y: f32,
    /// Region snapshot at drag start; every update is computed from
    /// this, not from the previous update.
    origin: NormalizedRegion,
}

/// Editing session for one record's question region.
///
/// The session owns a working copy of the region; the record itself is
/// only touched when the edit is committed. Dropping the session (the
/// cancel path) therefore has zero side effects.
#[derive(Debug, Clone)]
pub struct RegionEditSession {
    record_id: Uuid,
    region: NormalizedRegion,
    drag: Option<DragSession>,
}

impl RegionEditSession {
    /// Begin editing a record's region. A missing or degenerate starting
    /// region is replaced before the first interaction, so every later
    /// operation works on a well-formed box.
    pub fn start(record: &MistakeRecord) -> Self {
        let region = record
            .region()
            .map_or_else(NormalizedRegion::centered, NormalizedRegion::sanitized);
        Self {
            record_id: record.id,
            region,
            drag: None,
        }
    }

    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    pub fn region(&self) -> NormalizedRegion {
        self.region
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer-down at the given position (region units). A drag that is
    /// somehow still active is replaced, keeping sessions exclusive.
    pub fn begin_drag(&mut self, mode: DragMode, x: f32, y: f32) {
        self.drag = Some(DragSession {
            mode,
            start_x: x,
            start_y: y,
            origin: self.region,
        });
    }

    /// Pointer-move to the given position (region units). Out-of-range
    /// positions only press the region against the image edge.
    pub fn update_drag(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag else {
            return;
        };
        let dx = f64::from(x - drag.start_x);
        let dy = f64::from(y - drag.start_y);
        self.region = match drag.mode {
            DragMode::Move => drag.origin.translated(dx, dy),
            DragMode::Resize => drag.origin.resized(dx, dy),
        };
    }

    /// Pointer-up: release the drag, keep the region where it is.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Commit the edit: rebuild the record with only the region replaced
    /// and hand it to the update collaborator exactly once.
    pub fn commit<F>(self, record: &MistakeRecord, update: &mut F)
    where
        F: FnMut(MistakeRecord),
    {
        update(record.with_region(self.region));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{Analysis, Difficulty, Subject};
    use std::path::PathBuf;

    fn record_with_region(region: Option<NormalizedRegion>) -> MistakeRecord {
        MistakeRecord::new(
            Subject::Math,
            PathBuf::from("images/x.jpg"),
            Some(Analysis {
                question_text: "q".to_string(),
                question_type: "t".to_string(),
                original_answer: None,
                correct_answer: "a".to_string(),
                explanation: String::new(),
                difficulty: Difficulty::Medium,
                tags: Vec::new(),
                source_image_index: 0,
                region,
            }),
        )
    }

    #[test]
    fn missing_region_starts_centered() {
        let record = record_with_region(None);
        let session = RegionEditSession::start(&record);
        assert_eq!(session.region(), NormalizedRegion::centered());
    }

    #[test]
    fn degenerate_region_is_sanitized_before_editing() {
        let tiny = NormalizedRegion {
            y_min: 10,
            x_min: 10,
            y_max: 12,
            x_max: 12,
        };
        let record = record_with_region(Some(tiny));
        let session = RegionEditSession::start(&record);
        assert!(session.region().width() >= 50);
        assert!(session.region().height() >= 50);
    }

    #[test]
    fn move_drag_sequence_preserves_dimensions() {
        let record =
            record_with_region(Some(NormalizedRegion::new(200, 200, 800, 800).unwrap()));
        let mut session = RegionEditSession::start(&record);

        session.begin_drag(DragMode::Move, 500.0, 500.0);
        for (x, y) in [(620.0, 480.0), (90.0, 910.0), (700.0, 700.0)] {
            session.update_drag(x, y);
            assert_eq!(session.region().width(), 600);
            assert_eq!(session.region().height(), 600);
        }
        session.end_drag();
        assert!(!session.is_dragging());
        assert_eq!(session.region().as_array(), [400, 400, 1000, 1000]);
    }

    #[test]
    fn resize_drag_keeps_origin_and_minimum() {
        let record =
            record_with_region(Some(NormalizedRegion::new(100, 100, 600, 600).unwrap()));
        let mut session = RegionEditSession::start(&record);

        session.begin_drag(DragMode::Resize, 600.0, 600.0);
        session.update_drag(50.0, 50.0);
        let region = session.region();
        assert_eq!((region.x_min, region.y_min), (100, 100));
        assert!(region.width() >= 50 && region.height() >= 50);

        session.update_drag(2000.0, 2000.0);
        assert_eq!(session.region().x_max, 1000);
        assert_eq!(session.region().y_max, 1000);
        assert_eq!((session.region().x_min, session.region().y_min), (100, 100));
    }

    #[test]
    fn cancel_after_drags_leaves_record_untouched() {
        let original = record_with_region(Some(NormalizedRegion::new(200, 200, 800, 800).unwrap()));
        let snapshot = original.clone();
        let mut session = RegionEditSession::start(&original);

        for _ in 0..3 {
            session.begin_drag(DragMode::Move, 500.0, 500.0);
            session.update_drag(550.0, 450.0);
            session.end_drag();
        }
        drop(session);

        assert_eq!(original, snapshot);
    }

    #[test]
    fn commit_calls_collaborator_exactly_once() {
        let original = record_with_region(Some(NormalizedRegion::new(100, 100, 600, 600).unwrap()));
        let mut session = RegionEditSession::start(&original);
        session.begin_drag(DragMode::Resize, 600.0, 600.0);
        session.update_drag(800.0, 700.0);
        session.end_drag();
        let edited = session.region();

        let mut calls = Vec::new();
        session.commit(&original, &mut |updated| calls.push(updated));

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, original.id);
        assert_eq!(calls[0].photo_path, original.photo_path);
        assert_eq!(calls[0].region(), Some(edited));
        assert_eq!(edited.as_array(), [100, 100, 700, 800]);
    }
}
