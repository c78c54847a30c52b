// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/record.rs
//
// Mistake records and the AI analysis attached to them.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::region::{NormalizedRegion, deserialize_opt_region};

/// School subject a mistake belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Chinese,
    English,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Chinese, Subject::English];
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Math => write!(f, "math"),
            Subject::Chinese => write!(f, "chinese"),
            Subject::English => write!(f, "english"),
        }
    }
}

/// Difficulty grade assigned by the vision service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Structured result of analyzing one question on a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub original_answer: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Index of the photo the question was found on, for multi-photo scans.
    #[serde(default)]
    pub source_image_index: usize,
    /// Question region inside the photo. Anything malformed coming off
    /// the wire or disk collapses to `None` (full image).
    #[serde(default, deserialize_with = "deserialize_opt_region")]
    pub region: Option<NormalizedRegion>,
}

/// One recorded mistake: a photo plus whatever the analysis produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistakeRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub subject: Subject,
    /// App-owned copy of the imported photo.
    pub photo_path: PathBuf,
    #[serde(default)]
    pub analysis: Option<Analysis>,
    #[serde(default)]
    pub reviewed: bool,
}

impl MistakeRecord {
    pub fn new(subject: Subject, photo_path: PathBuf, analysis: Option<Analysis>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            subject,
            photo_path,
            analysis,
            reviewed: false,
        }
    }

    /// Current question region, if the analysis carries one.
    pub fn region(&self) -> Option<NormalizedRegion> {
        self.analysis.as_ref().and_then(|a| a.region)
    }

    /// Copy of this record with only the region replaced. Identity,
    /// photo, and analysis text are untouched; this is what gets handed
    /// to the store when a region edit is saved.
    pub fn with_region(&self, region: NormalizedRegion) -> Self {
        let mut updated = self.clone();
        if let Some(analysis) = updated.analysis.as_mut() {
            analysis.region = Some(region);
        }
        updated
    }

    /// Text the search box matches against.
    pub fn search_text(&self) -> &str {
        self.analysis
            .as_ref()
            .map_or("", |a| a.question_text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> Analysis {
        Analysis {
            question_text: "12 × 3 = ?".to_string(),
            question_type: "arithmetic".to_string(),
            original_answer: Some("35".to_string()),
            correct_answer: "36".to_string(),
            explanation: "Multiply the tens and ones separately.".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["multiplication".to_string()],
            source_image_index: 0,
            region: NormalizedRegion::new(100, 100, 400, 900),
        }
    }

    #[test]
    fn record_serde_round_trip() {
        let record = MistakeRecord::new(
            Subject::Math,
            PathBuf::from("images/abc.jpg"),
            Some(sample_analysis()),
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: MistakeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn with_region_replaces_only_the_region() {
        let record = MistakeRecord::new(
            Subject::Math,
            PathBuf::from("images/abc.jpg"),
            Some(sample_analysis()),
        );
        let region = NormalizedRegion::new(300, 300, 700, 700).unwrap();
        let updated = record.with_region(region);

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.photo_path, record.photo_path);
        assert_eq!(updated.region(), Some(region));
        assert_eq!(
            updated.analysis.as_ref().unwrap().question_text,
            record.analysis.as_ref().unwrap().question_text
        );
    }

    #[test]
    fn corrupt_region_on_disk_loads_as_none() {
        let json = r#"{
            "id": "a5f3c2f0-7a65-4b3b-9e46-ffffffffffff",
            "created_at": "2026-01-05T09:00:00Z",
            "subject": "math",
            "photo_path": "images/abc.jpg",
            "analysis": {
                "question_text": "q",
                "question_type": "t",
                "correct_answer": "a",
                "explanation": "e",
                "region": [5, 5]
            }
        }"#;
        let record: MistakeRecord = serde_json::from_str(json).unwrap();
        assert!(record.region().is_none());
    }
}
