// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/practice.rs
//
// Record list filtering and practice paper sampling.

use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::domain::record::{MistakeRecord, Subject};

/// Which completion tab the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListTab {
    #[default]
    Todo,
    Done,
}

/// Active filters over the record list.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub tab: ListTab,
    /// `None` means every subject.
    pub subject: Option<Subject>,
    pub tags: Vec<String>,
    pub search: String,
}

impl ListFilter {
    pub fn matches(&self, record: &MistakeRecord) -> bool {
        let status_ok = match self.tab {
            ListTab::Todo => !record.reviewed,
            ListTab::Done => record.reviewed,
        };
        let subject_ok = self.subject.is_none_or(|s| record.subject == s);
        let search_ok = self.search.is_empty()
            || record
                .search_text()
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let tags_ok = self.tags.is_empty() || record_has_any_tag(record, &self.tags);

        status_ok && subject_ok && search_ok && tags_ok
    }

    /// Apply the filter, preserving record order.
    pub fn apply<'a>(&self, records: &'a [MistakeRecord]) -> Vec<&'a MistakeRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

fn record_has_any_tag(record: &MistakeRecord, tags: &[String]) -> bool {
    record
        .analysis
        .as_ref()
        .is_some_and(|a| a.tags.iter().any(|t| tags.contains(t)))
}

/// All tags present on records of the given subject, sorted and deduped.
/// Feeds the tag-filter cloud.
pub fn tags_for_subject(records: &[MistakeRecord], subject: Option<Subject>) -> Vec<String> {
    let mut tags: Vec<String> = records
        .iter()
        .filter(|r| subject.is_none_or(|s| r.subject == s))
        .filter_map(|r| r.analysis.as_ref())
        .flat_map(|a| a.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Parameters of a smart-built practice paper.
#[derive(Debug, Clone)]
pub struct SmartPaperRequest {
    /// `None` mixes all subjects.
    pub subject: Option<Subject>,
    pub count: usize,
    pub tags: Vec<String>,
}

/// Pick up to `count` unreviewed records matching the request, in random
/// order. Returns an empty vector when nothing matches; the caller turns
/// that into a user-facing message.
pub fn build_smart_paper(records: &[MistakeRecord], request: &SmartPaperRequest) -> Vec<Uuid> {
    let mut candidates: Vec<&MistakeRecord> = records
        .iter()
        .filter(|r| !r.reviewed)
        .filter(|r| request.subject.is_none_or(|s| r.subject == s))
        .filter(|r| request.tags.is_empty() || record_has_any_tag(r, &request.tags))
        .collect();

    candidates.shuffle(&mut rand::thread_rng());
    candidates
        .into_iter()
        .take(request.count)
        .map(|r| r.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{Analysis, Difficulty};
    use std::path::PathBuf;

    fn record(subject: Subject, reviewed: bool, text: &str, tags: &[&str]) -> MistakeRecord {
        let mut r = MistakeRecord::new(
            subject,
            PathBuf::from("images/x.jpg"),
            Some(Analysis {
                question_text: text.to_string(),
                question_type: "misc".to_string(),
                original_answer: None,
                correct_answer: "42".to_string(),
                explanation: String::new(),
                difficulty: Difficulty::Medium,
                tags: tags.iter().map(ToString::to_string).collect(),
                source_image_index: 0,
                region: None,
            }),
        );
        r.reviewed = reviewed;
        r
    }

    fn fixture() -> Vec<MistakeRecord> {
        vec![
            record(Subject::Math, false, "long division", &["division"]),
            record(Subject::Math, true, "carry the one", &["addition"]),
            record(Subject::English, false, "past tense of go", &["grammar"]),
            record(Subject::Chinese, false, "stroke order", &[]),
        ]
    }

    #[test]
    fn filter_combines_status_subject_search_tags() {
        let records = fixture();

        let todo_math = ListFilter {
            subject: Some(Subject::Math),
            ..ListFilter::default()
        };
        assert_eq!(todo_math.apply(&records).len(), 1);

        let done = ListFilter {
            tab: ListTab::Done,
            ..ListFilter::default()
        };
        assert_eq!(done.apply(&records).len(), 1);

        let search = ListFilter {
            search: "TENSE".to_string(),
            ..ListFilter::default()
        };
        assert_eq!(search.apply(&records)[0].subject, Subject::English);

        let tagged = ListFilter {
            tags: vec!["division".to_string()],
            ..ListFilter::default()
        };
        assert_eq!(tagged.apply(&records).len(), 1);
    }

    #[test]
    fn subject_tags_are_sorted_and_deduped() {
        let mut records = fixture();
        records.push(record(Subject::Math, false, "more division", &["division"]));

        let tags = tags_for_subject(&records, Some(Subject::Math));
        assert_eq!(tags, vec!["addition".to_string(), "division".to_string()]);
    }

    #[test]
    fn smart_paper_skips_reviewed_and_respects_count() {
        let records = fixture();
        let picked = build_smart_paper(
            &records,
            &SmartPaperRequest {
                subject: None,
                count: 2,
                tags: Vec::new(),
            },
        );
        assert_eq!(picked.len(), 2);
        for id in &picked {
            let r = records.iter().find(|r| r.id == *id).unwrap();
            assert!(!r.reviewed);
        }
    }

    #[test]
    fn smart_paper_empty_when_nothing_matches() {
        let records = fixture();
        let picked = build_smart_paper(
            &records,
            &SmartPaperRequest {
                subject: Some(Subject::Math),
                count: 5,
                tags: vec!["geometry".to_string()],
            },
        );
        assert!(picked.is_empty());
    }
}
