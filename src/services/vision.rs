// SPDX-License-Identifier: GPL-3.0-or-later
// src/services/vision.rs
//
// HTTP client for the AI vision service that extracts question data
// from homework photos.

use std::env;
use std::path::Path;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::domain::record::{Analysis, Difficulty, MistakeRecord, Subject};

/// Configuration for the vision service.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    /// Base URL of the service, e.g. `https://vision.example.org/v1`.
    pub endpoint: String,
    /// Model identifier passed through to the service.
    pub model: String,
    /// API key, read from `ERRATUM_API_KEY`.
    pub api_key: String,
}

impl VisionConfig {
    pub fn from_settings(endpoint: String, model: String) -> Self {
        Self {
            endpoint,
            model,
            api_key: env::var("ERRATUM_API_KEY").unwrap_or_default(),
        }
    }
}

/// Client for the vision service. Cheap to clone; the inner reqwest
/// client shares its connection pool.
#[derive(Debug, Clone)]
pub struct VisionClient {
    config: VisionConfig,
    client: reqwest::Client,
}

/// One photo in an analyze request.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoPayload {
    pub mime_type: String,
    /// Base64-encoded image data.
    pub data: String,
}

impl PhotoPayload {
    /// Read and encode a photo file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read photo {}", path.display()))?;
        let mime_type = match path.extension().and_then(|e| e.to_str()) {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        };
        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest {
    model: String,
    subject: Subject,
    images: Vec<PhotoPayload>,
}

#[derive(Debug, Serialize)]
struct ReportRequest {
    model: String,
    mistakes: Vec<RecordDigest>,
}

/// Compact record summary sent with a report request; enough for the
/// service to reason about weak points without re-reading photos.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDigest {
    pub subject: Subject,
    pub question_type: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub excerpt: String,
}

impl RecordDigest {
    const EXCERPT_LEN: usize = 50;

    pub fn from_record(record: &MistakeRecord) -> Option<Self> {
        let analysis = record.analysis.as_ref()?;
        let excerpt: String = analysis
            .question_text
            .chars()
            .take(Self::EXCERPT_LEN)
            .collect();
        Some(Self {
            subject: record.subject,
            question_type: analysis.question_type.clone(),
            difficulty: analysis.difficulty,
            tags: analysis.tags.clone(),
            excerpt,
        })
    }
}

/// Weak-point study report returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeakPointReport {
    pub summary: String,
    #[serde(default)]
    pub weak_points: Vec<WeakPoint>,
    pub overall_level: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeakPoint {
    pub topic: String,
    pub description: String,
    pub count: u32,
    pub suggestion: String,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> anyhow::Result<Self> {
        if config.endpoint.is_empty() {
            anyhow::bail!("Vision service endpoint is not configured");
        }
        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Detect and analyze all questions on the given photos. One call
    /// per scan; failures surface to the capture screen, there is no
    /// retry and no client-side timeout.
    pub async fn detect_questions(
        &self,
        images: Vec<PhotoPayload>,
        subject: Subject,
    ) -> anyhow::Result<Vec<Analysis>> {
        log::debug!("Analyzing {} photo(s)", images.len());
        let request = AnalyzeRequest {
            model: self.config.model.clone(),
            subject,
            images,
        };
        let questions: Vec<Analysis> = self
            .post("analyze", &request)
            .await
            .context("Question analysis failed")?;
        log::info!("Vision service detected {} question(s)", questions.len());
        Ok(questions)
    }

    /// Generate a weak-point report over the given record digests.
    pub async fn weak_point_report(
        &self,
        mistakes: Vec<RecordDigest>,
    ) -> anyhow::Result<WeakPointReport> {
        let request = ReportRequest {
            model: self.config.model.clone(),
            mistakes,
        };
        self.post("report", &request)
            .await
            .context("Report generation failed")
    }

    async fn post<Req, Resp>(&self, route: &str, request: &Req) -> anyhow::Result<Resp>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{route}", self.config.endpoint.trim_end_matches('/'));
        let mut builder = self.client.post(&url).json(request);
        if !self.config.api_key.is_empty() {
            builder = builder.bearer_auth(&self.config.api_key);
        }
        let response = builder.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Subject;
    use std::path::PathBuf;

    #[test]
    fn analysis_wire_format_parses() {
        let json = r#"[{
            "question_text": "What is 7 x 8?",
            "question_type": "arithmetic",
            "correct_answer": "56",
            "explanation": "Seven times eight.",
            "difficulty": "easy",
            "tags": ["multiplication"],
            "source_image_index": 1,
            "region": [120, 80, 400, 920]
        }]"#;
        let parsed: Vec<Analysis> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        let region = parsed[0].region.unwrap();
        assert_eq!(region.as_array(), [120, 80, 400, 920]);
        assert_eq!(parsed[0].source_image_index, 1);
    }

    #[test]
    fn malformed_region_from_service_becomes_none() {
        let json = r#"[{
            "question_text": "q",
            "question_type": "t",
            "correct_answer": "a",
            "explanation": "e",
            "region": [900, 100, 100, 900]
        }]"#;
        let parsed: Vec<Analysis> = serde_json::from_str(json).unwrap();
        assert!(parsed[0].region.is_none());
    }

    #[test]
    fn report_wire_format_parses() {
        let json = r#"{
            "summary": "Solid progress this week.",
            "weak_points": [{
                "topic": "fractions",
                "description": "Mixes up numerator and denominator.",
                "count": 3,
                "suggestion": "Practice with pie slices at dinner."
            }],
            "overall_level": "Rising star"
        }"#;
        let report: WeakPointReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.weak_points.len(), 1);
        assert_eq!(report.weak_points[0].count, 3);
    }

    #[test]
    fn digest_truncates_question_text() {
        let mut record = MistakeRecord::new(Subject::Math, PathBuf::from("images/x.jpg"), None);
        assert!(RecordDigest::from_record(&record).is_none());

        record.analysis = Some(Analysis {
            question_text: "x".repeat(200),
            question_type: "t".to_string(),
            original_answer: None,
            correct_answer: "a".to_string(),
            explanation: String::new(),
            difficulty: Difficulty::Hard,
            tags: Vec::new(),
            source_image_index: 0,
            region: None,
        });
        let digest = RecordDigest::from_record(&record).unwrap();
        assert_eq!(digest.excerpt.chars().count(), 50);
    }
}
