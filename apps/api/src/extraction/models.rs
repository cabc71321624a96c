//! Constrained output records parsed from model responses.
//!
//! Every record is request-scoped: built from model output, validated once,
//! serialized into the response body, and dropped. Fields are `Option` so a
//! missing member surfaces as a schema violation (retryable) instead of a
//! parse failure — `validate` is where presence is enforced.

use serde::{Deserialize, Serialize};

use crate::extraction::validator::ValidatedOutput;

/// Closed vocabulary for `work_arrangement`. Lowercase only — "Hybrid" is a
/// schema violation, not a normalization candidate.
pub const WORK_ARRANGEMENTS: &[&str] = &["remote", "hybrid", "on-site"];

/// The four experience buckets, case-sensitive.
pub const EXPERIENCE_LEVELS: &[&str] = &[
    "Entry (0-2 Years)",
    "Mid (3-5 Years)",
    "Senior (6-8 Years)",
    "Lead (8+ Years)",
];

pub const CONFIDENCE_LEVELS: &[&str] = &["high", "medium", "low"];

/// Job details extracted from a posting, by the text and URL variants alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub job_title: Option<String>,
    pub city: Option<String>,
    pub work_arrangement: Option<String>,
    pub experience: Option<String>,
}

impl ValidatedOutput for ExtractionResult {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("job_title", self.job_title.as_deref())?;
        if let Some(arrangement) = self.work_arrangement.as_deref() {
            if !WORK_ARRANGEMENTS.contains(&arrangement) {
                return Err(format!(
                    "work_arrangement {arrangement:?} is not one of {WORK_ARRANGEMENTS:?}"
                ));
            }
        }
        if let Some(experience) = self.experience.as_deref() {
            if !EXPERIENCE_LEVELS.contains(&experience) {
                return Err(format!(
                    "experience {experience:?} is not one of the known buckets"
                ));
            }
        }
        Ok(())
    }
}

/// Experience-level report for a job link, from the web-search variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceSearchResult {
    pub job_link: Option<String>,
    pub job_title: Option<String>,
    pub experience_level: Option<String>,
    pub found_requirements: Option<String>,
    pub confidence: Option<String>,
}

impl ValidatedOutput for ExperienceSearchResult {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("job_link", self.job_link.as_deref())?;
        if let Some(level) = self.experience_level.as_deref() {
            if !EXPERIENCE_LEVELS.contains(&level) {
                return Err(format!(
                    "experience_level {level:?} is not one of the known buckets"
                ));
            }
        }
        require_non_empty("found_requirements", self.found_requirements.as_deref())?;
        match self.confidence.as_deref() {
            Some(confidence) if CONFIDENCE_LEVELS.contains(&confidence) => Ok(()),
            Some(confidence) => Err(format!(
                "confidence {confidence:?} is not one of {CONFIDENCE_LEVELS:?}"
            )),
            None => Err("confidence is missing".to_string()),
        }
    }
}

/// Relevance of a posting against a target search intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceResult {
    pub score: Option<i64>,
    pub relevant: Option<bool>,
    pub reason: Option<String>,
}

impl RelevanceResult {
    /// Fixed result for requests with no usable description, returned without
    /// spending a model call.
    pub fn missing_description() -> Self {
        Self {
            score: Some(0),
            relevant: Some(false),
            reason: Some(
                "Missing job description - cannot evaluate relevance without job details"
                    .to_string(),
            ),
        }
    }
}

impl ValidatedOutput for RelevanceResult {
    fn validate(&self) -> Result<(), String> {
        match self.score {
            Some(score) if (0..=100).contains(&score) => {}
            Some(score) => return Err(format!("score {score} is outside 0-100")),
            None => return Err("score is missing".to_string()),
        }
        if self.relevant.is_none() {
            return Err("relevant is missing".to_string());
        }
        if self.reason.is_none() {
            return Err("reason is missing".to_string());
        }
        Ok(())
    }
}

/// Raw title sighting for a job link — the diagnostic probe variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleProbeResult {
    pub job_link: Option<String>,
    pub found_title: Option<String>,
    pub title_location: Option<String>,
}

impl ValidatedOutput for TitleProbeResult {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("job_link", self.job_link.as_deref())?;
        require_non_empty("found_title", self.found_title.as_deref())
    }
}

fn require_non_empty(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        Some(_) => Err(format!("{field} is empty")),
        None => Err(format!("{field} is missing")),
    }
}
