//! Axum route handlers for the extraction API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extraction::models::{
    ExperienceSearchResult, ExtractionResult, RelevanceResult, TitleProbeResult,
};
use crate::extraction::tasks;
use crate::routes::body::FormFields;
use crate::state::AppState;

/// POST /api/v1/jobs/extract
///
/// Extracts job details from a pasted title + description.
pub async fn handle_extract(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<ExtractionResult>, AppError> {
    let (job_title, job_description) =
        match (fields.get("job_title"), fields.get("job_description")) {
            (Some(title), Some(description)) => (title, description),
            _ => {
                return Err(AppError::Validation(
                    "Missing required fields: job_title and job_description".to_string(),
                ))
            }
        };

    let result = tasks::extract_job_details(
        state.llm.as_ref(),
        state.retry,
        job_title,
        job_description,
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/jobs/extract-link
///
/// Extracts job details from a posting URL.
pub async fn handle_extract_link(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<ExtractionResult>, AppError> {
    let job_link = require_job_link(&fields)?;
    let result =
        tasks::extract_job_details_from_link(state.llm.as_ref(), state.retry, job_link).await?;
    Ok(Json(result))
}

/// POST /api/v1/jobs/experience-search
///
/// Finds the experience level requirements for a posting URL.
pub async fn handle_experience_search(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<ExperienceSearchResult>, AppError> {
    let job_link = require_job_link(&fields)?;
    let result = tasks::search_experience_level(state.llm.as_ref(), state.retry, job_link).await?;
    Ok(Json(result))
}

/// POST /api/v1/jobs/relevance
///
/// Scores a posting against a target job type. A blank description
/// short-circuits to a fixed zero-score result — unusable input is not worth
/// a model call.
pub async fn handle_relevance(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<RelevanceResult>, AppError> {
    let (job_title, job_type) = match (fields.get("job_title"), fields.get("job_type")) {
        (Some(title), Some(job_type)) => (title, job_type),
        _ => {
            return Err(AppError::Validation(
                "Missing required fields: job_title and job_type are required".to_string(),
            ))
        }
    };

    let job_description = fields
        .get("job_description")
        .map(str::trim)
        .filter(|d| !d.is_empty());
    let Some(job_description) = job_description else {
        return Ok(Json(RelevanceResult::missing_description()));
    };

    let result = tasks::score_relevance(
        state.llm.as_ref(),
        state.retry,
        job_title,
        job_description,
        job_type,
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/jobs/title-probe
///
/// Reports the raw title found at a posting URL.
pub async fn handle_title_probe(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<TitleProbeResult>, AppError> {
    let job_link = require_job_link(&fields)?;
    let result = tasks::probe_job_title(state.llm.as_ref(), state.retry, job_link).await?;
    Ok(Json(result))
}

fn require_job_link(fields: &FormFields) -> Result<&str, AppError> {
    let job_link = fields.get("job_link").ok_or_else(|| {
        AppError::Validation("Missing required field: job_link".to_string())
    })?;
    if reqwest::Url::parse(job_link).is_err() {
        return Err(AppError::Validation("Invalid URL format".to_string()));
    }
    Ok(job_link)
}
