//! One function per extraction variant: render the prompt, run the retry
//! loop, map exhaustion to the route's error summary.

use crate::errors::AppError;
use crate::extraction::models::{
    ExperienceSearchResult, ExtractionResult, RelevanceResult, TitleProbeResult,
};
use crate::extraction::prompts;
use crate::extraction::retry::{extract_with_retry, RetryPolicy};
use crate::llm_client::ModelInvoker;

// Output-token budgets per variant. The URL variants need headroom for the
// cleaned title plus requirement notes; relevance reasons run longest.
const TEXT_EXTRACTION_MAX_TOKENS: u32 = 200;
const LINK_EXTRACTION_MAX_TOKENS: u32 = 500;
const EXPERIENCE_SEARCH_MAX_TOKENS: u32 = 500;
const RELEVANCE_MAX_TOKENS: u32 = 1000;
const TITLE_PROBE_MAX_TOKENS: u32 = 300;

/// Extracts job details from a pasted title + description.
pub async fn extract_job_details(
    model: &dyn ModelInvoker,
    policy: RetryPolicy,
    job_title: &str,
    job_description: &str,
) -> Result<ExtractionResult, AppError> {
    let prompt = prompts::text_extraction_prompt(job_title, job_description);
    extract_with_retry(model, &prompt, TEXT_EXTRACTION_MAX_TOKENS, policy)
        .await
        .map_err(|e| AppError::extraction("Failed to extract job details", e))
}

/// Extracts job details from a posting URL via the model's web search.
pub async fn extract_job_details_from_link(
    model: &dyn ModelInvoker,
    policy: RetryPolicy,
    job_link: &str,
) -> Result<ExtractionResult, AppError> {
    let prompt = prompts::link_extraction_prompt(job_link);
    extract_with_retry(model, &prompt, LINK_EXTRACTION_MAX_TOKENS, policy)
        .await
        .map_err(|e| AppError::extraction("Failed to extract job details", e))
}

/// Finds the experience level for a posting URL.
pub async fn search_experience_level(
    model: &dyn ModelInvoker,
    policy: RetryPolicy,
    job_link: &str,
) -> Result<ExperienceSearchResult, AppError> {
    let prompt = prompts::experience_search_prompt(job_link);
    extract_with_retry(model, &prompt, EXPERIENCE_SEARCH_MAX_TOKENS, policy)
        .await
        .map_err(|e| AppError::extraction("Failed to extract experience level from job link", e))
}

/// Scores a posting against the target search intent.
pub async fn score_relevance(
    model: &dyn ModelInvoker,
    policy: RetryPolicy,
    job_title: &str,
    job_description: &str,
    job_type: &str,
) -> Result<RelevanceResult, AppError> {
    let prompt = prompts::relevance_prompt(job_title, job_description, job_type);
    extract_with_retry(model, &prompt, RELEVANCE_MAX_TOKENS, policy)
        .await
        .map_err(|e| AppError::extraction("Failed to evaluate job relevance", e))
}

/// Reports the raw title as it appears in the posting at a URL.
pub async fn probe_job_title(
    model: &dyn ModelInvoker,
    policy: RetryPolicy,
    job_link: &str,
) -> Result<TitleProbeResult, AppError> {
    let prompt = prompts::title_probe_prompt(job_link);
    extract_with_retry(model, &prompt, TITLE_PROBE_MAX_TOKENS, policy)
        .await
        .map_err(|e| AppError::extraction("Failed to probe job title", e))
}
