//! Retry controller: runs {invoke model → normalize → parse → validate}
//! until a schema-valid record comes back or the attempt ceiling is hit.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::validator::{parse_validated, ValidatedOutput};
use crate::llm_client::{ModelError, ModelInvoker};

/// Attempt ceiling and backoff base for one extraction.
///
/// Backoff is linear (`failed_attempt × base_delay`): attempts live inside a
/// single short-lived request, so exponential growth, jitter, and circuit
/// breaking buy nothing here.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Error)]
pub enum RetryError {
    /// Every attempt produced unparseable or schema-invalid output. The last
    /// raw response rides along for diagnosis.
    #[error("failed to extract valid JSON after {attempts} attempts. Last response: {last_response}")]
    AllAttemptsFailed { attempts: u32, last_response: String },

    /// The final attempt failed before producing any output.
    #[error("model call failed after {attempts} attempts: {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: ModelError,
    },
}

enum AttemptFailure {
    BadOutput { raw: String },
    Transport(ModelError),
}

/// Runs the full extraction loop for one prompt. The same prompt is reused
/// across attempts, and attempts are strictly sequential: each model call
/// completes (or fails) before the next delay starts.
pub async fn extract_with_retry<T: ValidatedOutput>(
    model: &dyn ModelInvoker,
    prompt: &str,
    max_new_tokens: u32,
    policy: RetryPolicy,
) -> Result<T, RetryError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_failure: Option<AttemptFailure> = None;

    for attempt in 1..=max_attempts {
        if attempt > 1 {
            let delay = policy.base_delay * (attempt - 1);
            warn!(
                "attempt {} failed, retrying after {}ms",
                attempt - 1,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        match model.complete(prompt, max_new_tokens).await {
            Ok(raw) => match parse_validated::<T>(&raw) {
                Ok(record) => {
                    debug!("attempt {attempt}: got a schema-valid record");
                    return Ok(record);
                }
                Err(error) => {
                    warn!("attempt {attempt}: {error}");
                    last_failure = Some(AttemptFailure::BadOutput { raw });
                }
            },
            Err(error) => {
                warn!("attempt {attempt}: model call failed: {error}");
                last_failure = Some(AttemptFailure::Transport(error));
            }
        }
    }

    match last_failure.expect("retry loop always runs at least one attempt") {
        AttemptFailure::BadOutput { raw } => Err(RetryError::AllAttemptsFailed {
            attempts: max_attempts,
            last_response: raw,
        }),
        AttemptFailure::Transport(source) => Err(RetryError::Transport {
            attempts: max_attempts,
            source,
        }),
    }
}
