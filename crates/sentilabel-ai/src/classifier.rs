//! Chunk classification: one chunk in, one raw oracle reply out.

use std::sync::Arc;
use std::time::Duration;

use sentilabel_core::Record;
use tracing::{debug, warn};

use crate::oracle::{Oracle, OracleError};
use crate::prompt::{SYSTEM_PROMPT, build_user_payload};
use crate::retry::RetryPolicy;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends chunks to an [`Oracle`] under the fixed system prompt.
///
/// Each attempt is bounded by `timeout`. Retryable failures are retried
/// according to the [`RetryPolicy`]; the last error is returned once the
/// policy is exhausted.
#[derive(Clone)]
pub struct Classifier {
    oracle: Arc<dyn Oracle>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Classifier {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self {
            oracle,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Classify one chunk, returning the oracle's raw reply text.
    pub async fn classify(&self, records: &[Record]) -> Result<String, OracleError> {
        let payload = build_user_payload(records)?;
        let mut attempt = 0u32;

        loop {
            match self.call_once(&payload).await {
                Ok(reply) => {
                    debug!(
                        records = records.len(),
                        reply_bytes = reply.len(),
                        attempt,
                        "oracle replied"
                    );
                    return Ok(reply);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.retry.max_retries,
                        ?delay,
                        error = %e,
                        "oracle call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn call_once(&self, payload: &str) -> Result<String, OracleError> {
        tokio::time::timeout(self.timeout, self.oracle.complete(SYSTEM_PROMPT, payload))
            .await
            .unwrap_or(Err(OracleError::Timeout(self.timeout)))
    }
}
