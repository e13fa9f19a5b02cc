//! Best-effort notarization of filed reviews.
//!
//! Each filed review is reduced to a SHA-256 digest and handed to a
//! [`Notarizer`] on a detached tokio task. The outcome is logged; failures
//! never reach the review-filing path.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;

use crate::config::NotaryConfig;

use super::error::NotaryError;

/// Connection timeout for notary requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether filed reviews are sent to the notary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotarizationPolicy {
    #[default]
    Disabled,
    BestEffort,
}

/// Lowercase hex SHA-256 of a review and the skills it was filed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewDigest(String);

impl ReviewDigest {
    /// Hash the review text followed by each skill, newline separated.
    ///
    /// Skills are sorted first so the digest does not depend on set order.
    #[must_use]
    pub fn compute(review: &str, skills: &[&str]) -> Self {
        let mut sorted = skills.to_vec();
        sorted.sort_unstable();

        let mut hasher = Sha256::new();
        hasher.update(review.as_bytes());
        for skill in sorted {
            hasher.update(b"\n");
            hasher.update(skill.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReviewDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acknowledgement returned by a notary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotaryReceipt {
    pub hash: String,
    pub reference: String,
}

/// An external service that records review digests.
#[async_trait]
pub trait Notarizer: Send + Sync {
    /// Record a digest.
    async fn submit(&self, digest: &ReviewDigest) -> Result<NotaryReceipt, NotaryError>;
}

/// Notary reached over HTTP: `POST {"hash": "<hex>"}` to an endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotarizer {
    client: Client,
    endpoint: String,
}

impl HttpNotarizer {
    /// Create a notary client.
    ///
    /// # Errors
    ///
    /// Returns `NotaryError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, NotaryError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .map_err(|e| NotaryError::RequestFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Notarizer for HttpNotarizer {
    async fn submit(&self, digest: &ReviewDigest) -> Result<NotaryReceipt, NotaryError> {
        let body = serde_json::json!({ "hash": digest.as_str() });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotaryError::Timeout
                } else {
                    NotaryError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NotaryError::ParseError(e.to_string()))?;
        if !status.is_success() {
            return Err(NotaryError::RequestFailed(format!("HTTP {status}: {text}")));
        }

        Ok(NotaryReceipt {
            hash: digest.as_str().to_string(),
            reference: extract_reference(&text),
        })
    }
}

/// Pull the receipt reference out of a notary response body.
///
/// Accepts `{"receipt": "..."}`; any other body is used verbatim.
fn extract_reference(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["receipt"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Policy-gated, fire-and-forget submission of review digests.
pub struct NotaryDispatch {
    notarizer: Option<Arc<dyn Notarizer>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl std::fmt::Debug for NotaryDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotaryDispatch")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl Default for NotaryDispatch {
    fn default() -> Self {
        Self::disabled()
    }
}

impl NotaryDispatch {
    /// Never notarize.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            notarizer: None,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Send every digest to `notarizer`, ignoring failures.
    #[must_use]
    pub fn best_effort(notarizer: Arc<dyn Notarizer>) -> Self {
        Self {
            notarizer: Some(notarizer),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Build from configuration. An unusable notary downgrades to disabled.
    #[must_use]
    pub fn from_config(config: &NotaryConfig) -> Self {
        match (config.policy, config.endpoint.as_deref()) {
            (NotarizationPolicy::BestEffort, Some(endpoint)) => {
                match HttpNotarizer::new(endpoint, Duration::from_secs(config.timeout_secs)) {
                    Ok(notarizer) => Self::best_effort(Arc::new(notarizer)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Notary unavailable, notarization disabled");
                        Self::disabled()
                    }
                }
            }
            (NotarizationPolicy::BestEffort, None) => {
                tracing::warn!("Notary policy is best_effort but no endpoint is set");
                Self::disabled()
            }
            (NotarizationPolicy::Disabled, _) => Self::disabled(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.notarizer.is_some()
    }

    /// Submit a digest in the background.
    ///
    /// Requires a tokio runtime; without one the digest is dropped with a
    /// warning.
    pub fn dispatch(&self, digest: ReviewDigest) {
        let Some(notarizer) = self.notarizer.clone() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(hash = %digest, "No async runtime, skipping notarization");
            return;
        };

        let task = handle.spawn(async move {
            match notarizer.submit(&digest).await {
                Ok(receipt) => {
                    tracing::info!(hash = %receipt.hash, reference = %receipt.reference, "Review notarized");
                }
                Err(e) => {
                    tracing::warn!(hash = %digest, error = %e, "Review notarization failed");
                }
            }
        });
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|h| !h.is_finished());
        pending.push(task);
    }

    /// Wait for every in-flight submission. Returns how many were awaited.
    pub async fn flush(&self) -> usize {
        let tasks = std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
        let count = tasks.len();
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Notarization task aborted");
            }
        }
        count
    }
}
