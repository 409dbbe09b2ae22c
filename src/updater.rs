//! Conflict-retry updater: the get → mutate → conditional-write → retry
//! loop for versioned deployment resources.
//!
//! Deployments are mutated externally by the orchestration backend as well
//! as by concurrent API callers, so a blind read-modify-write would
//! silently lose updates. Each cycle re-fetches the current resource,
//! applies the mutation, and submits with the version token obtained by
//! that cycle's fetch. A stale token restarts the cycle; everything else
//! fails the operation.

use std::time::Duration;

use k8s_openapi::api::apps::v1::Deployment;
use tracing::{debug, warn};

use crate::errors::{StoreError, UpdateError};
use crate::store::DeploymentStore;

/// Bounded retry budget with capped doubling backoff between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before re-entering the fetch phase after the given attempt
    /// (1-based) conflicted.
    fn backoff(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

/// Per-attempt progress: `Fetching` re-reads the resource and applies the
/// mutation, `Submitting` presents the result to the store's conditional
/// write. Success and fatal errors exit the loop.
enum UpdateState {
    Fetching,
    Submitting(Box<Deployment>),
}

/// Run the conflict-retry cycle until the store accepts the write, a
/// non-conflict error occurs, or the retry budget is exhausted.
///
/// Fetch failures (not-found, access denied) are fatal immediately; they
/// are not conflict conditions and retrying them cannot help.
pub async fn update_with_retry<F>(
    store: &dyn DeploymentStore,
    namespace: &str,
    name: &str,
    policy: &RetryPolicy,
    mut mutate: F,
) -> Result<Deployment, UpdateError>
where
    F: FnMut(&mut Deployment),
{
    let mut attempt = 0u32;
    let mut state = UpdateState::Fetching;

    loop {
        state = match state {
            UpdateState::Fetching => {
                let mut current = store
                    .get_deployment(namespace, name)
                    .await
                    .map_err(UpdateError::Fatal)?;
                mutate(&mut current);
                UpdateState::Submitting(Box::new(current))
            }
            UpdateState::Submitting(desired) => {
                attempt += 1;
                match store.update_deployment(namespace, &desired).await {
                    Ok(updated) => {
                        debug!(namespace, name, attempt, "update accepted");
                        return Ok(updated);
                    }
                    Err(StoreError::Conflict(msg)) => {
                        if attempt >= policy.max_attempts {
                            warn!(
                                namespace,
                                name, attempt, "retry budget exhausted"
                            );
                            return Err(UpdateError::Exhausted {
                                attempts: attempt,
                                last: StoreError::Conflict(msg),
                            });
                        }
                        debug!(
                            namespace,
                            name, attempt, "version conflict, refetching"
                        );
                        tokio::time::sleep(policy.backoff(attempt)).await;
                        UpdateState::Fetching
                    }
                    Err(e) => return Err(UpdateError::Fatal(e)),
                }
            }
        };
    }
}
