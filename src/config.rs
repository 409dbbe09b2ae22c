use std::time::Duration;

use envconfig::Envconfig;

use crate::services::WorkloadDefaults;
use crate::updater::RetryPolicy;

#[derive(Envconfig, Clone, Debug)]
pub struct ManagerConfig {
    #[envconfig(from = "HTTP_PORT", default = "8080")]
    pub http_port: u16,

    /// Replica count given to newly created deployments.
    /// Env: DM_DEFAULT_REPLICAS
    #[envconfig(from = "DM_DEFAULT_REPLICAS", default = "2")]
    pub default_replicas: i32,

    /// The update operation applies a fixed mutation regardless of request
    /// body: replicas and image are set to the two values below.
    /// Env: DM_UPDATE_REPLICAS / DM_UPDATE_IMAGE
    #[envconfig(from = "DM_UPDATE_REPLICAS", default = "1")]
    pub update_replicas: i32,

    #[envconfig(from = "DM_UPDATE_IMAGE", default = "nginx:1.13")]
    pub update_image: String,

    /// Conflict-retry budget for updates. Explicit configuration rather
    /// than an implicit library default so exhaustion is testable.
    /// Env: DM_RETRY_MAX_ATTEMPTS
    #[envconfig(from = "DM_RETRY_MAX_ATTEMPTS", default = "5")]
    pub retry_max_attempts: u32,

    #[envconfig(from = "DM_RETRY_BASE_DELAY_MS", default = "10")]
    pub retry_base_delay_ms: u64,

    #[envconfig(from = "DM_RETRY_MAX_DELAY_MS", default = "1000")]
    pub retry_max_delay_ms: u64,
}

impl ManagerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    pub fn workload_defaults(&self) -> WorkloadDefaults {
        WorkloadDefaults {
            replicas: self.default_replicas,
            update_replicas: self.update_replicas,
            update_image: self.update_image.clone(),
        }
    }
}
