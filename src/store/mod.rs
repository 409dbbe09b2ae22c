//! Resource store abstraction.
//!
//! The store owns the authoritative state and its version tokens; this
//! service holds no durable state of its own. Every mutation goes through
//! the store's conditional-write path, never a blind overwrite.

pub mod k8s;

pub use k8s::KubeStore;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;

use crate::errors::StoreError;

/// Remote store of versioned Deployment and Namespace resources keyed by
/// `(namespace, name)`. Updates present the version token carried in
/// `metadata.resource_version` and fail with [`StoreError::Conflict`] when
/// the token is stale.
#[async_trait]
pub trait DeploymentStore: Send + Sync {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, StoreError>;

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, StoreError>;

    /// Conditional write: the submitted object's `resource_version` must
    /// match the store's current token or the call fails with `Conflict`.
    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, StoreError>;

    /// Foreground cascading delete: dependents are removed before the
    /// parent is considered gone.
    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError>;

    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<Deployment>, StoreError>;

    async fn create_namespace(&self, name: &str) -> Result<(), StoreError>;
}
