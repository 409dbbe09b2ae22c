//! Lifecycle facade: maps create/list/update/delete onto the template
//! builder, namespace provisioner, conflict-retry updater, and the store.

use std::sync::Arc;

use k8s_openapi::api::apps::v1::Deployment;
use tracing::{info, warn};

use crate::errors::{StoreError, UpdateError};
use crate::models::{DeploymentRequest, DeploymentSummary};
use crate::provision::{NamespaceProvisioner, OverlapPolicy};
use crate::store::DeploymentStore;
use crate::template;
use crate::updater::{RetryPolicy, update_with_retry};

/// Internal defaults applied to created and updated deployments. Clients
/// cannot override these; the update mutation in particular is fixed
/// behavior, not a general patch operation.
#[derive(Debug, Clone)]
pub struct WorkloadDefaults {
    pub replicas: i32,
    pub update_replicas: i32,
    pub update_image: String,
}

pub struct DeploymentService {
    store: Arc<dyn DeploymentStore>,
    provisioner: NamespaceProvisioner,
    retry: RetryPolicy,
    defaults: WorkloadDefaults,
}

impl DeploymentService {
    pub fn new(
        store: Arc<dyn DeploymentStore>,
        retry: RetryPolicy,
        defaults: WorkloadDefaults,
    ) -> Self {
        Self {
            store,
            provisioner: NamespaceProvisioner::new(
                OverlapPolicy::IgnoreAlreadyExists,
            ),
            retry,
            defaults,
        }
    }

    /// Build the canonical deployment, ensure the namespace, and submit the
    /// create. Returns the created resource's name.
    pub async fn create(
        &self,
        request: &DeploymentRequest,
    ) -> Result<String, StoreError> {
        let deployment = template::build_deployment(
            &request.image,
            &request.namespace,
            self.defaults.replicas,
        );

        if let Err(e) = self
            .provisioner
            .ensure(self.store.as_ref(), &request.namespace)
            .await
        {
            // Namespace provisioning is best-effort: the deployment create
            // below is the enforcement point for a missing namespace.
            warn!(
                namespace = %request.namespace,
                error = %e,
                "namespace provisioning failed, proceeding to create"
            );
        }

        let created = self
            .store
            .create_deployment(&request.namespace, &deployment)
            .await?;
        let name = created.metadata.name.unwrap_or_default();
        info!(namespace = %request.namespace, name, "created deployment");
        Ok(name)
    }

    /// Names and replica counts in the order the store returned them.
    pub async fn list(
        &self,
        namespace: &str,
    ) -> Result<Vec<DeploymentSummary>, StoreError> {
        let items = self.store.list_deployments(namespace).await?;
        Ok(items
            .into_iter()
            .map(|d| DeploymentSummary {
                name: d.metadata.name.unwrap_or_default(),
                replicas: d
                    .spec
                    .as_ref()
                    .and_then(|s| s.replicas)
                    .unwrap_or_default(),
            })
            .collect())
    }

    /// Apply the fixed update mutation under conflict-retry.
    pub async fn update(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, UpdateError> {
        let replicas = self.defaults.update_replicas;
        let image = self.defaults.update_image.clone();
        let updated = update_with_retry(
            self.store.as_ref(),
            namespace,
            name,
            &self.retry,
            move |dep| {
                if let Some(spec) = dep.spec.as_mut() {
                    spec.replicas = Some(replicas);
                    if let Some(pod) = spec.template.spec.as_mut() {
                        if let Some(container) = pod.containers.first_mut() {
                            container.image = Some(image.clone());
                        }
                    }
                }
            },
        )
        .await?;
        info!(namespace, name, "updated deployment");
        Ok(updated)
    }

    pub async fn delete(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        self.store.delete_deployment(namespace, name).await?;
        info!(namespace, name, "deleted deployment");
        Ok(())
    }
}
