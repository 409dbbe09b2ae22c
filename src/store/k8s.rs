use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use kube::api::{Api, DeleteParams, ListParams, PostParams};
use tracing::trace;

use super::DeploymentStore;
use crate::errors::StoreError;

/// Kubernetes-backed store. The kube `Client` is cheap to clone and safe
/// for concurrent use, so one `KubeStore` is shared across all handlers.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl DeploymentStore for KubeStore {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, StoreError> {
        trace!(namespace, name, "get deployment");
        Ok(self.deployments(namespace).get(name).await?)
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, StoreError> {
        trace!(namespace, name = ?deployment.metadata.name, "create deployment");
        Ok(self
            .deployments(namespace)
            .create(&PostParams::default(), deployment)
            .await?)
    }

    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, StoreError> {
        let name = deployment.metadata.name.clone().unwrap_or_default();
        trace!(namespace, name, "replace deployment");
        // `replace` presents metadata.resource_version; a stale token is
        // rejected by the API server with 409 Conflict.
        Ok(self
            .deployments(namespace)
            .replace(&name, &PostParams::default(), deployment)
            .await?)
    }

    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        trace!(namespace, name, "delete deployment");
        let _ = self
            .deployments(namespace)
            .delete(name, &DeleteParams::foreground())
            .await?;
        Ok(())
    }

    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<Deployment>, StoreError> {
        trace!(namespace, "list deployments");
        Ok(self
            .deployments(namespace)
            .list(&ListParams::default())
            .await?
            .items)
    }

    async fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        trace!(name, "create namespace");
        let api: Api<Namespace> = Api::all(self.client.clone());
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let _ = api.create(&PostParams::default(), &ns).await?;
        Ok(())
    }
}
