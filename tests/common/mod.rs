#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;

use deployment_manager::errors::StoreError;
use deployment_manager::store::DeploymentStore;

/// In-memory stand-in for the cluster: versioned deployments keyed by
/// (namespace, name), namespace existence enforced on create, and a knob
/// to reject the next N updates with a version conflict.
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    namespaces: HashSet<String>,
    deployments: BTreeMap<(String, String), Deployment>,
    next_version: u64,
    forced_conflicts: u32,
    fetches: u32,
    submits: u32,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                namespaces: HashSet::new(),
                deployments: BTreeMap::new(),
                next_version: 1,
                forced_conflicts: 0,
                fetches: 0,
                submits: 0,
            }),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next `n` update attempts with a version conflict, as a
    /// concurrent writer would cause.
    pub fn force_conflicts(&self, n: u32) {
        self.inner.lock().unwrap().forced_conflicts = n;
    }

    pub fn add_namespace(&self, name: &str) {
        self.inner.lock().unwrap().namespaces.insert(name.to_string());
    }

    pub fn has_namespace(&self, name: &str) -> bool {
        self.inner.lock().unwrap().namespaces.contains(name)
    }

    pub fn fetch_count(&self) -> u32 {
        self.inner.lock().unwrap().fetches
    }

    pub fn submit_count(&self) -> u32 {
        self.inner.lock().unwrap().submits
    }

    pub fn reset_counters(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fetches = 0;
        inner.submits = 0;
    }

    pub fn resource_version(&self, namespace: &str, name: &str) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .deployments
            .get(&(namespace.to_string(), name.to_string()))
            .and_then(|d| d.metadata.resource_version.clone())
    }
}

#[async_trait]
impl DeploymentStore for InMemoryStore {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Deployment, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetches += 1;
        inner
            .deployments
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "deployments.apps \"{}\" not found",
                    name
                ))
            })
    }

    async fn create_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let name = deployment.metadata.name.clone().unwrap_or_default();
        if name.is_empty() {
            return Err(StoreError::Api {
                code: 422,
                message: "metadata.name: Required value".into(),
            });
        }
        if !inner.namespaces.contains(namespace) {
            return Err(StoreError::NotFound(format!(
                "namespaces \"{}\" not found",
                namespace
            )));
        }
        let key = (namespace.to_string(), name.clone());
        if inner.deployments.contains_key(&key) {
            return Err(StoreError::AlreadyExists(format!(
                "deployments.apps \"{}\" already exists",
                name
            )));
        }
        let mut stored = deployment.clone();
        let version = inner.next_version;
        inner.next_version += 1;
        stored.metadata.resource_version = Some(version.to_string());
        inner.deployments.insert(key, stored.clone());
        Ok(stored)
    }

    async fn update_deployment(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> Result<Deployment, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.submits += 1;
        let name = deployment.metadata.name.clone().unwrap_or_default();
        if inner.forced_conflicts > 0 {
            inner.forced_conflicts -= 1;
            return Err(StoreError::Conflict(format!(
                "Operation cannot be fulfilled on deployments.apps \"{}\": \
                 the object has been modified",
                name
            )));
        }
        let key = (namespace.to_string(), name.clone());
        let current = inner.deployments.get(&key).cloned().ok_or_else(|| {
            StoreError::NotFound(format!(
                "deployments.apps \"{}\" not found",
                name
            ))
        })?;
        if deployment.metadata.resource_version
            != current.metadata.resource_version
        {
            return Err(StoreError::Conflict(format!(
                "Operation cannot be fulfilled on deployments.apps \"{}\": \
                 the object has been modified",
                name
            )));
        }
        let mut stored = deployment.clone();
        let version = inner.next_version;
        inner.next_version += 1;
        stored.metadata.resource_version = Some(version.to_string());
        inner.deployments.insert(key, stored.clone());
        Ok(stored)
    }

    async fn delete_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .deployments
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "deployments.apps \"{}\" not found",
                    name
                ))
            })
    }

    async fn list_deployments(
        &self,
        namespace: &str,
    ) -> Result<Vec<Deployment>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .deployments
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn create_namespace(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.namespaces.insert(name.to_string()) {
            return Err(StoreError::AlreadyExists(format!(
                "namespaces \"{}\" already exists",
                name
            )));
        }
        Ok(())
    }
}
