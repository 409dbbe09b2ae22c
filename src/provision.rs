//! Namespace provisioning ahead of deployment creation.

use tracing::debug;

use crate::errors::StoreError;
use crate::store::DeploymentStore;

/// How the provisioner treats a create that collides with an existing
/// namespace. The production policy is `IgnoreAlreadyExists`: overlap is
/// non-fatal, and a truly missing namespace is caught by the subsequent
/// deployment-create call instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapPolicy {
    IgnoreAlreadyExists,
    Propagate,
}

#[derive(Debug, Clone)]
pub struct NamespaceProvisioner {
    policy: OverlapPolicy,
}

impl NamespaceProvisioner {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    pub async fn ensure(
        &self,
        store: &dyn DeploymentStore,
        namespace: &str,
    ) -> Result<(), StoreError> {
        match store.create_namespace(namespace).await {
            Ok(()) => {
                debug!(namespace, "namespace created");
                Ok(())
            }
            Err(StoreError::AlreadyExists(_))
                if self.policy == OverlapPolicy::IgnoreAlreadyExists =>
            {
                debug!(namespace, "namespace already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
