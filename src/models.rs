use serde::{Deserialize, Serialize};

/// The sole external input driving resource construction. Replica count and
/// the update mutation values are internal defaults, not client-supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentRequest {
    pub image: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentSummary {
    pub name: String,
    pub replicas: i32,
}
