//! Canonical Deployment construction from a minimal (image, namespace)
//! request.
//!
//! The resource name is the alphanumeric-only projection of the image
//! string, so `nginx:1.12` becomes `nginx112`. Distinct images that
//! normalize to the same string collide on the same resource identity;
//! callers hit the store's already-exists error in that case.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, PodSpec, PodTemplateSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    LabelSelector, ObjectMeta,
};

pub const CONTAINER_NAME: &str = "web";
pub const PORT_NAME: &str = "http";
pub const CONTAINER_PORT: i32 = 80;

/// Derive the stable resource name from an image reference by keeping only
/// `[a-zA-Z0-9]`. An empty result is accepted here and rejected by the
/// store on write.
pub fn derive_app_name(image: &str) -> String {
    image.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Build a fully-populated Deployment draft. The label selector and the
/// pod-template labels are the same `{app: <name>}` map, so they cannot
/// drift apart.
pub fn build_deployment(
    image: &str,
    namespace: &str,
    replicas: i32,
) -> Deployment {
    let name = derive_app_name(image);
    let labels = BTreeMap::from([("app".to_string(), name.clone())]);

    Deployment {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: CONTAINER_NAME.into(),
                        image: Some(image.to_string()),
                        ports: Some(vec![ContainerPort {
                            name: Some(PORT_NAME.into()),
                            protocol: Some("TCP".into()),
                            container_port: CONTAINER_PORT,
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}
