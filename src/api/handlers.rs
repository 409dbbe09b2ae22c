use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{error, info};

use crate::{
    errors::{ApiError, StoreError, UpdateError},
    models::DeploymentRequest,
    server::AppState,
};

pub async fn create_deployment(
    State(state): State<AppState>,
    Json(request): Json<DeploymentRequest>,
) -> Result<String, ApiError> {
    info!(
        "API: Creating deployment for image={} namespace={}",
        request.image, request.namespace
    );

    match state.deployments.create(&request).await {
        Ok(name) => Ok(format!("Created deployment {}", name)),
        Err(e) => {
            error!("Failed to create deployment: {}", e);
            Err(store_error(e))
        }
    }
}

pub async fn list_deployments(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<String, ApiError> {
    info!("API: Listing deployments in namespace {}", namespace);

    match state.deployments.list(&namespace).await {
        Ok(items) => {
            let mut body = String::new();
            for item in items {
                body.push_str(&format!("{} {}\n", item.name, item.replicas));
            }
            Ok(body)
        }
        Err(e) => {
            error!("Failed to list deployments in {}: {}", namespace, e);
            Err(store_error(e))
        }
    }
}

pub async fn update_deployment(
    State(state): State<AppState>,
    Path((name, namespace)): Path<(String, String)>,
) -> Result<String, ApiError> {
    info!("API: Updating deployment {} in namespace {}", name, namespace);

    match state.deployments.update(&namespace, &name).await {
        Ok(_) => Ok("Updated deployment...".to_string()),
        Err(UpdateError::Fatal(StoreError::NotFound(msg))) => {
            error!("Deployment {} not found: {}", name, msg);
            Err(ApiError::NotFound(format!(
                "Deployment not found: {}",
                name
            )))
        }
        Err(e) => {
            error!("Failed to update deployment {}: {}", name, e);
            Err(ApiError::InternalServerError(format!(
                "Failed to update deployment: {}",
                e
            )))
        }
    }
}

pub async fn delete_deployment(
    State(state): State<AppState>,
    Path((name, namespace)): Path<(String, String)>,
) -> Result<String, ApiError> {
    info!("API: Deleting deployment {} in namespace {}", name, namespace);

    // Any delete failure is reported as an error response; the process
    // never panics on behalf of a single request.
    match state.deployments.delete(&namespace, &name).await {
        Ok(()) => Ok("Deleted deployment.".to_string()),
        Err(e) => {
            error!("Failed to delete deployment {}: {}", name, e);
            Err(ApiError::InternalServerError(format!(
                "Failed to delete deployment: {}",
                e
            )))
        }
    }
}

fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::NotFound(msg) => ApiError::NotFound(msg),
        other => ApiError::InternalServerError(other.to_string()),
    }
}
