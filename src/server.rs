use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, patch, post},
};
use tracing::info;

use crate::{
    api::{create_middleware_stack, handlers},
    services::DeploymentService,
};

#[derive(Clone)]
pub struct AppState {
    pub deployments: Arc<DeploymentService>,
}

pub struct ApiServer {
    app: Router,
    port: u16,
}

impl ApiServer {
    pub fn new(deployments: Arc<DeploymentService>, port: u16) -> Self {
        let state = AppState { deployments };

        let app = Router::new()
            .route("/deployment", post(handlers::create_deployment))
            .route(
                "/deployment/namespace/{namespace}",
                get(handlers::list_deployments),
            )
            .route(
                "/deployment/{name}/namespace/{namespace}",
                patch(handlers::update_deployment)
                    .delete(handlers::delete_deployment),
            )
            .route("/health", get(health_check))
            .layer(create_middleware_stack())
            .with_state(state);

        Self { app, port }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("Deployment manager API listening on {}", addr);
        axum::serve(listener, self.app).await?;

        Ok(())
    }

    /// Consume and return the underlying Router so tests can drive it
    /// directly without binding a socket.
    pub fn into_router(self) -> Router {
        self.app
    }
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": "deployment-manager",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
