use std::sync::Arc;

use deployment_manager::{
    ApiServer, DeploymentService, ManagerConfig, init_tracing,
    store::KubeStore,
};
use envconfig::Envconfig;
use kube::Client;
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    // This avoids runtime errors when no default provider is set.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    let cfg = ManagerConfig::init_from_env()?;
    info!(?cfg, "Starting deployment manager");

    // In-cluster credentials first, local kubeconfig fallback; resolved
    // once, fatal if neither is available.
    let client = Client::try_default().await?;
    let store = Arc::new(KubeStore::new(client));
    let service = Arc::new(DeploymentService::new(
        store,
        cfg.retry_policy(),
        cfg.workload_defaults(),
    ));

    ApiServer::new(service, cfg.http_port).serve().await
}
