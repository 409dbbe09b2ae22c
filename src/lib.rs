pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod provision;
pub mod server;
pub mod services;
pub mod store;
pub mod template;
pub mod updater;

pub use config::ManagerConfig;
pub use server::{ApiServer, AppState};
pub use services::DeploymentService;
pub use updater::RetryPolicy;

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn init_tracing(default_env: &str) {
    let filter = EnvFilter::builder()
        .with_env_var("RUST_LOG")
        .from_env_lossy()
        .add_directive(
            default_env
                .parse()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        );

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}
