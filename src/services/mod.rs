pub mod deployment;

pub use deployment::{DeploymentService, WorkloadDefaults};
