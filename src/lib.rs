//! tfstate-bridge - remote Terraform state for pipeline workers
//!
//! Moves Terraform state, plan binaries and step output between a worker's
//! working directory and the state API.

pub mod api;
pub mod config;
pub mod job;
pub mod tfstate;

mod error;

pub use api::{ApiClient, ApiError, Fetched, HttpApiClient};
pub use config::ApiConfig;
pub use error::BridgeError;
pub use job::TerraformJob;
pub use tfstate::{ApiTerraformState, StateError, TerraformState, WorkingDirectory};
