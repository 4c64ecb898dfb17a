mod backend;
mod error;
mod output;
mod paths;
mod plan;
mod state_version;

pub use backend::{prepare_backend, render_backend_config};
pub use error::StateError;
pub use output::publish_output;
pub use paths::{
    Artifact, BACKEND_FILE_NAME, PLAN_FILE_NAME, STATE_FILE_NAME, WorkingDirectory,
};
pub use plan::{download_plan, plan_reference_url, upload_plan};
pub use state_version::{build_state_version, publish_state};

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::job::TerraformJob;

/// Where a worker keeps Terraform state, plans and step output between steps.
#[async_trait]
pub trait TerraformState: Send + Sync {
    fn name(&self) -> &str;

    /// Prepares the backend override for a step and returns its file name.
    async fn prepare_backend(
        &self,
        organization_id: &str,
        workspace_id: &str,
        working_directory: &WorkingDirectory,
        terraform_version: &str,
    ) -> Result<String, StateError>;

    async fn upload_plan(
        &self,
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
        working_directory: &WorkingDirectory,
    ) -> Option<String>;

    async fn download_plan(
        &self,
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
        working_directory: &WorkingDirectory,
    ) -> Result<bool, StateError>;

    /// Only call after a confirmed successful apply.
    async fn publish_state(
        &self,
        job: &TerraformJob,
        applied_state_json: &str,
        raw_state: &str,
    ) -> Result<(), StateError>;

    async fn publish_output(
        &self,
        organization_id: &str,
        job_id: &str,
        step_id: &str,
        stdout: &str,
        stderr: &str,
    ) -> Result<String, StateError>;
}

/// State kept by the remote API, materialized locally per step.
pub struct ApiTerraformState<C> {
    client: C,
    config: ApiConfig,
}

impl<C: ApiClient> ApiTerraformState<C> {
    pub fn new(client: C, config: ApiConfig) -> Self {
        Self { client, config }
    }

    #[allow(dead_code)] // NOTE: Used by tests to inspect recorded calls
    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: ApiClient> TerraformState for ApiTerraformState<C> {
    fn name(&self) -> &str {
        "api"
    }

    async fn prepare_backend(
        &self,
        organization_id: &str,
        workspace_id: &str,
        working_directory: &WorkingDirectory,
        terraform_version: &str,
    ) -> Result<String, StateError> {
        backend::prepare_backend(
            &self.client,
            organization_id,
            workspace_id,
            working_directory,
            terraform_version,
        )
        .await
        .map(str::to_string)
    }

    async fn upload_plan(
        &self,
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
        working_directory: &WorkingDirectory,
    ) -> Option<String> {
        plan::upload_plan(
            &self.client,
            self.config.api_url(),
            organization_id,
            workspace_id,
            job_id,
            step_id,
            working_directory,
        )
        .await
    }

    async fn download_plan(
        &self,
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
        working_directory: &WorkingDirectory,
    ) -> Result<bool, StateError> {
        plan::download_plan(
            &self.client,
            organization_id,
            workspace_id,
            job_id,
            step_id,
            working_directory,
        )
        .await
    }

    async fn publish_state(
        &self,
        job: &TerraformJob,
        applied_state_json: &str,
        raw_state: &str,
    ) -> Result<(), StateError> {
        state_version::publish_state(&self.client, job, applied_state_json, raw_state).await
    }

    async fn publish_output(
        &self,
        organization_id: &str,
        job_id: &str,
        step_id: &str,
        stdout: &str,
        stderr: &str,
    ) -> Result<String, StateError> {
        output::publish_output(
            &self.client,
            organization_id,
            job_id,
            step_id,
            stdout,
            stderr,
        )
        .await
    }
}
