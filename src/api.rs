mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use client::HttpApiClient;
pub use error::ApiError;
pub use types::{
    CreateStateVersion, CreateStateVersionRequest, Fetched, JobAttributes, JobData, JobRecord,
    OutputRequest, OutputResponse, RelationshipData, ResourceIdentifier, StateVersionAttributes,
    StateVersionRelationships,
};

use async_trait::async_trait;

/// Remote API holding workspace state, plan binaries and step output.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Current state of a workspace. `Fetched::Empty` when none exists yet.
    async fn get_current_state(
        &self,
        organization_id: &str,
        workspace_id: &str,
    ) -> Result<Fetched, ApiError>;

    async fn upload_plan_state(
        &self,
        plan: &[u8],
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
    ) -> Result<(), ApiError>;

    async fn get_job_by_id(
        &self,
        organization_id: &str,
        job_id: &str,
    ) -> Result<JobRecord, ApiError>;

    /// Plan binary addressed by a path relative to the API base.
    async fn get_plan_state(&self, path: &str) -> Result<Fetched, ApiError>;

    async fn create_workspace_state_version(
        &self,
        request: &CreateStateVersionRequest,
        workspace_id: &str,
    ) -> Result<(), ApiError>;

    async fn upload_output(
        &self,
        request: &OutputRequest,
        organization_id: &str,
        job_id: &str,
        step_id: &str,
    ) -> Result<OutputResponse, ApiError>;
}
