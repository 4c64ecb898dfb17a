use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::api::{ApiClient, CreateStateVersionRequest, StateVersionAttributes};
use crate::job::TerraformJob;

use super::StateError;

/// Builds the state version for a run. The applied JSON state and the raw
/// state are encoded independently.
pub fn build_state_version(
    job_id: &str,
    applied_state_json: &str,
    raw_state: &str,
) -> CreateStateVersionRequest {
    CreateStateVersionRequest::new(
        job_id,
        StateVersionAttributes {
            json_state: STANDARD.encode(applied_state_json.as_bytes()),
            state: STANDARD.encode(raw_state.as_bytes()),
        },
    )
}

/// Records the state produced by a successful apply as a new version of the
/// job's workspace, in a single request.
pub async fn publish_state<C>(
    client: &C,
    job: &TerraformJob,
    applied_state_json: &str,
    raw_state: &str,
) -> Result<(), StateError>
where
    C: ApiClient + ?Sized,
{
    tracing::info!(
        workspace_id = %job.workspace_id,
        job_id = %job.job_id,
        "saving state json to API"
    );

    let request = build_state_version(&job.job_id, applied_state_json, raw_state);
    client
        .create_workspace_state_version(&request, &job.workspace_id)
        .await?;
    Ok(())
}
