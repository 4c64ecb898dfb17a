use url::Url;

use crate::api::{ApiClient, Fetched};

use super::paths::{Artifact, WorkingDirectory, write_artifact};
use super::StateError;

/// Remote reference under which an uploaded plan is stored.
pub fn plan_reference_url(
    api_url: &str,
    organization_id: &str,
    workspace_id: &str,
    job_id: &str,
    step_id: &str,
) -> String {
    format!(
        "{}/tfstate/v1/organization/{}/workspace/{}/jobId/{}/step/{}/terraform.tfstate",
        api_url, organization_id, workspace_id, job_id, step_id
    )
}

/// Uploads the plan binary left in `working_directory` by `terraform plan`.
///
/// `None` means the plan was not persisted: either there was no plan file or
/// reading/uploading it failed. Failures are logged here and the caller
/// decides whether that is fatal.
pub async fn upload_plan<C>(
    client: &C,
    api_url: &str,
    organization_id: &str,
    workspace_id: &str,
    job_id: &str,
    step_id: &str,
    working_directory: &WorkingDirectory,
) -> Option<String>
where
    C: ApiClient + ?Sized,
{
    tracing::info!("saving plan file to API");
    let plan_path = working_directory.resolve(Artifact::Plan);

    if !matches!(tokio::fs::try_exists(&plan_path).await, Ok(true)) {
        tracing::warn!(path = %plan_path.display(), "terraform plan file not found");
        return None;
    }

    let plan = match tokio::fs::read(&plan_path).await {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!(path = %plan_path.display(), error = %e, "failed to read plan file");
            return None;
        }
    };
    if plan.is_empty() {
        tracing::warn!(path = %plan_path.display(), "terraform plan file is empty");
        return None;
    }
    tracing::debug!(bytes = plan.len(), header = %plan_header(&plan), "plan file loaded");

    if let Err(e) = client
        .upload_plan_state(&plan, organization_id, workspace_id, job_id, step_id)
        .await
    {
        tracing::error!(error = %e, "failed to upload plan file to API");
        return None;
    }

    Some(plan_reference_url(
        api_url,
        organization_id,
        workspace_id,
        job_id,
        step_id,
    ))
}

/// Restores the plan recorded for `job_id` into `working_directory` before
/// `terraform apply`. Returns `false` when the job has no plan to restore.
pub async fn download_plan<C>(
    client: &C,
    organization_id: &str,
    workspace_id: &str,
    job_id: &str,
    step_id: &str,
    working_directory: &WorkingDirectory,
) -> Result<bool, StateError>
where
    C: ApiClient + ?Sized,
{
    tracing::info!(
        working_directory = %working_directory.path().display(),
        workspace_id = %workspace_id,
        job_id = %job_id,
        step_id = %step_id,
        "downloading plan file from API"
    );

    let plan_path = working_directory.resolve(Artifact::Plan);
    let job = client.get_job_by_id(organization_id, job_id).await?;

    let Some(reference) = job.plan_reference() else {
        tracing::info!("job has no plan reference");
        return Ok(false);
    };
    tracing::info!(reference = %reference, "plan reference");

    let path = reference_path(reference)?;
    match client.get_plan_state(&path).await? {
        Fetched::Empty => {
            tracing::info!("no plan file found");
            Ok(false)
        }
        Fetched::Found(plan) => {
            write_artifact(&plan_path, &plan).await?;
            tracing::info!(bytes = plan.len(), path = %plan_path.display(), "plan file restored");
            Ok(true)
        }
    }
}

/// Path component of an absolute plan reference; the client resolves it
/// against its own base URL.
fn reference_path(reference: &str) -> Result<String, StateError> {
    Url::parse(reference)
        .map(|url| url.path().to_string())
        .map_err(|source| StateError::InvalidPlanReference {
            url: reference.to_string(),
            source,
        })
}

fn plan_header(plan: &[u8]) -> String {
    plan.iter()
        .take(8)
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
