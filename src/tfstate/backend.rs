use std::path::Path;

use crate::api::{ApiClient, Fetched};

use super::paths::{Artifact, BACKEND_FILE_NAME, WorkingDirectory, write_artifact};
use super::StateError;

/// Materializes the workspace state next to the Terraform configuration and
/// writes a backend override pointing Terraform at it.
///
/// A state file already present in `working_directory` wins: it is never
/// re-downloaded, so repeated calls within a step keep local apply results.
/// Returns the override's file name, relative to `working_directory`.
pub async fn prepare_backend<C>(
    client: &C,
    organization_id: &str,
    workspace_id: &str,
    working_directory: &WorkingDirectory,
    _terraform_version: &str,
) -> Result<&'static str, StateError>
where
    C: ApiClient + ?Sized,
{
    let state_path = working_directory.resolve(Artifact::State);

    if tokio::fs::try_exists(&state_path)
        .await
        .map_err(|source| StateError::Io {
            path: state_path.clone(),
            source,
        })?
    {
        tracing::info!(path = %state_path.display(), "state file already exists");
    } else {
        tracing::info!(
            organization_id = %organization_id,
            workspace_id = %workspace_id,
            "downloading state file"
        );

        match client
            .get_current_state(organization_id, workspace_id)
            .await?
        {
            Fetched::Empty => {
                tracing::warn!("no state file found, this is probably the first run");
            }
            Fetched::Found(state) => {
                write_artifact(&state_path, &state).await?;
                tracing::info!(bytes = state.len(), "state file written");
            }
        }
    }

    let backend_path = working_directory.resolve(Artifact::BackendOverride);
    tracing::info!(path = %backend_path.display(), "creating local backend file");
    let backend_config = render_backend_config(&state_path)?;
    write_artifact(&backend_path, backend_config.as_bytes()).await?;

    Ok(BACKEND_FILE_NAME)
}

/// Fails when the state path is not valid UTF-8, since HCL cannot name it.
pub fn render_backend_config(state_path: &Path) -> Result<String, StateError> {
    let path = state_path
        .to_str()
        .ok_or_else(|| StateError::InvalidWorkingDirectory {
            message: format!("{} is not valid UTF-8", state_path.display()),
        })?;

    Ok(format!(
        "terraform {{\n  backend \"local\" {{\n    path                  = \"{}\"\n  }}\n}}\n",
        escape_hcl(path)
    ))
}

fn escape_hcl(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
