use std::path::{Path, PathBuf};

use super::StateError;

pub const STATE_FILE_NAME: &str = "api.tfstate";
pub const BACKEND_FILE_NAME: &str = "api_backend_override.tf";
pub const PLAN_FILE_NAME: &str = "terraformLibrary.tfPlan";

/// Files this crate materializes inside a working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    State,
    BackendOverride,
    Plan,
}

impl Artifact {
    pub const fn file_name(self) -> &'static str {
        match self {
            Artifact::State => STATE_FILE_NAME,
            Artifact::BackendOverride => BACKEND_FILE_NAME,
            Artifact::Plan => PLAN_FILE_NAME,
        }
    }
}

/// Absolute directory a single job step runs in.
///
/// Owned by the orchestration layer; this crate only creates files directly
/// inside it and never removes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory(PathBuf);

impl WorkingDirectory {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StateError::InvalidWorkingDirectory {
                message: "path is empty".to_string(),
            });
        }

        let absolute = std::path::absolute(path).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self(absolute))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Native path of `artifact` in this directory. Performs no I/O.
    pub fn resolve(&self, artifact: Artifact) -> PathBuf {
        self.0.join(artifact.file_name())
    }
}

pub(crate) async fn write_artifact(path: &Path, contents: &[u8]) -> Result<(), StateError> {
    let io_err = |source| StateError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    tokio::fs::write(path, contents).await.map_err(io_err)
}
