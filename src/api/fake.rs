//! In-memory [`ApiClient`] that records every call, for adapter tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::types::{JobAttributes, JobData};
use super::{
    ApiClient, ApiError, CreateStateVersionRequest, Fetched, JobRecord, OutputRequest,
    OutputResponse,
};

#[derive(Debug, Default)]
pub struct Recorded {
    pub current_state: Option<Vec<u8>>,
    pub state_fetches: usize,
    pub plans: HashMap<String, Vec<u8>>,
    pub plan_fetches: Vec<String>,
    pub jobs: HashMap<String, Option<String>>,
    pub state_versions: Vec<(CreateStateVersionRequest, String)>,
    pub outputs: Vec<(OutputRequest, String, String, String)>,
    pub fail_uploads: bool,
}

#[derive(Debug)]
pub struct FakeApiClient {
    base_url: String,
    inner: Mutex<Recorded>,
}

impl FakeApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            inner: Mutex::new(Recorded::default()),
        }
    }

    pub fn with_current_state(self, state: &[u8]) -> Self {
        self.recorded().current_state = Some(state.to_vec());
        self
    }

    pub fn with_job(self, job_id: &str, plan_reference: Option<&str>) -> Self {
        self.recorded()
            .jobs
            .insert(job_id.to_string(), plan_reference.map(str::to_string));
        self
    }

    pub fn with_plan(self, path: &str, plan: &[u8]) -> Self {
        self.recorded().plans.insert(path.to_string(), plan.to_vec());
        self
    }

    pub fn failing_uploads(self) -> Self {
        self.recorded().fail_uploads = true;
        self
    }

    pub fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap()
    }
}

#[async_trait]
impl ApiClient for FakeApiClient {
    async fn get_current_state(
        &self,
        _organization_id: &str,
        _workspace_id: &str,
    ) -> Result<Fetched, ApiError> {
        let mut recorded = self.recorded();
        recorded.state_fetches += 1;
        Ok(Fetched::from_bytes(
            recorded.current_state.clone().unwrap_or_default(),
        ))
    }

    async fn upload_plan_state(
        &self,
        plan: &[u8],
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
    ) -> Result<(), ApiError> {
        let mut recorded = self.recorded();
        if recorded.fail_uploads {
            return Err(ApiError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        let path = format!(
            "/tfstate/v1/organization/{}/workspace/{}/jobId/{}/step/{}/terraform.tfstate",
            organization_id, workspace_id, job_id, step_id
        );
        recorded.plans.insert(path.clone(), plan.to_vec());
        recorded
            .jobs
            .insert(job_id.to_string(), Some(format!("{}{}", self.base_url, path)));
        Ok(())
    }

    async fn get_job_by_id(
        &self,
        organization_id: &str,
        job_id: &str,
    ) -> Result<JobRecord, ApiError> {
        let recorded = self.recorded();
        let plan = recorded.jobs.get(job_id).ok_or_else(|| ApiError::NotFound {
            resource: format!("job {} in organization {}", job_id, organization_id),
        })?;
        Ok(JobRecord {
            data: JobData {
                id: job_id.to_string(),
                attributes: JobAttributes {
                    terraform_plan: plan.clone(),
                },
            },
        })
    }

    async fn get_plan_state(&self, path: &str) -> Result<Fetched, ApiError> {
        let mut recorded = self.recorded();
        recorded.plan_fetches.push(path.to_string());
        Ok(Fetched::from_bytes(
            recorded.plans.get(path).cloned().unwrap_or_default(),
        ))
    }

    async fn create_workspace_state_version(
        &self,
        request: &CreateStateVersionRequest,
        workspace_id: &str,
    ) -> Result<(), ApiError> {
        self.recorded()
            .state_versions
            .push((request.clone(), workspace_id.to_string()));
        Ok(())
    }

    async fn upload_output(
        &self,
        request: &OutputRequest,
        organization_id: &str,
        job_id: &str,
        step_id: &str,
    ) -> Result<OutputResponse, ApiError> {
        self.recorded().outputs.push((
            request.clone(),
            organization_id.to_string(),
            job_id.to_string(),
            step_id.to_string(),
        ));
        Ok(OutputResponse {
            data: request.data.clone(),
        })
    }
}
