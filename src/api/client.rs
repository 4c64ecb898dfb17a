use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use url::Url;

use super::types::{CreateStateVersionRequest, Fetched, JobRecord, OutputRequest, OutputResponse};
use super::{ApiClient, ApiError};
use crate::config::ApiConfig;

const JSON_API: &str = "application/vnd.api+json";

#[derive(Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.token(), config.api_url())
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        let header_value = HeaderValue::from_str(&auth_value).map_err(|_| ApiError::Auth {
            message: "Invalid token format".to_string(),
        })?;
        headers.insert(AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[allow(dead_code)] // NOTE: Used by tests to check base URL normalisation
    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Fetched, ApiError> {
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Fetched::Empty);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let bytes = response.bytes().await?;
        Ok(Fetched::from_bytes(bytes.to_vec()))
    }
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let message = response
        .text()
        .await
        .ok()
        .filter(|body| !body.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth { message },
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_current_state(
        &self,
        organization_id: &str,
        workspace_id: &str,
    ) -> Result<Fetched, ApiError> {
        let url = format!(
            "{}/tfstate/v1/organization/{}/workspace/{}/state/terraform.tfstate",
            self.base_url, organization_id, workspace_id
        );
        self.fetch_bytes(&url).await
    }

    async fn upload_plan_state(
        &self,
        plan: &[u8],
        organization_id: &str,
        workspace_id: &str,
        job_id: &str,
        step_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/tfstate/v1/organization/{}/workspace/{}/jobId/{}/step/{}/terraform.tfstate",
            self.base_url, organization_id, workspace_id, job_id, step_id
        );

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(plan.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn get_job_by_id(
        &self,
        organization_id: &str,
        job_id: &str,
    ) -> Result<JobRecord, ApiError> {
        let url = format!(
            "{}/api/v1/organization/{}/job/{}",
            self.base_url, organization_id, job_id
        );

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                resource: format!("job {} in organization {}", job_id, organization_id),
            });
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json().await.map_err(|e| ApiError::Decode {
            message: format!("Failed to parse job: {}", e),
        })
    }

    async fn get_plan_state(&self, path: &str) -> Result<Fetched, ApiError> {
        let url = Url::parse(&self.base_url)?.join(path)?;
        self.fetch_bytes(url.as_str()).await
    }

    async fn create_workspace_state_version(
        &self,
        request: &CreateStateVersionRequest,
        workspace_id: &str,
    ) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/v2/workspaces/{}/state-versions",
            self.base_url, workspace_id
        );

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, JSON_API)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn upload_output(
        &self,
        request: &OutputRequest,
        organization_id: &str,
        job_id: &str,
        step_id: &str,
    ) -> Result<OutputResponse, ApiError> {
        let url = format!(
            "{}/tfoutput/v1/organization/{}/job/{}/step/{}",
            self.base_url, organization_id, job_id, step_id
        );

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response.json().await.map_err(|e| ApiError::Decode {
            message: format!("Failed to parse output response: {}", e),
        })
    }
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpApiClient::with_base_url("test_token", "http://localhost:8080");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_from_config_trims_base() {
        let config = ApiConfig::new("http://state-api:8080/", "test_token");
        let client = HttpApiClient::new(&config).unwrap();
        assert_eq!(client.api_base(), "http://state-api:8080");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = HttpApiClient::with_base_url("bad\ntoken", "http://localhost");
        assert!(matches!(result, Err(ApiError::Auth { .. })));
    }

    #[test]
    fn test_debug_does_not_expose_token() {
        let client =
            HttpApiClient::with_base_url("super_secret_token_12345", "http://localhost").unwrap();
        let debug_output = format!("{:?}", client);

        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_token_12345"),
            "Debug output must NOT contain the actual token"
        );
    }
}
