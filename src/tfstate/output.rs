use crate::api::{ApiClient, OutputRequest};

use super::StateError;

/// Records a step's console output, stdout first then stderr with nothing in
/// between. Returns the output as echoed by the API.
pub async fn publish_output<C>(
    client: &C,
    organization_id: &str,
    job_id: &str,
    step_id: &str,
    stdout: &str,
    stderr: &str,
) -> Result<String, StateError>
where
    C: ApiClient + ?Sized,
{
    tracing::info!(
        organization_id = %organization_id,
        job_id = %job_id,
        step_id = %step_id,
        "uploading output"
    );

    let request = OutputRequest {
        data: format!("{}{}", stdout, stderr),
    };
    let response = client
        .upload_output(&request, organization_id, job_id, step_id)
        .await?;
    Ok(response.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApiClient;

    #[tokio::test]
    async fn test_output_concatenated_without_separator() {
        let client = FakeApiClient::new("http://api.local");

        let recorded_output =
            publish_output(&client, "org1", "42", "plan", "stdout-text", "stderr-text")
                .await
                .unwrap();

        assert_eq!(recorded_output, "stdout-textstderr-text");
        let recorded = client.recorded();
        let (request, org, job, step) = &recorded.outputs[0];
        assert_eq!(request.data, "stdout-textstderr-text");
        assert_eq!(
            (org.as_str(), job.as_str(), step.as_str()),
            ("org1", "42", "plan")
        );
    }

    #[tokio::test]
    async fn test_repeated_publish_submits_again() {
        let client = FakeApiClient::new("http://api.local");

        publish_output(&client, "org1", "42", "plan", "", "error: boom")
            .await
            .unwrap();
        publish_output(&client, "org1", "42", "plan", "", "error: boom")
            .await
            .unwrap();

        assert_eq!(client.recorded().outputs.len(), 2);
        assert_eq!(client.recorded().outputs[0].0.data, "error: boom");
    }
}
