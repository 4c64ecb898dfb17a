mod cli;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use tfstate_bridge::{
    ApiConfig, ApiTerraformState, BridgeError, HttpApiClient, TerraformJob, TerraformState,
    WorkingDirectory,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await?;

    Ok(())
}

async fn run(cli: Cli) -> Result<(), BridgeError> {
    let api_url = cli
        .api_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            BridgeError::Config(
                "No API url provided. Set TFSTATE_API_URL or use --api-url flag".to_string(),
            )
        })?;
    let token = cli.token.ok_or_else(|| {
        BridgeError::Config(
            "No API token provided. Set TFSTATE_API_TOKEN or use --token flag".to_string(),
        )
    })?;

    let config = ApiConfig::new(api_url, token);
    let client = HttpApiClient::new(&config)?;
    let state: Box<dyn TerraformState> = Box::new(ApiTerraformState::new(client, config));
    let working_directory = WorkingDirectory::new(&cli.working_dir)?;

    tracing::debug!(backend = state.name(), "state backend ready");

    match cli.command {
        Command::PrepareBackend(args) => {
            let backend_file = state
                .prepare_backend(
                    &args.organization,
                    &args.workspace,
                    &working_directory,
                    &args.terraform_version,
                )
                .await?;
            println!("{}", backend_file);
        }
        Command::UploadPlan(args) => {
            match state
                .upload_plan(
                    &args.organization,
                    &args.workspace,
                    &args.job,
                    &args.step,
                    &working_directory,
                )
                .await
            {
                Some(reference) => println!("{}", reference),
                None => tracing::warn!("plan was not persisted"),
            }
        }
        Command::DownloadPlan(args) => {
            let restored = state
                .download_plan(
                    &args.organization,
                    &args.workspace,
                    &args.job,
                    &args.step,
                    &working_directory,
                )
                .await?;
            tracing::info!(restored = restored, "plan download complete");
            println!("{}", restored);
        }
        Command::PublishState(args) => {
            let applied_state_json = tokio::fs::read_to_string(&args.json_state).await?;
            let raw_state = tokio::fs::read_to_string(&args.raw_state).await?;
            let job = TerraformJob {
                organization_id: args.target.organization,
                workspace_id: args.target.workspace,
                job_id: args.target.job,
                step_id: args.target.step,
                terraform_version: args.terraform_version,
            };
            state
                .publish_state(&job, &applied_state_json, &raw_state)
                .await?;
            tracing::info!(job_id = %job.job_id, "state version created");
        }
        Command::PublishOutput(args) => {
            let stdout = read_optional(args.stdout).await?;
            let stderr = read_optional(args.stderr).await?;
            let recorded = state
                .publish_output(&args.organization, &args.job, &args.step, &stdout, &stderr)
                .await?;
            tracing::info!(bytes = recorded.len(), "output recorded");
        }
    }

    Ok(())
}

/// Console output may hold invalid UTF-8 from a failed step; it is still
/// recorded, with invalid sequences replaced.
async fn read_optional(path: Option<PathBuf>) -> Result<String, BridgeError> {
    match path {
        Some(path) => {
            let bytes = tokio::fs::read(path).await?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => Ok(String::new()),
    }
}
