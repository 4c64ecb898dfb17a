use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(long, global = true, env = "TFSTATE_API_URL")]
    pub api_url: Option<String>,

    #[arg(long, global = true, env = "TFSTATE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory the Terraform step runs in
    #[arg(long, global = true, env = "TFSTATE_WORKING_DIR", default_value = ".")]
    pub working_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download workspace state if needed and write the backend override
    PrepareBackend(PrepareBackendArgs),
    /// Upload the local plan binary
    UploadPlan(PlanArgs),
    /// Restore the job's plan binary before apply
    DownloadPlan(PlanArgs),
    /// Record applied state as a new state version
    PublishState(PublishStateArgs),
    /// Record a step's console output
    PublishOutput(OutputArgs),
}

#[derive(clap::Args, Debug)]
pub struct PrepareBackendArgs {
    #[arg(long)]
    pub organization: String,

    #[arg(long)]
    pub workspace: String,

    #[arg(long, default_value = "")]
    pub terraform_version: String,
}

#[derive(clap::Args, Debug)]
pub struct PlanArgs {
    #[arg(long)]
    pub organization: String,

    #[arg(long)]
    pub workspace: String,

    #[arg(long)]
    pub job: String,

    #[arg(long)]
    pub step: String,
}

#[derive(clap::Args, Debug)]
pub struct PublishStateArgs {
    #[command(flatten)]
    pub target: PlanArgs,

    #[arg(long, default_value = "")]
    pub terraform_version: String,

    /// `terraform show -json` output of the applied state
    #[arg(long)]
    pub json_state: PathBuf,

    /// Raw state file
    #[arg(long)]
    pub raw_state: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    #[arg(long)]
    pub organization: String,

    #[arg(long)]
    pub job: String,

    #[arg(long)]
    pub step: String,

    #[arg(long)]
    pub stdout: Option<PathBuf>,

    #[arg(long)]
    pub stderr: Option<PathBuf>,
}
