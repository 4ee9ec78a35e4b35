//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create or destroy the company table.
    Deploy(DeployCommand),

    /// Fill the company table with demo companies.
    Seed(SeedCommand),
}

/// Deploy or destroy the company table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create or destroy the company DynamoDB table.

The table is keyed by a numeric `id` hash key and billed per request.
An existing table with a different key is reported and left untouched.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to ap-southeast-2)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, env = "COMPANY_TABLE", default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

/// Seed the company table with demo companies.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert demo companies into DynamoDB.

Each company gets a random six-digit id, a name, an industry, a city, a
head count, and a boolean clientStatus. The share of active clients is
controlled with --active-ratio.")]
pub struct SeedCommand {
    /// Number of companies to generate (at most 900000).
    #[arg(long, default_value = "25")]
    pub count: u32,

    /// Share of generated companies that are active clients (0.0 to 1.0).
    #[arg(long, default_value = "0.5")]
    pub active_ratio: f64,

    /// Table name to use.
    #[arg(long, env = "COMPANY_TABLE", default_value = config::DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force {
            confirm(
                "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
                false,
            )?;
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(&dynamo_client, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
        return Ok(());
    }

    let table_config = config::company_table_config().with_table_name(&cmd.table_name);
    let plan = planning::calculate_deploy_plan(current_state.as_ref(), &table_config);

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('~') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    match plan {
        planning::DeployPlan::NoChanges { .. } => {
            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure is up to date."));
            }
            Ok(())
        }
        planning::DeployPlan::KeyMismatch { .. } => {
            deploy::execute_deploy_plan(&dynamo_client, &plan).await
        }
        planning::DeployPlan::CreateTable { .. } => {
            if !cmd.force {
                confirm("Apply these changes?", true)?;
            }

            if !global.is_silent() {
                aprintln!("{}", p_b("Creating table..."));
            }

            deploy::execute_deploy_plan(&dynamo_client, &plan).await?;

            if !global.is_silent() {
                aprintln!("{}", p_g("Infrastructure deployed successfully."));
            }
            Ok(())
        }
    }
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let count = seed::validate_count(cmd.count)?;
    let active_ratio = seed::validate_ratio(cmd.active_ratio)?;
    let aws_config = client::AwsConfig::default();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Company count:"), count);
        aprintln!("{} {}", p_b("Active ratio:"), active_ratio);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await;

    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let companies = seed::generate_seed_companies(&mut rand::rng(), count, active_ratio);

    if !global.is_silent() {
        aprintln!("{}", p_c("Companies to create:"));
        for company in companies.iter().take(5) {
            aprintln!("  {}", seed::format_company(company));
        }
        if companies.len() > 5 {
            aprintln!("  ... and {} more", companies.len() - 5);
        }
        aprintln!();
    }

    if !cmd.force {
        confirm(&format!("Insert {} companies?", companies.len()), true)?;
    }

    let inserted = seed::seed_companies(&dynamo_client, &cmd.table_name, &companies).await?;

    if !global.is_silent() {
        aprintln!("{} {} companies inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
