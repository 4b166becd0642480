//! Commands module
//!
//! Defines all CLI commands and routes them to their handlers. Each command
//! maps 1:1 onto a client method or a local document transform.

mod execution;
mod node;
mod trigger;
mod workflow;

pub use node::NodeArgs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List all workflows
    Workflows {
        /// Show only active workflows
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Show only inactive workflows
        #[arg(long)]
        inactive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get workflow details
    Workflow {
        /// Workflow ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a workflow from a JSON file
    Create {
        /// Path to workflow JSON file
        file: PathBuf,

        /// Override workflow name
        #[arg(short, long)]
        name: Option<String>,

        /// Project ID to move the workflow into
        #[arg(short, long)]
        project: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a workflow from a JSON file
    Update {
        /// Workflow ID
        id: String,

        /// Path to workflow JSON file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Activate a workflow
    Activate {
        /// Workflow ID
        id: String,
    },
    /// Deactivate a workflow
    Deactivate {
        /// Workflow ID
        id: String,
    },
    /// List nodes in a workflow
    Nodes {
        /// Workflow ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// View, edit, or create a node
    Node(NodeArgs),
    /// Export Code node scripts to files
    ExportCode {
        /// Workflow ID
        id: String,

        /// Output directory for scripts and manifest
        output_dir: PathBuf,
    },
    /// Import Code node scripts from files
    ImportCode {
        /// Workflow ID
        id: String,

        /// Directory containing scripts and manifest
        input_dir: PathBuf,
    },
    /// Trigger a workflow by name via its webhook
    Trigger {
        /// Workflow name (exact match)
        name: String,

        /// JSON payload to send
        #[arg(short, long, conflicts_with = "file")]
        data: Option<String>,

        /// File containing the JSON payload
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Use the test webhook URL
        #[arg(short, long)]
        test: bool,

        /// Output the webhook response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Execute a workflow directly
    Run {
        /// Workflow ID
        id: String,

        /// Input data as a JSON string
        #[arg(short, long)]
        data: Option<String>,

        /// Show per-node outputs
        #[arg(short, long)]
        output: bool,

        /// Output the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List executions
    Executions {
        /// Filter by workflow ID
        #[arg(short, long)]
        workflow: Option<String>,

        /// Filter by status
        #[arg(short, long, value_parser = ["canceled", "error", "new", "running", "success", "waiting"])]
        status: Option<String>,

        /// Max results
        #[arg(short = 'n', long, default_value = "50")]
        limit: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get execution details
    Execution {
        /// Execution ID
        id: String,

        /// Include full execution data
        #[arg(short, long)]
        data: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Retry a failed execution
    Retry {
        /// Execution ID
        id: String,

        /// Use the latest workflow version instead of the one from execution time
        #[arg(long)]
        latest: bool,
    },
}

/// Handle a CLI command
///
/// Builds the API client and routes the command to its handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        Commands::Workflows {
            active,
            inactive,
            json,
        } => workflow::list(&client, active, inactive, json).await,
        Commands::Workflow { id, json } => workflow::show(&client, &id, json).await,
        Commands::Create {
            file,
            name,
            project,
            json,
        } => workflow::create(&client, &file, name, project, json).await,
        Commands::Update { id, file, json } => workflow::update(&client, &id, &file, json).await,
        Commands::Activate { id } => workflow::activate(&client, &id).await,
        Commands::Deactivate { id } => workflow::deactivate(&client, &id).await,
        Commands::Nodes { id, json } => node::list(&client, &id, json).await,
        Commands::Node(args) => node::handle(&client, args).await,
        Commands::ExportCode { id, output_dir } => node::export(&client, &id, &output_dir).await,
        Commands::ImportCode { id, input_dir } => node::import(&client, &id, &input_dir).await,
        Commands::Trigger {
            name,
            data,
            file,
            test,
            json,
        } => trigger::trigger(&client, config, &name, data, file, test, json).await,
        Commands::Run {
            id,
            data,
            output,
            json,
        } => trigger::run(&client, &id, data, output, json).await,
        Commands::Executions {
            workflow,
            status,
            limit,
            json,
        } => execution::list(&client, workflow, status, limit, json).await,
        Commands::Execution { id, data, json } => execution::show(&client, &id, data, json).await,
        Commands::Retry { id, latest } => execution::retry(&client, &id, latest).await,
    }
}
