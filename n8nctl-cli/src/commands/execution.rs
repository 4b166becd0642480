//! Execution command handlers
//!
//! Listing executions, inspecting one (including error details), and retry.

use anyhow::Result;
use colored::*;
use serde_json::Value;

use n8nctl_client::{Execution, ExecutionListParams, N8nClient, collect_pages};
use n8nctl_core::domain::ExecutionStatus;

use crate::output::{format_time, print_json};

/// List executions, newest first as the server returns them
pub async fn list(
    client: &N8nClient,
    workflow: Option<String>,
    status: Option<String>,
    limit: u32,
    json: bool,
) -> Result<()> {
    let mut executions = collect_pages(|cursor| {
        let params = ExecutionListParams {
            workflow_id: workflow.clone(),
            status: status.clone(),
            limit: Some(limit),
            cursor,
            ..Default::default()
        };
        async move { client.list_executions(&params).await }
    })
    .await?;
    executions.truncate(limit as usize);

    if json {
        return print_json(&executions);
    }

    if executions.is_empty() {
        println!("{}", "No executions found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} execution(s):", executions.len()).bold()
    );
    println!();
    for execution in &executions {
        print_execution_summary(execution);
    }

    Ok(())
}

/// Get and display a single execution
pub async fn show(client: &N8nClient, id: &str, data: bool, json: bool) -> Result<()> {
    let execution = client.get_execution(id, data).await?;

    if json {
        return print_json(&execution);
    }

    println!("{}", "Execution Details:".bold());
    println!("  ID:       {}", execution.id.to_string().cyan());
    println!("  Status:   {}", format_status(execution.status));
    println!(
        "  Mode:     {}",
        execution.mode.as_deref().unwrap_or("-")
    );
    println!("  Started:  {}", format_time(execution.started_at));
    println!("  Finished: {}", format_time(execution.stopped_at));
    println!("  Workflow: {}", execution.workflow_name());

    if execution.status == Some(ExecutionStatus::Error) {
        print_error_info(&execution);
    }

    if data && let Some(payload) = &execution.data {
        println!("\n{}", "Execution data:".bold());
        print_json(payload)?;
    }

    Ok(())
}

/// Retry an execution
pub async fn retry(client: &N8nClient, id: &str, latest: bool) -> Result<()> {
    let execution = client.retry_execution(id, latest).await?;
    println!("{}", "✓ Execution retried.".green().bold());
    println!("  New execution ID: {}", execution.id.to_string().cyan());
    println!("  Status:           {}", format_status(execution.status));
    Ok(())
}

fn format_status(status: Option<ExecutionStatus>) -> ColoredString {
    match status {
        Some(ExecutionStatus::Success) => "success".green(),
        Some(ExecutionStatus::Error) => "error".red(),
        Some(ExecutionStatus::Running) => "running".yellow(),
        Some(ExecutionStatus::Waiting) => "waiting".yellow(),
        Some(other) => other.to_string().normal(),
        None => "-".dimmed(),
    }
}

fn print_execution_summary(execution: &Execution) {
    println!(
        "  {} {} [{}]",
        "▸".cyan(),
        execution.id.to_string().bold(),
        format_status(execution.status)
    );
    println!("    Workflow: {}", execution.workflow_name().dimmed());
    println!(
        "    Started:  {}  Finished: {}",
        format_time(execution.started_at).dimmed(),
        format_time(execution.stopped_at).dimmed()
    );
    println!();
}

/// Show the failure details embedded in an errored execution
fn print_error_info(execution: &Execution) {
    let Some(result_data) = execution
        .data
        .as_ref()
        .and_then(|d| d.get("resultData"))
    else {
        return;
    };

    println!("\n{}", "Error info:".red().bold());
    if let Some(err) = result_data.get("error") {
        if let Some(message) = err.get("message").and_then(Value::as_str) {
            println!("  Message: {}", message);
        }
        if let Some(description) = err.get("description").and_then(Value::as_str) {
            println!("  Details: {}", description);
        }
        if let Some(node) = err.get("node") {
            let name = node
                .get("name")
                .and_then(Value::as_str)
                .or_else(|| node.as_str());
            if let Some(name) = name {
                println!("  Node:    {}", name);
            }
        }
    }
    if let Some(last) = result_data.get("lastNodeExecuted").and_then(Value::as_str) {
        println!("  Last node executed: {}", last);
    }
}
