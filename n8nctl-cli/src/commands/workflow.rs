//! Workflow command handlers
//!
//! Listing, inspecting, creating, updating, and (de)activating workflows.

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use n8nctl_client::{N8nClient, Workflow, WorkflowListParams, collect_pages};

use crate::output::{format_time, print_json};

/// List workflows, optionally filtered by active state
pub async fn list(client: &N8nClient, active: bool, inactive: bool, json: bool) -> Result<()> {
    let active_filter = if active {
        Some(true)
    } else if inactive {
        Some(false)
    } else {
        None
    };

    let workflows = collect_pages(|cursor| {
        let params = WorkflowListParams {
            active: active_filter,
            cursor,
            ..Default::default()
        };
        async move { client.list_workflows(&params).await }
    })
    .await?;

    if json {
        return print_json(&workflows);
    }

    if workflows.is_empty() {
        println!("{}", "No workflows found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} workflow(s):", workflows.len()).bold()
    );
    println!();
    for workflow in &workflows {
        print_workflow_summary(workflow);
    }

    Ok(())
}

/// Get and display a single workflow
pub async fn show(client: &N8nClient, id: &str, json: bool) -> Result<()> {
    let workflow = client.get_workflow(id, false).await?;

    if json {
        return print_json(&workflow);
    }

    print_workflow_details(&workflow);
    Ok(())
}

/// Create a workflow from a JSON file
pub async fn create(
    client: &N8nClient,
    file: &Path,
    name: Option<String>,
    project: Option<String>,
    json: bool,
) -> Result<()> {
    let mut workflow = read_workflow_file(file)?;
    if let Some(name) = name {
        workflow.name = name;
    }

    let created = client.create_workflow(&workflow).await?;
    let id = created.id.clone().unwrap_or_default();

    if let Some(project) = &project {
        client.transfer_workflow(&id, project).await?;
    }

    if json {
        return print_json(&created);
    }

    println!("{}", "✓ Workflow created!".green().bold());
    println!("  ID:     {}", id.cyan());
    println!("  Name:   {}", created.name.bold());
    if let Some(project) = project {
        println!("  Project: {}", project);
    }
    Ok(())
}

/// Update a workflow from a JSON file
///
/// The file is sent back as a full document; only explicitly requested edits
/// should differ from what the API returned.
pub async fn update(client: &N8nClient, id: &str, file: &Path, json: bool) -> Result<()> {
    let workflow = read_workflow_file(file)?;
    let updated = client.update_workflow(id, &workflow).await?;

    if json {
        return print_json(&updated);
    }

    println!("{}", "✓ Workflow updated!".green().bold());
    println!("  ID:   {}", updated.id.unwrap_or_default().cyan());
    println!("  Name: {}", updated.name.bold());
    Ok(())
}

/// Activate a workflow
pub async fn activate(client: &N8nClient, id: &str) -> Result<()> {
    let workflow = client.activate_workflow(id).await?;
    println!(
        "{}",
        format!("✓ Workflow '{}' activated.", workflow.name)
            .green()
            .bold()
    );
    Ok(())
}

/// Deactivate a workflow
pub async fn deactivate(client: &N8nClient, id: &str) -> Result<()> {
    let workflow = client.deactivate_workflow(id).await?;
    println!(
        "{}",
        format!("✓ Workflow '{}' deactivated.", workflow.name)
            .green()
            .bold()
    );
    Ok(())
}

/// Parse a workflow document from a local JSON file
fn read_workflow_file(file: &Path) -> Result<Workflow> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read workflow file: {}", file.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid workflow JSON in {}", file.display()))
}

/// Print a workflow summary line
fn print_workflow_summary(workflow: &Workflow) {
    let state = match workflow.active {
        Some(true) => "active".green(),
        _ => "inactive".dimmed(),
    };
    println!("  {} {} [{}]", "▸".cyan(), workflow.name.bold(), state);
    println!(
        "    ID: {}",
        workflow.id.as_deref().unwrap_or("-").dimmed()
    );
    println!();
}

/// Print detailed workflow information including its nodes
fn print_workflow_details(workflow: &Workflow) {
    println!("{}", "Workflow Details:".bold());
    println!("  ID:     {}", workflow.id.as_deref().unwrap_or("-").cyan());
    println!("  Name:   {}", workflow.name.bold());
    println!("  Active: {}", workflow.active.unwrap_or(false));
    for key in ["createdAt", "updatedAt"] {
        if let Some(ts) = workflow.extra.get(key).and_then(|v| v.as_str()) {
            let ts = ts.parse().ok();
            println!("  {}: {}", &key[..key.len() - 2], format_time(ts));
        }
    }

    println!("\n{}", format!("Nodes ({}):", workflow.nodes.len()).bold());
    for node in &workflow.nodes {
        println!("  - {} ({})", node.name, node.kind.dimmed());
    }
}
