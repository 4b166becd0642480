//! Trigger and run command handlers
//!
//! `trigger` resolves a workflow by name, finds its webhook node, and calls
//! the webhook endpoint directly (outside the `/api/v1` surface). `run`
//! invokes the execution endpoint with the workflow id.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::*;
use serde_json::Value;

use n8nctl_client::N8nClient;

use crate::config::Config;
use crate::name_resolver::resolve_workflow_by_name;
use crate::output::print_json;

/// Trigger a workflow via its webhook
pub async fn trigger(
    client: &N8nClient,
    config: &Config,
    name: &str,
    data: Option<String>,
    file: Option<PathBuf>,
    test: bool,
    json: bool,
) -> Result<()> {
    // Payload problems and name resolution are both settled before any
    // webhook request goes out.
    let payload = read_payload(data, file)?;

    let summary = resolve_workflow_by_name(client, name).await?;
    let id = summary
        .id
        .clone()
        .ok_or_else(|| anyhow::anyhow!("workflow '{}' has no id", name))?;
    let workflow = client.get_workflow(&id, false).await?;

    let Some(webhook) = workflow.webhook_node() else {
        bail!("workflow '{}' has no webhook trigger", workflow.name);
    };

    let path = webhook
        .parameters
        .get("path")
        .and_then(Value::as_str)
        .or_else(|| webhook.extra.get("webhookId").and_then(Value::as_str))
        .unwrap_or_default();
    let method = webhook
        .parameters
        .get("httpMethod")
        .and_then(Value::as_str)
        .unwrap_or("GET");

    let segment = if test { "webhook-test" } else { "webhook" };
    let url = format!("{}/{}/{}", config.base_url, segment, path);

    // Webhooks sit outside /api/v1 and take no API key
    let http = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .context("failed to build HTTP client")?;
    let request = if method == "GET" {
        let mut request = http.get(&url);
        if let Some(Value::Object(fields)) = &payload {
            let query: Vec<(String, String)> = fields
                .iter()
                .map(|(k, v)| (k.clone(), query_value(v)))
                .collect();
            request = request.query(&query);
        }
        request
    } else {
        let mut request = http.post(&url);
        if let Some(payload) = &payload {
            request = request.json(payload);
        }
        request
    };

    let response = request.send().await.context("webhook request failed")?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if json {
        match serde_json::from_str::<Value>(&body) {
            Ok(parsed) => return print_json(&parsed),
            Err(_) => {
                println!("{}", body);
                return Ok(());
            }
        }
    }

    println!("{}", format!("✓ Triggered: {}", workflow.name).green().bold());
    println!("  Webhook: {}", url.cyan());
    println!("  Status:  {}", status);
    if !body.is_empty() {
        let shown: String = body.chars().take(500).collect();
        println!("  Response: {}", shown);
    }

    if !status.is_success() {
        bail!("webhook returned status {}", status);
    }
    Ok(())
}

/// Execute a workflow directly and render the result
pub async fn run(
    client: &N8nClient,
    id: &str,
    data: Option<String>,
    output: bool,
    json: bool,
) -> Result<()> {
    let payload = match data {
        Some(raw) => Some(serde_json::from_str(&raw).context("invalid JSON in --data")?),
        None => None,
    };

    let result = client.run_workflow(id, payload).await?;

    if json {
        return print_json(&result);
    }

    println!("{}", "✓ Workflow executed.".green().bold());
    let execution_id = result
        .pointer("/data/executionId")
        .map(render_scalar)
        .unwrap_or_else(|| "unknown".to_string());
    println!("  Execution ID: {}", execution_id.cyan());

    let Some(result_data) = result.pointer("/data/data/resultData") else {
        return Ok(());
    };

    if let Some(last) = result_data.get("lastNodeExecuted").and_then(Value::as_str) {
        println!("  Last node: {}", last);
    }

    let Some(run_data) = result_data.get("runData").and_then(Value::as_object) else {
        return Ok(());
    };
    for (node_name, runs) in run_data {
        let Some(runs) = runs.as_array() else { continue };
        for run in runs {
            let status = run
                .get("executionStatus")
                .and_then(Value::as_str)
                .unwrap_or("-");
            println!("  {}: {}", node_name.bold(), status);

            if !output {
                continue;
            }
            let Some(branches) = run.pointer("/data/main").and_then(Value::as_array) else {
                continue;
            };
            for items in branches.iter().filter_map(Value::as_array) {
                for item in items {
                    let item_json = item.get("json").cloned().unwrap_or(Value::Null);
                    println!(
                        "    Output: {}",
                        serde_json::to_string_pretty(&item_json)?
                    );
                }
            }
        }
    }

    Ok(())
}

/// Load the trigger payload from --data or --file
fn read_payload(data: Option<String>, file: Option<PathBuf>) -> Result<Option<Value>> {
    if let Some(file) = file {
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read payload file: {}", file.display()))?;
        let value =
            serde_json::from_str(&text).context("payload file does not contain valid JSON")?;
        return Ok(Some(value));
    }
    if let Some(raw) = data {
        let value = serde_json::from_str(&raw).context("invalid JSON in --data")?;
        return Ok(Some(value));
    }
    Ok(None)
}

/// Render a JSON scalar without quotes for query strings and display
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_scalar(value: &Value) -> String {
    query_value(value)
}
