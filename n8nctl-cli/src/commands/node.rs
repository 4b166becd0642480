//! Node command handlers
//!
//! Listing and inspecting nodes, editing node code and parameters, renaming,
//! creating nodes, and the Code-node export/import commands.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use colored::*;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use n8nctl_client::N8nClient;
use n8nctl_core::codeio::{export_code, import_code, read_manifest};
use n8nctl_core::domain::workflow::{CODE_NODE_TYPE, Node, Workflow};

/// Arguments for the `node` command
#[derive(Args)]
pub struct NodeArgs {
    /// Workflow ID
    pub id: String,

    /// Node name (required except with --add)
    pub name: Option<String>,

    /// Show the node's code (Code nodes only)
    #[arg(short, long)]
    pub code: bool,

    /// Update the node's code from a file
    #[arg(short, long, value_name = "FILE")]
    pub set_code: Option<String>,

    /// Set a parameter as KEY=VALUE; dot notation addresses nested keys
    #[arg(short = 'p', long, value_name = "KEY=VALUE")]
    pub set_param: Vec<String>,

    /// Rename the node
    #[arg(short, long, value_name = "NAME")]
    pub rename: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Create a new node
    #[arg(long)]
    pub add: bool,

    /// Node type for --add (shorthand like 'code' or a full n8n type)
    #[arg(long = "type", value_name = "TYPE")]
    pub node_type: Option<String>,

    /// Node name for --add
    #[arg(long = "name", value_name = "NAME")]
    pub new_name: Option<String>,

    /// Position as X,Y for --add
    #[arg(long)]
    pub position: Option<String>,

    /// Parameter for the new node as KEY=VALUE (--add)
    #[arg(long, value_name = "KEY=VALUE")]
    pub param: Vec<String>,
}

/// Shorthand names accepted by `node --add --type`
fn expand_node_type(shorthand: &str) -> String {
    match shorthand {
        "code" => CODE_NODE_TYPE.to_string(),
        "switch" => "n8n-nodes-base.switch".to_string(),
        "http" => "n8n-nodes-base.httpRequest".to_string(),
        "webhook" => "n8n-nodes-base.webhook".to_string(),
        "set" => "n8n-nodes-base.set".to_string(),
        "if" => "n8n-nodes-base.if".to_string(),
        other => other.to_string(),
    }
}

/// List the nodes of a workflow, marking Code nodes
pub async fn list(client: &N8nClient, id: &str, json: bool) -> Result<()> {
    let workflow = client.get_workflow(id, false).await?;

    if json {
        return crate::output::print_json(&workflow.nodes);
    }

    if workflow.nodes.is_empty() {
        println!("{}", "No nodes found.".yellow());
        return Ok(());
    }

    for node in &workflow.nodes {
        let marker = if node.is_code_node() { " *".cyan() } else { "".normal() };
        println!("  - {} ({}){}", node.name.bold(), node.kind.dimmed(), marker);
    }

    let code_count = workflow.nodes.iter().filter(|n| n.is_code_node()).count();
    if code_count > 0 {
        println!(
            "\n{}",
            format!(
                "* {} Code node(s) - use 'node <id> <name> --code' to view",
                code_count
            )
            .dimmed()
        );
    }

    Ok(())
}

/// Route the `node` command to view, edit, or create
pub async fn handle(client: &N8nClient, args: NodeArgs) -> Result<()> {
    let workflow = client.get_workflow(&args.id, false).await?;

    if args.add {
        return add_node(client, workflow, &args).await;
    }

    let Some(name) = args.name.clone() else {
        bail!("node name is required (unless using --add)");
    };

    // Fail before any mutation is attempted
    if workflow.find_node(&name).is_none() {
        let available = workflow.node_names().join("\n  - ");
        bail!("node '{}' not found.\n\nAvailable nodes:\n  - {}", name, available);
    }

    if args.set_code.is_some() || !args.set_param.is_empty() || args.rename.is_some() {
        return edit_node(client, workflow, &name, &args).await;
    }

    if args.code {
        let node = workflow.find_node(&name).ok_or_else(|| anyhow!("node vanished"))?;
        let Some(code) = node.code() else {
            bail!("node '{}' is not a Code node", name);
        };
        println!("{}", code);
        return Ok(());
    }

    let node = workflow.find_node(&name).ok_or_else(|| anyhow!("node vanished"))?;
    if args.json {
        return crate::output::print_json(node);
    }
    print_node_details(node);
    Ok(())
}

/// Apply --set-code / --set-param / --rename and push the updated document
async fn edit_node(
    client: &N8nClient,
    mut workflow: Workflow,
    name: &str,
    args: &NodeArgs,
) -> Result<()> {
    let mut messages = Vec::new();

    if let Some(file) = &args.set_code {
        let code = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read code file: {}", file))?;
        let node = workflow
            .find_node_mut(name)
            .ok_or_else(|| anyhow!("node '{}' not found", name))?;
        node.set_code(code)?;
        messages.push("code updated".to_string());
    }

    if !args.set_param.is_empty() {
        let node = workflow
            .find_node_mut(name)
            .ok_or_else(|| anyhow!("node '{}' not found", name))?;
        for pair in &args.set_param {
            let (key, value) = parse_key_val(pair)?;
            set_nested_param(&mut node.parameters, &key, value);
        }
        messages.push(format!("{} parameter(s) set", args.set_param.len()));
    }

    if let Some(new_name) = &args.rename {
        workflow.rename_node(name, new_name)?;
        messages.push(format!("renamed to '{}'", new_name));
    }

    client.update_workflow(&args.id, &workflow).await?;
    println!(
        "{}",
        format!("✓ Node '{}': {}.", name, messages.join(", "))
            .green()
            .bold()
    );
    Ok(())
}

/// Create a new node in the workflow
async fn add_node(client: &N8nClient, mut workflow: Workflow, args: &NodeArgs) -> Result<()> {
    let Some(node_type) = &args.node_type else {
        bail!("--type is required when using --add");
    };
    let Some(new_name) = &args.new_name else {
        bail!("--name is required when using --add");
    };
    if workflow.find_node(new_name).is_some() {
        bail!("node with name '{}' already exists", new_name);
    }

    let kind = expand_node_type(node_type);
    let position = match &args.position {
        Some(spec) => parse_position(spec)?,
        None => next_position(&workflow.nodes),
    };

    let mut parameters = Map::new();
    let mut extra = Map::new();
    extra.insert("position".to_string(), json!(position));
    extra.insert("typeVersion".to_string(), json!(1));

    if kind == CODE_NODE_TYPE {
        extra.insert("typeVersion".to_string(), json!(2));
        parameters.insert(
            "jsCode".to_string(),
            json!("// Add your code here\nreturn items;"),
        );
        parameters.insert("mode".to_string(), json!("runOnceForAllItems"));
    } else if kind == "n8n-nodes-base.switch" {
        extra.insert("typeVersion".to_string(), json!(3));
        parameters.insert("rules".to_string(), json!({"values": []}));
        parameters.insert("options".to_string(), json!({}));
    }

    for pair in &args.param {
        let (key, value) = parse_key_val(pair)?;
        set_nested_param(&mut parameters, &key, value);
    }

    workflow.nodes.push(Node {
        id: Some(Uuid::new_v4().to_string()),
        name: new_name.clone(),
        kind: kind.clone(),
        parameters,
        extra,
    });

    client.update_workflow(&args.id, &workflow).await?;
    println!("{}", format!("✓ Node '{}' created.", new_name).green().bold());
    println!("  Type:     {}", kind);
    println!("  Position: {}, {}", position[0], position[1]);
    Ok(())
}

/// Export all Code node scripts of a workflow
pub async fn export(client: &N8nClient, id: &str, output_dir: &Path) -> Result<()> {
    let workflow = client.get_workflow(id, false).await?;
    let entries = export_code(&workflow, output_dir)?;

    if entries.is_empty() {
        println!("{}", "No Code nodes found in workflow.".yellow());
        return Ok(());
    }

    for entry in &entries {
        println!("Exported: {} -> {}", entry.node_name.bold(), entry.filename.cyan());
    }
    println!(
        "\n{}",
        format!(
            "✓ Exported {} Code node(s) to {}",
            entries.len(),
            output_dir.display()
        )
        .green()
        .bold()
    );
    println!(
        "  Manifest: {}",
        output_dir.join(n8nctl_core::codeio::MANIFEST_FILENAME).display()
    );
    Ok(())
}

/// Import edited Code node scripts back into a workflow
pub async fn import(client: &N8nClient, id: &str, input_dir: &Path) -> Result<()> {
    let entries = read_manifest(input_dir)
        .context("run 'export-code' first to create the manifest")?;

    let workflow = client.get_workflow(id, false).await?;
    let updated = import_code(&workflow, &entries, input_dir)?;

    let mut changed = 0;
    for entry in &entries {
        let before = workflow.find_node(&entry.node_name).and_then(|n| n.code());
        let after = updated.find_node(&entry.node_name).and_then(|n| n.code());
        if before == after {
            println!("Unchanged: {}", entry.node_name.dimmed());
        } else {
            println!("Updated: {}", entry.node_name.bold());
            changed += 1;
        }
    }

    if changed == 0 {
        println!("\n{}", "No changes to import.".yellow());
        return Ok(());
    }

    client.update_workflow(id, &updated).await?;
    println!(
        "\n{}",
        format!("✓ Imported {} Code node(s).", changed).green().bold()
    );
    Ok(())
}

/// Parse a single KEY=VALUE pair; the value parses as JSON when it can,
/// otherwise it stays a string
fn parse_key_val(s: &str) -> Result<(String, Value)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    let key = s[..pos].to_string();
    let raw = &s[pos + 1..];
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key, value))
}

/// Set a possibly nested parameter using dot notation (e.g. "options.systemMessage")
fn set_nested_param(params: &mut Map<String, Value>, key: &str, value: Value) {
    let mut parts = key.split('.').peekable();
    let mut current = params;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            current.insert(part.to_string(), value);
            return;
        }
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            _ => return,
        };
    }
}

/// Parse an "X,Y" position argument
fn parse_position(spec: &str) -> Result<[i64; 2]> {
    let (x, y) = spec
        .split_once(',')
        .ok_or_else(|| anyhow!("invalid position format, use X,Y (e.g. 200,300)"))?;
    Ok([
        x.trim().parse().context("invalid X coordinate")?,
        y.trim().parse().context("invalid Y coordinate")?,
    ])
}

/// Position for a new node: right of the rightmost, vertically averaged
fn next_position(nodes: &[Node]) -> [i64; 2] {
    if nodes.is_empty() {
        return [200, 200];
    }
    let positions: Vec<(i64, i64)> = nodes
        .iter()
        .map(|n| {
            let pos = n.extra.get("position").and_then(|v| v.as_array());
            let x = pos.and_then(|p| p.first()).and_then(Value::as_i64).unwrap_or(0);
            let y = pos.and_then(|p| p.get(1)).and_then(Value::as_i64).unwrap_or(0);
            (x, y)
        })
        .collect();
    let max_x = positions.iter().map(|(x, _)| *x).max().unwrap_or(0);
    let avg_y = positions.iter().map(|(_, y)| *y).sum::<i64>() / positions.len() as i64;
    [max_x + 200, avg_y]
}

/// Print node details with long values elided
fn print_node_details(node: &Node) {
    println!("Name: {}", node.name.bold());
    println!("Type: {}", node.kind);
    println!("ID:   {}", node.id.as_deref().unwrap_or("-").dimmed());

    if node.parameters.is_empty() {
        return;
    }
    println!("\n{}", "Parameters:".bold());
    for (key, value) in &node.parameters {
        match value {
            Value::String(s) if key == "jsCode" => {
                println!("  {}: <{} lines>", key, s.lines().count().max(1));
            }
            Value::String(s) if s.chars().count() > 50 => {
                let head: String = s.chars().take(50).collect();
                println!("  {}: {}...", key, head);
            }
            other => println!("  {}: {}", key, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val_json_and_string() {
        let (k, v) = parse_key_val("retries=3").unwrap();
        assert_eq!(k, "retries");
        assert_eq!(v, json!(3));

        let (_, v) = parse_key_val("url=https://example.com").unwrap();
        assert_eq!(v, json!("https://example.com"));

        assert!(parse_key_val("no-equals").is_err());
    }

    #[test]
    fn test_set_nested_param_dot_notation() {
        let mut params = Map::new();
        set_nested_param(&mut params, "options.systemMessage", json!("hi"));
        set_nested_param(&mut params, "options.temperature", json!(0.2));
        set_nested_param(&mut params, "top", json!(true));

        assert_eq!(params["options"]["systemMessage"], "hi");
        assert_eq!(params["options"]["temperature"], 0.2);
        assert_eq!(params["top"], true);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("200,300").unwrap(), [200, 300]);
        assert!(parse_position("200").is_err());
        assert!(parse_position("a,b").is_err());
    }

    #[test]
    fn test_next_position_steps_right() {
        let nodes: Vec<Node> = serde_json::from_value(json!([
            {"name": "A", "type": "t", "parameters": {}, "position": [100, 100]},
            {"name": "B", "type": "t", "parameters": {}, "position": [300, 300]}
        ]))
        .unwrap();
        assert_eq!(next_position(&nodes), [500, 200]);
        assert_eq!(next_position(&[]), [200, 200]);
    }
}
