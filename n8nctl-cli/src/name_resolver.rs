//! Name resolver module
//!
//! Resolves a workflow by exact name against the full workflow list. Ambiguity
//! (the server permits duplicate names) and absence are both hard errors,
//! reported before any further call is made.

use anyhow::{Context, Result, anyhow};

use n8nctl_client::{N8nClient, Workflow, WorkflowListParams, collect_pages};

/// Resolve a workflow by exact, case-sensitive name
///
/// # Errors
/// Returns an error if:
/// - No workflow has that name
/// - More than one workflow has that name (ambiguous)
/// - The API call fails
pub async fn resolve_workflow_by_name(client: &N8nClient, name: &str) -> Result<Workflow> {
    let workflows = collect_pages(|cursor| {
        let params = WorkflowListParams {
            cursor,
            ..Default::default()
        };
        async move { client.list_workflows(&params).await }
    })
    .await
    .context("failed to fetch workflows for name resolution")?;

    let mut matches: Vec<Workflow> = workflows.into_iter().filter(|w| w.name == name).collect();

    match matches.len() {
        0 => Err(anyhow!("no workflow named '{}'", name)),
        1 => Ok(matches.remove(0)),
        _ => {
            let ids: Vec<String> = matches
                .iter()
                .map(|w| w.id.clone().unwrap_or_else(|| "-".to_string()))
                .collect();
            Err(anyhow!(
                "multiple workflows named '{}': {}",
                name,
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_listing(workflows: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/workflows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": workflows,
                "nextCursor": null
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_unknown_name_errors() {
        let server = server_listing(json!([])).await;
        let client = N8nClient::new(server.uri(), "key");

        let err = resolve_workflow_by_name(&client, "Missing")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no workflow named 'Missing'"));
    }

    #[tokio::test]
    async fn test_match_is_exact_and_case_sensitive() {
        let server = server_listing(json!([
            {"id": "10", "name": "Alerting", "nodes": []},
            {"id": "11", "name": "alerting", "nodes": []},
            {"id": "12", "name": "Alerting v2", "nodes": []}
        ]))
        .await;
        let client = N8nClient::new(server.uri(), "key");

        let workflow = resolve_workflow_by_name(&client, "Alerting").await.unwrap();
        assert_eq!(workflow.id.as_deref(), Some("10"));
    }

    #[tokio::test]
    async fn test_duplicate_names_are_ambiguous() {
        let server = server_listing(json!([
            {"id": "10", "name": "Alerting", "nodes": []},
            {"id": "11", "name": "Alerting", "nodes": []}
        ]))
        .await;
        let client = N8nClient::new(server.uri(), "key");

        let err = resolve_workflow_by_name(&client, "Alerting")
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("multiple workflows named 'Alerting'"));
        assert!(message.contains("10, 11"));
    }
}
