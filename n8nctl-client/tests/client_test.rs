//! Integration tests for N8nClient against a mock n8n instance

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use n8nctl_client::{
    API_KEY_HEADER, ClientError, ExecutionListParams, N8nClient, WorkflowListParams, collect_pages,
};

fn client_for(server: &MockServer) -> N8nClient {
    N8nClient::new(server.uri(), "test-key")
}

#[tokio::test]
async fn list_workflows_sends_auth_header_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows"))
        .and(header(API_KEY_HEADER, "test-key"))
        .and(query_param("active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "1", "name": "Alerting", "active": true, "nodes": []}
            ],
            "nextCursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = WorkflowListParams {
        active: Some(true),
        ..Default::default()
    };
    let page = client_for(&server).list_workflows(&params).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Alerting");
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn collect_pages_follows_cursors_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows"))
        .and(query_param("cursor", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "2", "name": "Second", "nodes": []}],
            "nextCursor": null
        })))
        .mount(&server)
        .await;
    // No cursor param: first page
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1", "name": "First", "nodes": []}],
            "nextCursor": "c1"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let client = &client;
    let all = collect_pages(|cursor| {
        let params = WorkflowListParams {
            cursor,
            ..Default::default()
        };
        async move { client.list_workflows(&params).await }
    })
    .await
    .unwrap();

    let names: Vec<_> = all.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn get_workflow_round_trips_unknown_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "Alerting",
            "active": false,
            "nodes": [],
            "connections": {},
            "settings": {"executionOrder": "v1"},
            "someFutureField": {"nested": true}
        })))
        .mount(&server)
        .await;

    let wf = client_for(&server).get_workflow("1", false).await.unwrap();

    assert_eq!(wf.extra["someFutureField"]["nested"], true);
    assert_eq!(wf.extra["settings"]["executionOrder"], "v1");
}

#[tokio::test]
async fn update_workflow_strips_read_only_fields() {
    let server = MockServer::start().await;
    let wf: n8nctl_core::domain::Workflow = serde_json::from_value(json!({
        "id": "1",
        "name": "Alerting",
        "active": true,
        "nodes": [],
        "connections": {},
        "settings": {},
        "customField": "kept"
    }))
    .unwrap();

    // The PUT body must not contain id/active but must keep unknown fields
    Mock::given(method("PUT"))
        .and(path("/api/v1/workflows/1"))
        .and(body_json(json!({
            "name": "Alerting",
            "nodes": [],
            "connections": {},
            "settings": {},
            "customField": "kept"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1", "name": "Alerting", "nodes": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).update_workflow("1", &wf).await.unwrap();
}

#[tokio::test]
async fn api_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workflows/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"workflow not found"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_workflow("missing", false)
        .await
        .unwrap_err();

    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(*status, 404);
            assert!(message.contains("workflow not found"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(err.is_not_found());
}

#[tokio::test]
async fn connection_failure_is_distinguishable_from_rejection() {
    // Nothing listens here; the request never reaches a server
    let client = N8nClient::new("http://127.0.0.1:1", "test-key");
    let err = client.get_workflow("1", false).await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
}

#[tokio::test]
async fn list_executions_passes_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/executions"))
        .and(query_param("workflowId", "7"))
        .and(query_param("status", "error"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 99,
                "status": "error",
                "workflowId": "7",
                "startedAt": "2025-06-01T12:00:00.000Z"
            }],
            "nextCursor": null
        })))
        .mount(&server)
        .await;

    let params = ExecutionListParams {
        workflow_id: Some("7".to_string()),
        status: Some("error".to_string()),
        ..Default::default()
    };
    let page = client_for(&server).list_executions(&params).await.unwrap();

    assert_eq!(page.data[0].id, 99);
    assert_eq!(
        page.data[0].status,
        Some(n8nctl_core::domain::ExecutionStatus::Error)
    );
}

#[tokio::test]
async fn retry_execution_posts_load_workflow_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/executions/99/retry"))
        .and(body_json(json!({"loadWorkflow": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 100,
            "status": "running"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let execution = client_for(&server)
        .retry_execution("99", true)
        .await
        .unwrap();
    assert_eq!(execution.id, 100);
}

#[tokio::test]
async fn activate_and_deactivate_hit_action_endpoints() {
    let server = MockServer::start().await;
    let body = json!({"id": "1", "name": "Alerting", "active": true, "nodes": []});
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/1/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/1/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.activate_workflow("1").await.unwrap();
    client.deactivate_workflow("1").await.unwrap();
}

#[tokio::test]
async fn tag_and_credential_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tags"))
        .and(body_json(json!({"name": "ops"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "t1", "name": "ops"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "c1", "name": "My API", "type": "httpHeaderAuth"}],
            "nextCursor": null
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tag = client.create_tag("ops").await.unwrap();
    assert_eq!(tag["id"], "t1");

    let creds = client.list_credentials(None, None).await.unwrap();
    assert_eq!(creds.data[0]["type"], "httpHeaderAuth");
}
