//! Workflow-related API endpoints

use serde::Serialize;
use serde_json::{Value, json};

use crate::N8nClient;
use crate::error::Result;
use crate::pagination::Page;
use n8nctl_core::domain::Workflow;

/// Filters and paging for [`N8nClient::list_workflows`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl N8nClient {
    // =============================================================================
    // Workflow Management
    // =============================================================================

    /// List workflows, one page at a time
    ///
    /// # Arguments
    /// * `params` - Filters (active, tags, name, project) plus limit/cursor
    ///
    /// # Returns
    /// One page of workflows and the cursor of the next page, if any
    pub async fn list_workflows(&self, params: &WorkflowListParams) -> Result<Page<Workflow>> {
        let response = self.get("/workflows").query(params).send().await?;
        self.handle_response(response).await
    }

    /// Get a workflow by ID
    pub async fn get_workflow(&self, id: &str, exclude_pinned_data: bool) -> Result<Workflow> {
        let mut request = self.get(&format!("/workflows/{}", id));
        if exclude_pinned_data {
            request = request.query(&[("excludePinnedData", "true")]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Create a new workflow
    ///
    /// # Returns
    /// The created workflow, with its server-assigned id
    pub async fn create_workflow(&self, workflow: &Workflow) -> Result<Workflow> {
        let response = self
            .post("/workflows")
            .json(&workflow.update_payload())
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update an existing workflow
    ///
    /// The full document is sent back (the API does not support field-level
    /// patches); [`Workflow::update_payload`] strips only the known
    /// read-only fields, so fields this client does not understand survive
    /// the round trip.
    pub async fn update_workflow(&self, id: &str, workflow: &Workflow) -> Result<Workflow> {
        let response = self
            .put(&format!("/workflows/{}", id))
            .json(&workflow.update_payload())
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a workflow
    pub async fn delete_workflow(&self, id: &str) -> Result<()> {
        let response = self.delete(&format!("/workflows/{}", id)).send().await?;
        self.handle_empty_response(response).await
    }

    /// Activate a workflow
    pub async fn activate_workflow(&self, id: &str) -> Result<Workflow> {
        let response = self
            .post(&format!("/workflows/{}/activate", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Deactivate a workflow
    pub async fn deactivate_workflow(&self, id: &str) -> Result<Workflow> {
        let response = self
            .post(&format!("/workflows/{}/deactivate", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Execute a workflow directly
    ///
    /// # Arguments
    /// * `id` - The workflow to run
    /// * `data` - Optional input payload passed to the workflow
    ///
    /// # Returns
    /// The raw response body; its shape (execution id, per-node run data)
    /// depends on the instance and is rendered by the caller.
    pub async fn run_workflow(&self, id: &str, data: Option<Value>) -> Result<Value> {
        let mut request = self.post(&format!("/workflows/{}/run", id));
        if let Some(data) = data {
            request = request.json(&json!({ "data": data }));
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Transfer a workflow to a different project
    pub async fn transfer_workflow(&self, id: &str, project_id: &str) -> Result<()> {
        let response = self
            .put(&format!("/workflows/{}/transfer", id))
            .json(&json!({ "destinationProjectId": project_id }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Get the tags attached to a workflow
    pub async fn get_workflow_tags(&self, id: &str) -> Result<Vec<Value>> {
        let response = self.get(&format!("/workflows/{}/tags", id)).send().await?;
        self.handle_response(response).await
    }

    /// Replace the tags attached to a workflow
    ///
    /// # Arguments
    /// * `tag_ids` - Ids of the tags the workflow should carry
    pub async fn update_workflow_tags(&self, id: &str, tag_ids: &[String]) -> Result<Vec<Value>> {
        let body: Vec<Value> = tag_ids.iter().map(|id| json!({ "id": id })).collect();
        let response = self
            .put(&format!("/workflows/{}/tags", id))
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }
}
