//! Execution-related API endpoints

use serde::Serialize;
use serde_json::json;

use crate::N8nClient;
use crate::error::Result;
use crate::pagination::Page;
use n8nctl_core::domain::Execution;

/// Filters and paging for [`N8nClient::list_executions`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// One of: canceled, error, new, running, success, waiting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl N8nClient {
    // =============================================================================
    // Executions
    // =============================================================================

    /// List executions, one page at a time
    ///
    /// # Arguments
    /// * `params` - Filters (workflow, status, project, includeData) plus
    ///   limit/cursor
    pub async fn list_executions(&self, params: &ExecutionListParams) -> Result<Page<Execution>> {
        let response = self.get("/executions").query(params).send().await?;
        self.handle_response(response).await
    }

    /// Get an execution by ID
    ///
    /// # Arguments
    /// * `id` - The execution ID
    /// * `include_data` - Fetch the full per-node input/output data too
    pub async fn get_execution(&self, id: &str, include_data: bool) -> Result<Execution> {
        let mut request = self.get(&format!("/executions/{}", id));
        if include_data {
            request = request.query(&[("includeData", "true")]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Delete an execution
    pub async fn delete_execution(&self, id: &str) -> Result<()> {
        let response = self.delete(&format!("/executions/{}", id)).send().await?;
        self.handle_empty_response(response).await
    }

    /// Retry an execution
    ///
    /// Creates a new execution derived from a prior one; this is a business
    /// operation, not a resilience mechanism.
    ///
    /// # Arguments
    /// * `id` - The execution to retry
    /// * `load_workflow` - Use the current workflow version instead of the
    ///   one captured at execution time
    ///
    /// # Returns
    /// The newly created execution
    pub async fn retry_execution(&self, id: &str, load_workflow: bool) -> Result<Execution> {
        let mut request = self.post(&format!("/executions/{}/retry", id));
        if load_workflow {
            request = request.json(&json!({ "loadWorkflow": true }));
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }
}
