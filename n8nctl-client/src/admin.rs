//! Instance administration endpoints: users, audit, variables, projects

use serde_json::{Value, json};

use crate::N8nClient;
use crate::error::Result;
use crate::pagination::Page;

/// Options for [`N8nClient::generate_audit`]
#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    /// Days without execution before a workflow counts as abandoned
    pub days_abandoned_workflow: Option<u32>,
    /// Audit categories (credentials, database, nodes, filesystem, instance)
    pub categories: Vec<String>,
}

impl N8nClient {
    /// List users, one page at a time
    pub async fn list_users(&self, limit: Option<u32>, cursor: Option<&str>) -> Result<Page<Value>> {
        let mut request = self.get("/users");
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Generate a security audit report
    pub async fn generate_audit(&self, options: &AuditOptions) -> Result<Value> {
        let mut request = self.post("/audit");

        let mut additional = serde_json::Map::new();
        if let Some(days) = options.days_abandoned_workflow {
            additional.insert("daysAbandonedWorkflow".to_string(), json!(days));
        }
        if !options.categories.is_empty() {
            additional.insert("categories".to_string(), json!(options.categories));
        }
        if !additional.is_empty() {
            request = request.json(&json!({ "additionalOptions": additional }));
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// List all variables
    pub async fn list_variables(&self) -> Result<Page<Value>> {
        let response = self.get("/variables").send().await?;
        self.handle_response(response).await
    }

    /// Create a new variable
    pub async fn create_variable(&self, key: &str, value: &str) -> Result<()> {
        let response = self
            .post("/variables")
            .json(&json!({ "key": key, "value": value }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Delete a variable
    pub async fn delete_variable(&self, id: &str) -> Result<()> {
        let response = self.delete(&format!("/variables/{}", id)).send().await?;
        self.handle_empty_response(response).await
    }

    /// List projects, one page at a time
    pub async fn list_projects(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<Page<Value>> {
        let mut request = self.get("/projects");
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }
}
