//! Tag-related API endpoints

use serde_json::{Value, json};

use crate::N8nClient;
use crate::error::Result;
use crate::pagination::Page;

impl N8nClient {
    /// List tags, one page at a time
    pub async fn list_tags(&self, limit: Option<u32>, cursor: Option<&str>) -> Result<Page<Value>> {
        let mut request = self.get("/tags");
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Get a tag by ID
    pub async fn get_tag(&self, id: &str) -> Result<Value> {
        let response = self.get(&format!("/tags/{}", id)).send().await?;
        self.handle_response(response).await
    }

    /// Create a new tag
    pub async fn create_tag(&self, name: &str) -> Result<Value> {
        let response = self.post("/tags").json(&json!({ "name": name })).send().await?;
        self.handle_response(response).await
    }

    /// Rename a tag
    pub async fn update_tag(&self, id: &str, name: &str) -> Result<Value> {
        let response = self
            .put(&format!("/tags/{}", id))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a tag
    pub async fn delete_tag(&self, id: &str) -> Result<()> {
        let response = self.delete(&format!("/tags/{}", id)).send().await?;
        self.handle_empty_response(response).await
    }
}
