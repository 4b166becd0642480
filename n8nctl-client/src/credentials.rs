//! Credential-related API endpoints
//!
//! The list endpoint returns metadata only; secret values never come back
//! from the API.

use serde_json::Value;

use crate::N8nClient;
use crate::error::Result;
use crate::pagination::Page;

impl N8nClient {
    /// List credentials (metadata only), one page at a time
    pub async fn list_credentials(
        &self,
        limit: Option<u32>,
        cursor: Option<&str>,
    ) -> Result<Page<Value>> {
        let mut request = self.get("/credentials");
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Create a new credential
    ///
    /// # Arguments
    /// * `credential` - Document with `name`, `type` and `data` fields
    pub async fn create_credential(&self, credential: &Value) -> Result<Value> {
        let response = self.post("/credentials").json(credential).send().await?;
        self.handle_response(response).await
    }

    /// Delete a credential
    pub async fn delete_credential(&self, id: &str) -> Result<()> {
        let response = self.delete(&format!("/credentials/{}", id)).send().await?;
        self.handle_empty_response(response).await
    }

    /// Get the data schema for a credential type
    pub async fn get_credential_schema(&self, credential_type: &str) -> Result<Value> {
        let response = self
            .get(&format!("/credentials/schema/{}", credential_type))
            .send()
            .await?;
        self.handle_response(response).await
    }
}
