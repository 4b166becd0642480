//! Workflow domain types
//!
//! A workflow document is treated as a mostly-opaque mapping: the handful of
//! fields this client understands are typed, everything else is captured by a
//! flattened map so that read-modify-write cycles never drop fields the n8n
//! schema defines but this client does not know about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// Full type identifier of n8n Code nodes
pub const CODE_NODE_TYPE: &str = "n8n-nodes-base.code";

/// Full type identifier of n8n Webhook trigger nodes
pub const WEBHOOK_NODE_TYPE: &str = "n8n-nodes-base.webhook";

/// Parameter key holding the script text of a code-bearing node type.
///
/// Returns `None` for node types that carry no embedded script.
pub fn code_param_for_type(node_type: &str) -> Option<&'static str> {
    match node_type {
        CODE_NODE_TYPE => Some("jsCode"),
        _ => None,
    }
}

/// A workflow document as returned by the n8n API
///
/// Only the fields the client actively reads or mutates are typed; the rest
/// (connections, settings, staticData, tags, ...) round-trip through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Fields this client does not understand, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single node inside a workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Node name, the lookup key; unique per workflow by convention
    pub name: String,
    /// Node type, e.g. "n8n-nodes-base.code"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    /// Whether this node carries embedded script code
    pub fn is_code_node(&self) -> bool {
        code_param_for_type(&self.kind).is_some()
    }

    /// The node's script text, if it is a code-bearing node
    pub fn code(&self) -> Option<&str> {
        let key = code_param_for_type(&self.kind)?;
        Some(self.parameters.get(key).and_then(Value::as_str).unwrap_or(""))
    }

    /// Overwrite the node's script text in place
    ///
    /// # Errors
    /// Returns [`CoreError::NotACodeNode`] if the node type carries no code
    /// parameter.
    pub fn set_code(&mut self, text: impl Into<String>) -> Result<(), CoreError> {
        let key = code_param_for_type(&self.kind).ok_or_else(|| CoreError::NotACodeNode {
            name: self.name.clone(),
        })?;
        self.parameters.insert(key.to_string(), Value::String(text.into()));
        Ok(())
    }
}

impl Workflow {
    /// Find a node by exact, case-sensitive name
    ///
    /// First match wins if the workflow contains duplicate names; the server
    /// permits duplicates, so this client does not reject them.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Mutable variant of [`Workflow::find_node`]
    pub fn find_node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    /// Names of all nodes, in document order
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// The webhook trigger node of this workflow, if any
    pub fn webhook_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == WEBHOOK_NODE_TYPE)
    }

    /// Rename a node, keeping the connections object consistent
    ///
    /// Only the node's name field changes; its position in the node sequence,
    /// its type, and its parameters are untouched. References to the old name
    /// inside the passthrough `connections` object (source keys and target
    /// `node` fields) are rewritten, as the n8n editor does on rename.
    ///
    /// # Errors
    /// Returns [`CoreError::NodeNotFound`] if no node has the old name.
    pub fn rename_node(&mut self, old: &str, new: &str) -> Result<(), CoreError> {
        let node = self
            .find_node_mut(old)
            .ok_or_else(|| CoreError::NodeNotFound { name: old.to_string() })?;
        node.name = new.to_string();

        if let Some(Value::Object(connections)) = self.extra.get_mut("connections") {
            // Source side: the node's own key in the connections map
            if let Some(outputs) = connections.remove(old) {
                connections.insert(new.to_string(), outputs);
            }
            // Target side: every {node, type, index} entry pointing at it
            for outputs in connections.values_mut() {
                rewrite_connection_targets(outputs, old, new);
            }
        }

        Ok(())
    }

    /// Build the JSON body for a workflow update call
    ///
    /// The n8n update endpoint rejects read-only fields, so the known
    /// read-only keys are stripped; every other field, including ones this
    /// client does not understand, passes through verbatim.
    pub fn update_payload(&self) -> Value {
        const READ_ONLY: &[&str] = &[
            "id",
            "active",
            "createdAt",
            "updatedAt",
            "tags",
            "isArchived",
            "shared",
            "versionId",
            "triggerCount",
            "pinData",
            "meta",
        ];

        let mut doc = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct with named fields always serializes to an object
            _ => Map::new(),
        };
        for key in READ_ONLY {
            doc.remove(*key);
        }
        Value::Object(doc)
    }
}

/// Rewrite target references inside one source's connection outputs
fn rewrite_connection_targets(outputs: &mut Value, old: &str, new: &str) {
    let Some(groups) = outputs.as_object_mut() else {
        return;
    };
    // Shape: {"main": [[{"node": "...", "type": "main", "index": 0}, ...], ...]}
    for group in groups.values_mut() {
        let Some(ports) = group.as_array_mut() else {
            continue;
        };
        for port in ports {
            let Some(targets) = port.as_array_mut() else {
                continue;
            };
            for target in targets {
                if let Some(obj) = target.as_object_mut()
                    && obj.get("node").and_then(Value::as_str) == Some(old)
                {
                    obj.insert("node".to_string(), Value::String(new.to_string()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_workflow() -> Workflow {
        serde_json::from_value(json!({
            "id": "1",
            "name": "Alerting",
            "active": true,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "settings": {"executionOrder": "v1"},
            "staticData": null,
            "nodes": [
                {
                    "id": "a",
                    "name": "Fetch",
                    "type": "n8n-nodes-base.code",
                    "typeVersion": 2,
                    "position": [200, 300],
                    "parameters": {"jsCode": "return 1;", "mode": "runOnceForAllItems"}
                },
                {
                    "id": "b",
                    "name": "Notify",
                    "type": "n8n-nodes-base.httpRequest",
                    "position": [400, 300],
                    "parameters": {"url": "https://example.com"}
                }
            ],
            "connections": {
                "Fetch": {"main": [[{"node": "Notify", "type": "main", "index": 0}]]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_find_node_exact_match() {
        let wf = sample_workflow();
        assert_eq!(wf.find_node("Fetch").unwrap().kind, CODE_NODE_TYPE);
        assert!(wf.find_node("fetch").is_none());
        assert!(wf.find_node("Missing").is_none());
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let wf = sample_workflow();
        let value = serde_json::to_value(&wf).unwrap();
        assert_eq!(value["settings"]["executionOrder"], "v1");
        assert_eq!(value["createdAt"], "2025-01-01T00:00:00.000Z");
        assert_eq!(value["nodes"][0]["typeVersion"], 2);
        assert_eq!(value["nodes"][0]["position"], json!([200, 300]));
    }

    #[test]
    fn test_set_code_overwrites_in_place() {
        let mut wf = sample_workflow();
        let node = wf.find_node_mut("Fetch").unwrap();
        node.set_code("return 2;").unwrap();
        assert_eq!(wf.find_node("Fetch").unwrap().code(), Some("return 2;"));
        // Other parameters untouched
        assert_eq!(
            wf.find_node("Fetch").unwrap().parameters["mode"],
            "runOnceForAllItems"
        );
    }

    #[test]
    fn test_set_code_rejects_non_code_node() {
        let mut wf = sample_workflow();
        let node = wf.find_node_mut("Notify").unwrap();
        assert!(matches!(
            node.set_code("x"),
            Err(CoreError::NotACodeNode { .. })
        ));
    }

    #[test]
    fn test_rename_preserves_everything_but_the_name() {
        let mut wf = sample_workflow();
        let before = wf.nodes[0].clone();
        wf.rename_node("Fetch", "Fetch Data").unwrap();

        let after = &wf.nodes[0];
        assert_eq!(after.name, "Fetch Data");
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.parameters, before.parameters);
        assert_eq!(after.extra, before.extra);

        // Connections: source key moved
        let connections = wf.extra.get("connections").unwrap();
        assert!(connections.get("Fetch").is_none());
        assert!(connections.get("Fetch Data").is_some());
    }

    #[test]
    fn test_rename_rewrites_connection_targets() {
        let mut wf = sample_workflow();
        wf.rename_node("Notify", "Alert").unwrap();
        let connections = wf.extra.get("connections").unwrap();
        assert_eq!(connections["Fetch"]["main"][0][0]["node"], "Alert");
    }

    #[test]
    fn test_rename_missing_node_errors() {
        let mut wf = sample_workflow();
        assert!(matches!(
            wf.rename_node("Missing", "X"),
            Err(CoreError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_update_payload_strips_read_only_fields() {
        let wf = sample_workflow();
        let payload = wf.update_payload();
        assert!(payload.get("id").is_none());
        assert!(payload.get("active").is_none());
        assert!(payload.get("createdAt").is_none());
        // Writable and unknown fields survive
        assert_eq!(payload["name"], "Alerting");
        assert_eq!(payload["settings"]["executionOrder"], "v1");
        assert!(payload.get("connections").is_some());
        assert_eq!(payload["nodes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_names_first_match_wins() {
        let mut wf = sample_workflow();
        let mut dup = wf.nodes[1].clone();
        dup.name = "Fetch".to_string();
        wf.nodes.push(dup);
        // First match is still the Code node at index 0
        assert_eq!(wf.find_node("Fetch").unwrap().kind, CODE_NODE_TYPE);
    }
}
