//! Code export/import transform
//!
//! Extracts the script bodies of code-bearing nodes into editable files plus
//! a manifest mapping filenames back to node identities, and patches edited
//! files back into the workflow document. Code text round-trips
//! byte-for-byte, trailing whitespace included.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::workflow::{Workflow, code_param_for_type};
use crate::error::{CoreError, Result};

/// Name of the manifest file written alongside exported scripts
pub const MANIFEST_FILENAME: &str = "_manifest.json";

/// One exported script file and the node it came from
///
/// The manifest is a JSON array of these records, in export order. The code
/// parameter key is not stored; it is a function of `node_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    pub node_name: String,
    pub node_type: String,
}

/// Derive a filesystem-safe filename stem from a node name
///
/// Characters outside `[A-Za-z0-9._-]` become underscores, runs of
/// underscores collapse, and leading/trailing underscores are trimmed. Case
/// is preserved so that re-export reproduces identical filenames. An empty
/// result falls back to "node".
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_underscore = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-') {
            out.push(ch);
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "node".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Export all code-bearing nodes of a workflow to `output_dir`
///
/// One `.js` file per Code node, named after the sanitized node name with
/// collisions disambiguated by a `_2`, `_3`, ... suffix in node order, plus
/// a `_manifest.json` recording the file-to-node mapping. The manifest is
/// written last, only after every script file succeeded, so a mid-export
/// failure leaves no manifest behind.
///
/// Returns the manifest entries; an empty list means the workflow has no
/// code nodes (nothing is written in that case).
pub fn export_code(workflow: &Workflow, output_dir: &Path) -> Result<Vec<ManifestEntry>> {
    // Pair each entry with its node up front: duplicate node names are
    // permitted, so a name lookup at write time could hit the wrong node.
    let mut staged = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    for node in workflow.nodes.iter().filter(|n| n.is_code_node()) {
        let stem = sanitize_filename(&node.name);
        let mut filename = format!("{}.js", stem);
        let mut counter = 2;
        while !taken.insert(filename.clone()) {
            filename = format!("{}_{}.js", stem, counter);
            counter += 1;
        }
        let entry = ManifestEntry {
            filename,
            node_name: node.name.clone(),
            node_type: node.kind.clone(),
        };
        staged.push((entry, node.code().unwrap_or("")));
    }

    if staged.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(output_dir)?;

    for (entry, code) in &staged {
        std::fs::write(output_dir.join(&entry.filename), code)?;
        debug!(node = %entry.node_name, file = %entry.filename, "exported code node");
    }

    let entries: Vec<ManifestEntry> = staged.into_iter().map(|(entry, _)| entry).collect();

    let manifest = serde_json::to_string_pretty(&entries)?;
    std::fs::write(output_dir.join(MANIFEST_FILENAME), manifest)?;

    Ok(entries)
}

/// Read the manifest written by [`export_code`] from `input_dir`
pub fn read_manifest(input_dir: &Path) -> Result<Vec<ManifestEntry>> {
    let path = input_dir.join(MANIFEST_FILENAME);
    if !path.exists() {
        return Err(CoreError::ManifestNotFound(path));
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Patch exported script files back into a workflow document
///
/// Every manifest entry is validated before anything is mutated: the script
/// file must exist, the named node must still be present (renames since
/// export fail loudly), and its type must still match the entry. On success
/// the mutated workflow is returned, ready for the update call; nodes absent
/// from the manifest are never touched. On failure the error is returned and
/// the input workflow is left as-is.
pub fn import_code(
    workflow: &Workflow,
    entries: &[ManifestEntry],
    input_dir: &Path,
) -> Result<Workflow> {
    // Validation pass: resolve every entry before the first mutation so a
    // stale manifest cannot produce a partial import.
    let mut staged: Vec<(&ManifestEntry, String)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let node = workflow
            .find_node(&entry.node_name)
            .ok_or_else(|| CoreError::NodeNotFound {
                name: entry.node_name.clone(),
            })?;
        if node.kind != entry.node_type {
            return Err(CoreError::StaleManifest {
                reason: format!(
                    "node '{}' changed type from '{}' to '{}' since export",
                    entry.node_name, entry.node_type, node.kind
                ),
            });
        }
        if code_param_for_type(&node.kind).is_none() {
            return Err(CoreError::NotACodeNode {
                name: entry.node_name.clone(),
            });
        }
        let path = input_dir.join(&entry.filename);
        if !path.exists() {
            return Err(CoreError::StaleManifest {
                reason: format!("script file '{}' is missing", entry.filename),
            });
        }
        staged.push((entry, std::fs::read_to_string(&path)?));
    }

    let mut updated = workflow.clone();
    for (entry, code) in staged {
        // Both lookups validated above
        if let Some(node) = updated.find_node_mut(&entry.node_name) {
            node.set_code(code)?;
        }
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_preserves_case_and_safe_chars() {
        assert_eq!(sanitize_filename("Fetch"), "Fetch");
        assert_eq!(sanitize_filename("Parse RSS feed"), "Parse_RSS_feed");
        assert_eq!(sanitize_filename("v1.2-final"), "v1.2-final");
    }

    #[test]
    fn test_sanitize_collapses_and_trims_underscores() {
        assert_eq!(sanitize_filename("  weird///name  "), "weird_name");
        assert_eq!(sanitize_filename("a!!b??c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename("???"), "node");
        assert_eq!(sanitize_filename(""), "node");
    }
}
