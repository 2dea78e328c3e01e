use crate::types::{Changes, PatchOperation};
use tracing::debug;

/// Builds a `replace` patch for every allowed attribute present in `updates`,
/// in the order of `allowed`. Updates outside the whitelist are dropped.
pub fn build_patch(allowed: &[&str], updates: &Changes) -> Vec<PatchOperation> {
    for key in updates.keys() {
        if !allowed.contains(&key.as_str()) {
            debug!(attribute = %key, "dropping update for immutable attribute");
        }
    }

    allowed
        .iter()
        .filter_map(|attribute| {
            updates.get(*attribute).map(|value| PatchOperation {
                path: format!("/{attribute}"),
                value: value.clone(),
                op: "replace".to_string(),
            })
        })
        .collect()
}
