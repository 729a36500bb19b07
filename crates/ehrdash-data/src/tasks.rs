// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON-in-cell helpers for process-guide runbook fields.

use ehrdash_core::types::TaskItem;
use serde_json::Value;
use tracing::debug;

/// Parse a cell's text as JSON.
///
/// Blank input and invalid JSON both yield `None`.
pub fn safe_json_parse(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "cell is not valid JSON");
            None
        }
    }
}

/// Parse a cell holding a JSON array of task items.
///
/// Anything other than an array yields an empty list. Array elements that
/// are not task-shaped objects are skipped.
pub fn parse_task_list(text: &str) -> Vec<TaskItem> {
    match safe_json_parse(text) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_task_item() {
        let tasks = parse_task_list(r#"[{"task":"Call IT","owner":"Bob"}]"#);
        assert_eq!(
            tasks,
            vec![TaskItem {
                task: Some("Call IT".into()),
                owner: Some("Bob".into()),
                system: None,
                resources: None,
            }]
        );
    }

    #[test]
    fn blank_or_invalid_yields_empty() {
        assert!(parse_task_list("").is_empty());
        assert!(parse_task_list("   ").is_empty());
        assert!(parse_task_list("[{").is_empty());
        assert!(safe_json_parse("not json").is_none());
    }

    #[test]
    fn non_array_yields_empty() {
        assert!(parse_task_list(r#"{"task":"x"}"#).is_empty());
        assert!(parse_task_list("42").is_empty());
        assert_eq!(safe_json_parse("42"), Some(Value::from(42)));
    }

    #[test]
    fn resources_and_malformed_elements() {
        let tasks = parse_task_list(
            r#"[{"task":"Log in","resources":["VPN guide","Citrix"]}, 7, {"task": 3}, {}]"#,
        );
        assert_eq!(tasks.len(), 2);
        assert_eq!(
            tasks[0].resources.as_deref(),
            Some(&["VPN guide".to_string(), "Citrix".to_string()][..])
        );
        assert_eq!(tasks[1], TaskItem::default());
    }
}
