use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use tree_model::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Meta {
    owner: String,
}

const RECORDS: &str = r#"[
    {"id": "1", "parentId": null, "name": "Root", "owner": "ana"},
    {"id": "2", "parentId": "1", "name": "Child", "checked": true, "owner": "bo"}
]"#;

#[test]
fn test_records_read_camel_case_and_extra_fields() {
    let records: Vec<FlatRecord<Meta>> = serde_json::from_str(RECORDS).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].parent_id, None);
    assert!(!records[0].checked);
    assert_eq!(records[1].parent_id.as_deref(), Some("1"));
    assert_eq!(
        records[1].payload,
        Meta {
            owner: "bo".to_string()
        }
    );
}

#[test]
fn test_flattened_list_writes_the_same_shape() {
    let records: Vec<FlatRecord<Meta>> = serde_json::from_str(RECORDS).unwrap();
    let forest = create_tree_from_list(records, &TreeOptions::default());
    let value = serde_json::to_value(create_list_from_tree(&forest)).unwrap();

    assert_eq!(value[0]["id"], "1");
    assert_eq!(value[0]["parentId"], serde_json::Value::Null);
    // single checked child checks the parent
    assert_eq!(value[0]["checked"], true);
    assert_eq!(value[1]["parentId"], "1");
    assert_eq!(value[1]["owner"], "bo");
}

#[test]
fn test_check_state_is_lowercase() {
    let json = serde_json::to_string(&CheckState::Indeterminate).unwrap();
    assert_eq!(json, "\"indeterminate\"");
    let state: CheckState = serde_json::from_str("\"checked\"").unwrap();
    assert_eq!(state, CheckState::Checked);
}
