//! Tool surface as seen by an orchestrator.

use inbox_diagram::{DiagramError, ToolRegistry};
use serde_json::{json, Map, Value as JsonValue};

fn args(value: JsonValue) -> Map<String, JsonValue> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn tool_schemas_require_categories() {
    let registry = ToolRegistry::new();
    for tool in registry.tools() {
        assert_eq!(tool.input_schema["type"], "object");
        assert_eq!(tool.input_schema["required"], json!(["categories"]));
        assert_eq!(tool.input_schema["properties"]["categories"]["type"], "array");
    }
    let diagram = registry.get("create_mermaid_diagram").unwrap();
    assert_eq!(
        diagram.input_schema["properties"]["direction"]["enum"],
        json!(["top-down", "left-right"])
    );
}

#[test]
fn diagram_with_inbox_and_depth_limit() {
    let registry = ToolRegistry::new();
    let result = registry
        .dispatch(
            "create_mermaid_diagram",
            args(json!({
                "categories": [
                    {"id": "1", "name": "Work", "parent_id": null, "email_count": 45},
                    {"id": "2", "name": "Project Alpha", "parent_id": "1", "email_count": 20},
                    {"id": "3", "name": "Sprint 1", "parent_id": "2", "email_count": 5},
                    {"id": "5", "name": "Hockey", "parent_id": null, "email_count": 30}
                ],
                "inbox_root": true,
                "max_depth": 1,
                "direction": "left-right"
            })),
        )
        .unwrap();

    let expected = [
        "```mermaid",
        "graph LR",
        "    inbox[\"📬 Inbox\"]",
        "    node0[\"Work (45 emails)\"]",
        "    inbox --> node0",
        "    node1[\"Project Alpha (20 emails)\"]",
        "    node0 --> node1",
        "    node2([\"+1 more category (5 emails)\"])",
        "    node1 --> node2",
        "    node3[\"Hockey (30 emails)\"]",
        "    inbox --> node3",
        "",
        "    classDef inboxStyle fill:#4A90E2,stroke:#2E5C8A,color:#fff",
        "    class inbox inboxStyle",
        "```",
    ]
    .join("\n");
    assert_eq!(result, JsonValue::String(expected));
}

#[test]
fn empty_inbox_placeholder() {
    let registry = ToolRegistry::new();
    let result = registry
        .dispatch(
            "create_mermaid_diagram",
            args(json!({"categories": [], "inbox_root": true})),
        )
        .unwrap();
    assert_eq!(
        result,
        json!("```mermaid\ngraph TD\n    inbox[\"Inbox - No categories yet\"]\n```")
    );
}

#[test]
fn plain_tree_tool() {
    let registry = ToolRegistry::new();
    let result = registry
        .dispatch(
            "render_category_tree",
            args(json!({
                "categories": [
                    {"id": 8, "name": "Personal", "email_count": 25},
                    {"id": 9, "name": "Family", "parent_id": 8, "email_count": 15},
                    {"id": 10, "name": "Friends", "parent_id": 8, "email_count": 10}
                ],
                "cumulative_counts": true,
                "indent": 4
            })),
        )
        .unwrap();
    assert_eq!(result, json!("Personal (50)\n    Family (15)\n    Friends (10)"));
}

#[test]
fn invalid_input_is_reported() {
    let registry = ToolRegistry::new();

    let err = registry
        .dispatch(
            "create_mermaid_diagram",
            args(json!({"categories": [{"id": "A", "name": "X", "parent_id": "B"}]})),
        )
        .unwrap_err();
    assert_eq!(err.category_id(), Some("B"));

    let err = registry
        .dispatch("render_category_tree", args(json!({})))
        .unwrap_err();
    assert!(matches!(err, DiagramError::MissingArg(name) if name == "categories"));

    let err = registry
        .dispatch(
            "render_category_tree",
            args(json!({"categories": [{"id": "A", "name": "X", "email_count": "many"}]})),
        )
        .unwrap_err();
    assert!(matches!(err, DiagramError::InvalidArg { .. }));
}
