use pretty_assertions::assert_eq;
use tree_adapter::prelude::*;

fn shape(adapter: &TreeAdapter) -> Vec<(String, Option<String>)> {
    let tree = adapter.get_tree();
    tree.walk(TraversalOrder::PreOrder)
        .map(|key| (key.to_string(), tree.parent(key).map(str::to_string)))
        .collect()
}

#[test]
fn test_root_with_single_child() {
    let mut adapter = TreeAdapter::new(vec![
        FlatRecord::new("1", None, "Root"),
        FlatRecord::new("2", Some("1"), "Child"),
    ]);

    let roots: Vec<_> = adapter.get_tree().top_level().collect();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].title, "Root");
    let children: Vec<_> = roots[0].children().collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].title, "Child");
    assert!(children[0].is_leaf());

    adapter.set_checked("2", true).unwrap();
    let root = adapter.get_node("1").unwrap();
    assert_eq!(root.checked, CheckState::Checked);
    assert_eq!(root.checked.to_string(), "checked");
}

#[test]
fn test_cycle_in_input_terminates_at_top_level() {
    let adapter = TreeAdapter::new(vec![
        FlatRecord::new("a", Some("b"), "A"),
        FlatRecord::new("b", Some("a"), "B"),
    ]);

    assert_eq!(
        shape(&adapter),
        vec![("a".to_string(), None), ("b".to_string(), None)]
    );
}

#[test]
fn test_drop_into_own_child_changes_nothing() {
    let mut adapter = TreeAdapter::new(vec![
        FlatRecord::new("a", None, "A"),
        FlatRecord::new("a1", Some("a"), "A1"),
        FlatRecord::new("a2", Some("a1"), "A2"),
    ]);
    let before = shape(&adapter);

    for position in [DropPosition::Before, DropPosition::Inside, DropPosition::After] {
        let outcome = adapter
            .handle_drop(DropRequest::new("a", "a1", position))
            .unwrap();
        assert!(!outcome.is_moved());
    }

    assert_eq!(shape(&adapter), before);
}

#[test]
fn test_double_remove_matches_single_remove() {
    let records = vec![
        FlatRecord::new("r", None, "R"),
        FlatRecord::new("x", Some("r"), "X"),
        FlatRecord::new("x1", Some("x"), "X1"),
        FlatRecord::new("y", Some("r"), "Y"),
    ];

    let mut once = TreeAdapter::new(records.clone());
    once.handle_remove("x");

    let mut twice = TreeAdapter::new(records);
    twice.handle_remove("x");
    twice.handle_remove("x");

    assert_eq!(shape(&once), shape(&twice));
    assert_eq!(twice.len(), 2);
}

#[test]
fn test_edit_then_persist_flow() {
    let mut adapter = TreeAdapter::new(vec![
        FlatRecord::new("docs", None, "Docs"),
        FlatRecord::new("guide", Some("docs"), "Guide"),
        FlatRecord::new("api", Some("docs"), "API"),
        FlatRecord::new("misc", None, "Misc"),
    ]);

    adapter.rename("api", "API Reference").unwrap();
    adapter
        .handle_drop(DropRequest::new("misc", "guide", DropPosition::from_offset(1)))
        .unwrap();
    adapter.set_checked("misc", true).unwrap();
    adapter.merge_list(vec![FlatRecord::new("faq", Some("misc"), "FAQ")]);

    let list = adapter.to_list();
    let summary: Vec<_> = list
        .iter()
        .map(|r| (r.id.as_str(), r.parent_id.as_deref(), r.name.as_str(), r.checked))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("docs", None, "Docs", false),
            ("guide", Some("docs"), "Guide", false),
            ("misc", Some("docs"), "Misc", false),
            ("faq", Some("misc"), "FAQ", false),
            ("api", Some("docs"), "API Reference", false),
        ]
    );
    // misc was a checked leaf; its only child arrives unchecked
    assert!(adapter.checked_keys().is_empty());
    assert!(adapter.indeterminate_keys().is_empty());
}

#[test]
fn test_refetch_after_persist_rebuilds_same_shape() {
    let mut adapter = TreeAdapter::new(vec![
        FlatRecord::new("1", None, "One"),
        FlatRecord::new("2", Some("1"), "Two"),
        FlatRecord::new("3", None, "Three"),
    ]);
    adapter
        .handle_drop(DropRequest::new("3", "2", DropPosition::Inside))
        .unwrap();
    let before = shape(&adapter);

    let persisted = adapter.to_list();
    adapter.update_tree_from_list(persisted);

    assert_eq!(shape(&adapter), before);
}

#[test]
fn test_name_resolver_applies_to_every_build() {
    let options = TreeOptions::new()
        .name_resolver(|r: &FlatRecord<u32>| format!("{} ({})", r.name, r.payload));
    let mut adapter =
        TreeAdapter::with_options(vec![FlatRecord::new("1", None, "Root").with_payload(2u32)], options);
    assert_eq!(adapter.get_tree().title("1"), Some("Root (2)"));

    adapter.merge_list(vec![FlatRecord::new("2", Some("1"), "Leaf").with_payload(5u32)]);
    assert_eq!(adapter.get_tree().title("2"), Some("Leaf (5)"));

    adapter
        .handle_update(UpdateRequest::new(
            "1",
            vec![FlatRecord::new("3", Some("1"), "New").with_payload(7u32)],
        ))
        .unwrap();
    assert_eq!(adapter.get_tree().title("3"), Some("New (7)"));
    assert!(!adapter.contains("2"));
}

#[test]
fn test_unknown_keys_fail_fast_except_remove() {
    let mut adapter = TreeAdapter::new(vec![FlatRecord::new("1", None, "Root")]);
    let unknown = AdapterError::UnknownKey("404".to_string());

    assert_eq!(adapter.set_checked("404", true), Err(unknown.clone()));
    assert_eq!(adapter.toggle_expanded("404"), Err(unknown.clone()));
    assert_eq!(adapter.find_path("404"), Err(unknown.clone()));
    assert_eq!(
        adapter.handle_drop(DropRequest::new("1", "404", DropPosition::Inside)),
        Err(unknown.clone())
    );
    assert_eq!(
        adapter.handle_update(UpdateRequest::new("404", vec![])),
        Err(unknown)
    );
    assert!(!adapter.handle_remove("404"));
    assert_eq!(adapter.len(), 1);
}

#[test]
fn test_deep_outline_stays_responsive() {
    const DEPTH: usize = 50_000;
    let records: Vec<FlatRecord> = (0..DEPTH)
        .map(|i| {
            let parent = i.checked_sub(1).map(|p| format!("n{p}"));
            FlatRecord::new(format!("n{i}"), parent.as_deref(), format!("Level {i}"))
        })
        .collect();
    let mut adapter = TreeAdapter::new(records);
    let deepest = format!("n{}", DEPTH - 1);

    adapter.set_checked(&deepest, true).unwrap();
    assert_eq!(adapter.checked_keys().len(), DEPTH);
    assert_eq!(adapter.find_path(&deepest).unwrap().len(), DEPTH);

    let rejected = adapter
        .handle_drop(DropRequest::new("n0", deepest.clone(), DropPosition::Inside))
        .unwrap();
    assert_eq!(rejected, DropOutcome::Rejected(DropRejection::IntoOwnSubtree));

    let moved = adapter
        .handle_drop(DropRequest::new(deepest.clone(), "n0", DropPosition::Before))
        .unwrap();
    assert!(moved.is_moved());
    assert_eq!(adapter.get_tree().root_keys(), [deepest.as_str(), "n0"]);

    assert_eq!(format!("{adapter:?}").matches("NodeRef").count(), DEPTH);

    assert!(adapter.handle_remove("n0"));
    assert_eq!(adapter.len(), 1);
}
