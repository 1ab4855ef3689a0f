use tree_adapter::prelude::*;

/// Render the tree the way a plain-text tree widget would
fn outline(adapter: &TreeAdapter) -> String {
    let tree = adapter.get_tree();
    tree.walk(TraversalOrder::PreOrder)
        .map(|key| {
            let node = tree.get(key).unwrap();
            let mark = match node.checked {
                CheckState::Checked => "[x]",
                CheckState::Unchecked => "[ ]",
                CheckState::Indeterminate => "[-]",
            };
            let arrow = if node.is_leaf() {
                " "
            } else if node.expanded {
                "v"
            } else {
                ">"
            };
            format!("{:indent$}{arrow} {mark} {}", "", node.title, indent = tree.depth(key) * 2)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_outline_after_edits() {
    let mut adapter = TreeAdapter::new(vec![
        FlatRecord::new("src", None, "src"),
        FlatRecord::new("lib", Some("src"), "lib.rs"),
        FlatRecord::new("tree", Some("src"), "tree"),
        FlatRecord::new("node", Some("tree"), "node.rs"),
        FlatRecord::new("mod", Some("tree"), "mod.rs"),
        FlatRecord::new("readme", None, "README.md"),
    ]);

    adapter.expand_to("node").unwrap();
    adapter.set_checked("node", true).unwrap();
    adapter
        .handle_drop(DropRequest::new("readme", "lib", DropPosition::Before))
        .unwrap();

    insta::assert_snapshot!(outline(&adapter), @r"
v [-] src
    [ ] README.md
    [ ] lib.rs
  v [-] tree
      [x] node.rs
      [ ] mod.rs
");
}
