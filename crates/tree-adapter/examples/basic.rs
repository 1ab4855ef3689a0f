use anyhow::{Context, Result};
use tree_adapter::prelude::*;

fn print_tree(adapter: &TreeAdapter) {
    let tree = adapter.get_tree();
    for key in tree.walk(TraversalOrder::PreOrder) {
        let node = tree.get(key).unwrap();
        println!(
            "{:indent$}{} [{}]",
            "",
            node.title,
            node.checked,
            indent = tree.depth(key) * 2
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let records = vec![
        FlatRecord::new("1", None, "Projects"),
        FlatRecord::new("2", Some("1"), "buffer-diff"),
        FlatRecord::new("3", Some("1"), "tree-viewer"),
        FlatRecord::new("4", Some("3"), "src"),
        FlatRecord::new("5", Some("9"), "Lost and found"),
        FlatRecord::new("6", Some("7"), "Loop A"),
        FlatRecord::new("7", Some("6"), "Loop B"),
    ];

    let mut adapter = TreeAdapter::new(records);
    println!("Initial tree:");
    print_tree(&adapter);

    adapter.set_checked("4", true)?;
    adapter
        .handle_drop(DropRequest::new("5", "2", DropPosition::After))
        .context("Failed to move node")?;
    adapter.handle_remove("7");
    adapter.rename("2", "buffer-diff (main)")?;
    let path = adapter.expand_to("4")?;

    println!();
    println!("After edits (revealed {}):", path.join(" / "));
    print_tree(&adapter);

    println!();
    println!("Records to persist:");
    for record in adapter.to_list() {
        println!(
            "  {:<3} parent={:<6} checked={:<5} {}",
            record.id,
            record.parent_id.as_deref().unwrap_or("-"),
            record.checked,
            record.name
        );
    }

    Ok(())
}
