use std::env;
use std::time::Instant;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tree_adapter::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut node_count = 100_000;
    if args.len() > 1 {
        if let Ok(count) = args[1].parse::<usize>() {
            node_count = count;
        }
    }

    println!("Generating {} records...", node_count);

    // Use a seeded RNG for reproducibility
    let mut rng = StdRng::seed_from_u64(42);
    let records: Vec<FlatRecord> = (0..node_count)
        .map(|i| {
            // each record points at an earlier one, with the odd dangling parent
            let parent = match i {
                0 => None,
                _ if rng.gen_ratio(1, 100) => Some(format!("missing-{i}")),
                _ => Some(format!("n{}", rng.gen_range(i.saturating_sub(64)..i))),
            };
            FlatRecord::new(format!("n{i}"), parent.as_deref(), format!("Node {i}"))
        })
        .collect();

    let start = Instant::now();
    let mut adapter = TreeAdapter::new(records);
    println!(
        "  Built {} nodes ({} top-level) in {:?}",
        adapter.len(),
        adapter.get_tree().root_keys().len(),
        start.elapsed()
    );

    let start = Instant::now();
    adapter.set_checked("n0", true)?;
    println!("  Checked the first root's subtree in {:?}", start.elapsed());

    let deepest = adapter
        .get_tree()
        .walk(TraversalOrder::PreOrder)
        .max_by_key(|key| adapter.get_tree().depth(key))
        .map(str::to_string)
        .unwrap_or_default();
    let start = Instant::now();
    adapter.set_checked(&deepest, false)?;
    println!(
        "  Unchecked {} at depth {} in {:?}",
        deepest,
        adapter.get_tree().depth(&deepest),
        start.elapsed()
    );

    let start = Instant::now();
    let list = adapter.to_list();
    println!("  Flattened {} records in {:?}", list.len(), start.elapsed());

    println!("Done!");
    Ok(())
}
