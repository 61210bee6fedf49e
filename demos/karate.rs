use splatter::{karate_club, modularity, GraphPartitioning, Splatter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // End-to-end: karate club graph -> splatter partitioning -> summary.
    //
    // Downstream consumers (layout, rendering) would take `labels` from
    // here; this demo just prints the membership and the score.
    let graph = karate_club();

    let splatter = Splatter::new(3).with_seed(42);
    let labels = splatter.partition(&graph)?;

    let mut by_partition: std::collections::BTreeMap<usize, Vec<usize>> =
        std::collections::BTreeMap::new();
    for (node, &partition) in labels.iter().enumerate() {
        by_partition.entry(partition).or_default().push(node);
    }

    for (partition, members) in &by_partition {
        println!(
            "partition {partition} ({} members): {members:?}",
            members.len()
        );
    }
    println!("modularity: {:.4}", modularity(&graph, &labels)?);

    Ok(())
}
