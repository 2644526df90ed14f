//! Sniff the Host Time Zone
//!
//! This example generates a decision tree over the whole IANA database and
//! walks it against the zone this process is configured with.
//!
//! Key concepts:
//! - Tree generation from candidate zones
//! - Resolving against the host zone (`TZ` is honoured on Unix)
//! - Inspecting the probes that led to the answer
//!
//! Run with: TZ=Australia/Adelaide cargo run --example sniff_host

use tzsniff::builder::build_iana_tree;
use tzsniff::core::{resolve_with_path, HostZone};
use tzsniff::validate::TreeRules;

fn main() {
    println!("=== Sniff Host Time Zone ===\n");

    let built = match build_iana_tree(["America/New_York", "Europe/London", "Europe/Paris"]) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Failed to generate tree: {}", e);
            return;
        }
    };
    let bundle = built.into_bundle();

    println!("Tree depth: {}", bundle.tree.max_depth());
    println!("Distinct zones: {}", bundle.tree.leaves().len());
    if let Err(e) = bundle.validate(&TreeRules::default()) {
        println!("Tree has problems: {}", e);
    }

    let resolution = resolve_with_path(&bundle.tree, &HostZone);
    for probe in resolution.probes() {
        println!(
            "  probe {} -> {:+} min{}",
            probe.test_point,
            probe.offset_minutes,
            if probe.matched { "" } else { " (no branch)" }
        );
    }

    match resolution.leaf() {
        Some(zone) => {
            println!("\nHost zone: {}", zone);
            let aliases = bundle.aliases(zone);
            if !aliases.is_empty() {
                println!("Indistinguishable from: {}", aliases.join(", "));
            }
        }
        None => println!("\nHost zone could not be identified"),
    }

    println!("\n=== Example Complete ===");
}
