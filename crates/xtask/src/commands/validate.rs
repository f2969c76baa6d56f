//! Validate a content directory
//!
//! Loads `config.toml`, `stats.ron` and every graph under `graphs/`, building
//! each graph so that structural errors (bad slots, unknown prerequisites,
//! cycles) are reported with the file that caused them.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use skill_content::ContentFactory;
use skill_core::{SkillGraph, StatRegistry};

use crate::dirs;

/// Validate skill content
#[derive(Parser)]
pub struct Validate {
    /// Content directory (defaults to $SKILLTREE_DATA_DIR or ./data)
    #[arg(value_name = "DATA_DIR")]
    data_dir: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let data_dir = self.data_dir.unwrap_or_else(dirs::content_dir);
        let factory = ContentFactory::new(&data_dir);
        let mut failures = 0;

        println!(
            "{} {}",
            style("Content Directory:").bold().cyan(),
            data_dir.display()
        );
        println!();

        match factory.load_config() {
            Ok(config) => pass(
                "config.toml",
                format!(
                    "downgrades {}, {} policy, {} starting points",
                    if config.allow_downgrade { "on" } else { "off" },
                    config.downgrade_policy,
                    config.starting_points
                ),
            ),
            Err(err) => {
                fail("config.toml", &err);
                failures += 1;
            }
        }

        let stats = match factory.load_stats() {
            Ok(stats) => {
                pass("stats.ron", format!("{} stats", stats.len()));
                Some(stats)
            }
            Err(err) => {
                fail("stats.ron", &err);
                failures += 1;
                None
            }
        };

        for graph_id in factory.list_graphs()? {
            let label = format!("graphs/{}.ron", graph_id);
            let graph = factory
                .load_graph(&graph_id)
                .and_then(|definition| Ok(SkillGraph::from_definition(definition)?));

            match graph {
                Ok(graph) => {
                    let unknown = stats
                        .as_ref()
                        .map(|stats| unknown_stats(&graph, stats))
                        .unwrap_or_default();
                    if unknown.is_empty() {
                        pass(
                            &label,
                            format!(
                                "{} nodes on a {}x{} grid",
                                graph.node_count(),
                                graph.width(),
                                graph.height()
                            ),
                        );
                    } else {
                        println!(
                            "  {} {:<24} references unknown stats: {}",
                            style("✗").red().bold(),
                            label,
                            unknown.join(", ")
                        );
                        failures += 1;
                    }
                }
                Err(err) => {
                    fail(&label, &err);
                    failures += 1;
                }
            }
        }

        println!();
        if failures > 0 {
            anyhow::bail!("{} content file(s) failed validation", failures);
        }
        println!("{}", style("✓ All content is valid").green().bold());
        Ok(())
    }
}

/// Stat names used by modifiers or resource costs that the catalog lacks.
fn unknown_stats(graph: &SkillGraph, stats: &StatRegistry) -> Vec<String> {
    let mut unknown: Vec<String> = graph
        .nodes()
        .flat_map(|node| {
            let definition = node.definition();
            definition
                .modifiers
                .iter()
                .map(|modifier| modifier.stat.clone())
                .chain(definition.resource_cost.iter().map(|cost| cost.stat.clone()))
                .collect::<Vec<_>>()
        })
        .filter(|stat| stats.id_of(stat).is_none())
        .collect();
    unknown.sort();
    unknown.dedup();
    unknown
}

fn pass(label: &str, detail: String) {
    println!(
        "  {} {:<24} {}",
        style("✓").green(),
        label,
        style(detail).dim()
    );
}

fn fail(label: &str, err: &anyhow::Error) {
    println!(
        "  {} {:<24} {}",
        style("✗").red().bold(),
        label,
        style(format!("{:#}", err)).red()
    );
}
