mod output;
mod tree;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tree::{SuffixTree, TreeStats, SENTINEL_BYTE};

#[derive(Parser)]
#[command(name = "stxi")]
#[command(about = "Suffix tree text index - fast repeated substring search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find every occurrence of a pattern in a file
    Search {
        /// Pattern to look for
        pattern: String,

        /// File to index
        file: PathBuf,

        /// Print offsets sorted ascending
        #[arg(short, long)]
        sorted: bool,

        /// Print only the number of occurrences
        #[arg(short, long)]
        count: bool,

        /// Emit offsets as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Test whether a pattern occurs in a file (exit code 1 if absent)
    Contains {
        /// Pattern to look for
        pattern: String,

        /// File to index
        file: PathBuf,
    },
    /// Show statistics of the tree built for a file
    Stats {
        /// File to index
        file: PathBuf,

        /// Emit statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            pattern,
            file,
            sorted,
            count,
            json,
            no_color,
        } => {
            let tree = build_tree(&file)?;
            let mut offsets = tree.search(pattern.as_bytes())?;
            if sorted || json || count {
                offsets.sort_unstable();
            }

            if count {
                println!("{}", offsets.len());
            } else if json {
                println!("{}", serde_json::to_string(&offsets)?);
            } else {
                output::print_occurrences(&tree, pattern.len(), &offsets, !no_color)?;
            }
        }
        Commands::Contains { pattern, file } => {
            let tree = build_tree(&file)?;
            if tree.contains(pattern.as_bytes())? {
                println!("match");
            } else {
                println!("no match");
                std::process::exit(1);
            }
        }
        Commands::Stats { file, json } => {
            let tree = build_tree(&file)?;
            let stats = TreeStats::gather(&tree);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                tree::stats::show_stats(&stats);
            }
        }
    }

    Ok(())
}

/// Read the file and build its tree, appending the sentinel byte when
/// missing so every suffix terminates at a distinct leaf.
fn build_tree(file: &PathBuf) -> Result<SuffixTree> {
    let mut text = std::fs::read(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    if text.last() != Some(&SENTINEL_BYTE) {
        text.push(SENTINEL_BYTE);
    }
    let tree = SuffixTree::build(text)
        .with_context(|| format!("failed to index {}", file.display()))?;
    Ok(tree)
}
