use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::handlers::commons,
    core::parameters::parameters_for,
    models::{CommandTree, Parameter},
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Lists every command of the project."
)]
struct ListArgs {
    /// Print the list as JSON.
    #[arg(long)]
    json: bool,
}

/// One row of `@list`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    /// Path of the command relative to the project root.
    pub description: String,
    /// CLI steps that select this command.
    pub steps: Vec<String>,
    pub parameters: Vec<Parameter>,
}

/// Every command reachable from the root, in menu order.
pub fn collect_entries(tree: &CommandTree) -> Vec<ListEntry> {
    tree.leaves(tree.root())
        .into_iter()
        .map(|leaf| {
            let node = &tree[leaf];
            let relative = node.path.strip_prefix(tree.root_path()).unwrap_or(&node.path);
            ListEntry {
                name: node.name.clone(),
                description: relative.display().to_string(),
                steps: tree.ancestry(leaf).into_iter().map(str::to_string).collect(),
                parameters: parameters_for(tree, leaf),
            }
        })
        .collect()
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let project = commons::load_project()?;
    let entries = collect_entries(&project.tree);

    if list_args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No commands found in '{}'.", project.root.display());
        return Ok(());
    }

    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    for entry in &entries {
        println!(
            "{}  {}  {}",
            format!("{:<width$}", entry.name).cyan().bold(),
            entry.description,
            format!("(clide {})", entry.steps.join(" ")).dimmed(),
        );
    }
    Ok(())
}
