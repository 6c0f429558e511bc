use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::{
    cli::handlers::commons,
    core::graph_display::{self, DisplayOptions},
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Displays the command tree of the project."
)]
struct TreeArgs {
    /// Show the full absolute path of each node.
    #[arg(long, short)]
    paths: bool,

    /// Show the parameters each command requires.
    #[arg(long)]
    params: bool,

    /// Limit the depth of the tree display.
    #[arg(long, short)]
    depth: Option<usize>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let tree_args = TreeArgs::try_parse_from(&args)?;
    let project = commons::load_project()?;

    let display_options = DisplayOptions {
        show_paths: tree_args.paths,
        show_params: tree_args.params,
        max_depth: tree_args.depth,
    };

    println!("\n{}", "Command tree:".bold());
    print!("{}", graph_display::render_tree(&project.tree, display_options));
    Ok(())
}
