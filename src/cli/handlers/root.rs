use anyhow::Result;
use clap::Parser;

use crate::{cli::handlers::commons, core::config};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Prints the project's command directory."
)]
struct RootArgs {}

pub fn handle(args: Vec<String>) -> Result<()> {
    RootArgs::try_parse_from(&args)?;
    let config = config::load_config()?;
    let root = commons::discover_root(&config)?;
    println!("{}", dunce::simplified(&root).display());
    Ok(())
}
