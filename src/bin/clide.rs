// src/bin/clide.rs

use clide::{
    cli::{Cli, dispatcher, prompt::PromptError},
    constants::LOG_ENV_VAR,
};
use clap::Parser;
use colored::*;

/// The main entry point of the `clide` application.
/// It sets up logging, parses arguments, dispatches, and performs centralized
/// error handling.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV_VAR, "warn"))
        .init();

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if let Err(e) = dispatcher::dispatch(cli.args) {
        // --- Centralized Error Handling ---
        // Ctrl+C inside a prompt exits silently with the conventional code.
        if let Some(PromptError::Interrupted) = e.downcast_ref::<PromptError>() {
            std::process::exit(130);
        }

        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}
