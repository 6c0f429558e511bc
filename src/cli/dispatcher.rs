use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::{
    cli::handlers,
    constants::BUILTIN_PREFIX,
    core::arg_parser::{self, Invocation},
};

// --- Builtin Definition and Registry ---

/// Defines a builtin, its aliases, and its handler.
struct BuiltinDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all `@` builtins.
static BUILTIN_REGISTRY: &[BuiltinDefinition] = &[
    BuiltinDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    BuiltinDefinition {
        name: "root",
        aliases: &[],
        handler: handlers::root::handle,
    },
    BuiltinDefinition {
        name: "tree",
        aliases: &[],
        handler: handlers::tree::handle,
    },
];

/// Finds a builtin in the registry by its name or alias.
fn find_builtin(name: &str) -> Option<&'static BuiltinDefinition> {
    BUILTIN_REGISTRY
        .iter()
        .find(|b| b.name == name || b.aliases.contains(&name))
}

/// Routes the raw arguments to a builtin or to an interactive run.
pub fn dispatch(all_args: Vec<String>) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    match arg_parser::parse_invocation(&all_args)? {
        Invocation::Builtin { name, args } => {
            let builtin = find_builtin(&name).ok_or_else(|| {
                anyhow!(
                    "Unknown builtin '{}'. Available: {}",
                    format!("{}{}", BUILTIN_PREFIX, name).cyan(),
                    builtin_names()
                )
            })?;
            (builtin.handler)(args)
        }
        Invocation::Session { steps, cli_args } => handlers::run::handle(steps, cli_args),
    }
}

fn builtin_names() -> String {
    BUILTIN_REGISTRY
        .iter()
        .map(|b| format!("{}{}", BUILTIN_PREFIX, b.name))
        .collect::<Vec<_>>()
        .join(", ")
}
