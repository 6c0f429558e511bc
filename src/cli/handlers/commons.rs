// src/cli/handlers/commons.rs

// Shared by every handler that needs the current project.

use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};

use crate::{
    core::{
        classifier,
        config::{self, ClideConfig},
        tree_builder,
    },
    models::CommandTree,
};

/// The discovered project: user config, marker directory, compiled tree.
#[derive(Debug)]
pub struct Project {
    pub config: ClideConfig,
    pub root: PathBuf,
    pub tree: CommandTree,
}

/// Finds the marker directory above the working directory.
pub fn discover_root(config: &ClideConfig) -> Result<PathBuf> {
    let cwd = env::current_dir().context("Could not read the current directory")?;
    find_root_from(config, &cwd)
}

fn find_root_from(config: &ClideConfig, start: &Path) -> Result<PathBuf> {
    let root = classifier::find_project_root(start, &config.project_marker, &config.boundary_marker)
        .ok_or_else(|| {
            anyhow!(
                "No '{}' directory found in '{}' or its parents.",
                config.project_marker,
                start.display()
            )
        })?;
    log::debug!("Project root: '{}'", root.display());
    Ok(root)
}

/// Loads the config, discovers the root, and compiles the tree.
pub fn load_project() -> Result<Project> {
    let config = config::load_config()?;
    let root = discover_root(&config)?;
    let tree = tree_builder::build_with_marker(&root, &config.project_marker)?;
    Ok(Project { config, root, tree })
}
