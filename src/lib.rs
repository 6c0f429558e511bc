//! # clide
//!
//! Turns a project's `.clide` directory into a navigable command tree.
//! Directories are modules, files with an extension are commands, and
//! `[name]` / `{name}` directories declare parameters that are asked for (or
//! passed as `-name=value`) before the command is executed with them in its
//! environment.

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
