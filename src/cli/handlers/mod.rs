// src/cli/handlers/mod.rs

// One module per action: the interactive run plus the `@` builtins.

pub mod commons;
pub mod list;
pub mod root;
pub mod run;
pub mod tree;
