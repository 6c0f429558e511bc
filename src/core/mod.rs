// src/core/mod.rs

pub mod arg_parser;
pub mod classifier;
pub mod commons;
pub mod config;
pub mod environment;
pub mod graph_display;
pub mod parameters;
pub mod session;
pub mod tree_builder;

#[cfg(test)]
pub(crate) mod test_support;
