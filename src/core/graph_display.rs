// src/core/graph_display.rs

use crate::{
    core::parameters::parameters_for,
    models::{CommandTree, NodeId, ParameterKind},
};
use std::fmt::Write;

/// What `@tree` shows besides names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    /// Append the absolute path of every node.
    pub show_paths: bool,
    /// Append the parameters each command requires.
    pub show_params: bool,
    /// Stop descending below this depth (the root's children are depth 1).
    pub max_depth: Option<usize>,
}

/// Renders an ASCII tree of modules and commands.
pub fn render_tree(tree: &CommandTree, options: DisplayOptions) -> String {
    let mut out = String::new();
    let root = &tree[tree.root()];
    let _ = writeln!(out, "{}", root.path.display());

    let children = tree.children(tree.root());
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        render_node(tree, *child, options, "", is_last, 1, &mut out);
    }
    out
}

/// Recursive function to render a node and its descendants.
fn render_node(
    tree: &CommandTree,
    id: NodeId,
    options: DisplayOptions,
    prefix: &str,
    is_last: bool,
    depth: usize,
    out: &mut String,
) {
    let node = &tree[id];
    let connector = if is_last { "└─" } else { "├─" };

    let mut line = format!("{}{}{}", prefix, connector, node.title());
    if options.show_params && node.is_command() {
        let params: Vec<String> = parameters_for(tree, id)
            .iter()
            .map(|p| match p.kind {
                ParameterKind::Input => format!("[{}]", p.name),
                ParameterKind::Select => format!("{{{}}}", p.name),
            })
            .collect();
        if !params.is_empty() {
            let _ = write!(line, " {}", params.join(" "));
        }
    }
    if options.show_paths {
        let _ = write!(line, " [{}]", node.path.display());
    }
    let _ = writeln!(out, "{}", line);

    if options.max_depth.is_some_and(|max| depth >= max) {
        return;
    }

    // Prepare the prefix for the children of this node
    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    let children = tree.children(id);
    for (i, child) in children.iter().enumerate() {
        let is_last_child = i + 1 == children.len();
        render_node(tree, *child, options, &child_prefix, is_last_child, depth + 1, out);
    }
}
