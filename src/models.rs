// src/models.rs

use crate::constants::MULTI_VALUE_SEPARATOR;
use serde::Serialize;
use std::ops::Index;
use std::path::{Path, PathBuf};

// --- COMMAND TREE ---

/// Stable handle to a node inside a [`CommandTree`].
///
/// Ids are only minted by the tree itself, so an id obtained from a tree is
/// always valid for that tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Whether a node can be browsed into or executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// A directory holding other nodes.
    Module,
    /// An executable leaf.
    Command,
}

/// A module or leaf command compiled from one filesystem entry.
#[derive(Debug, Clone)]
pub struct CommandNode {
    /// Display name: the entry name without brackets or extension, lower-cased.
    pub name: String,
    /// Every uppercase character of the entry name, lower-cased. May be empty.
    pub shortcut: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Module or command.
    pub kind: NodeKind,
    /// Non-owning back-reference; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Ordered children. Always empty for commands.
    pub children: Vec<NodeId>,
}

impl CommandNode {
    /// Returns `true` for leaf commands.
    pub fn is_command(&self) -> bool {
        self.kind == NodeKind::Command
    }

    /// The `[module] name (s)` label used in menus.
    pub fn title(&self) -> String {
        let kind = match self.kind {
            NodeKind::Module => "module",
            NodeKind::Command => "command",
        };
        if self.shortcut.is_empty() {
            format!("[{}] {}", kind, self.name)
        } else {
            format!("[{}] {} ({})", kind, self.name, self.shortcut)
        }
    }
}

/// The compiled, read-only command tree. Nodes live in an arena and refer to
/// each other through [`NodeId`]s.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
    root: NodeId,
}

impl CommandTree {
    /// Starts an empty arena. Only the tree builder creates trees.
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId(0),
        }
    }

    /// Appends a node and returns its id.
    pub(crate) fn push(&mut self, node: CommandNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Replaces the children list of a module during construction.
    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.children = children;
        }
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = id;
    }

    /// The root module (the project marker directory).
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Path of the project marker directory.
    pub fn root_path(&self) -> &Path {
        &self[self.root].path
    }

    /// Number of nodes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root once built.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id`, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self[id].children
    }

    /// Parent of `id`, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Names from the root (excluded) down to `id` (included).
    pub fn ancestry(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self[current];
            if node.parent.is_none() {
                break;
            }
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        names.reverse();
        names
    }

    /// Every command reachable from `id`, depth-first in child order.
    pub fn leaves(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_leaves(id, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, id: NodeId, leaves: &mut Vec<NodeId>) {
        let node = &self[id];
        if node.is_command() {
            leaves.push(id);
            return;
        }
        for child in &node.children {
            self.collect_leaves(*child, leaves);
        }
    }

    /// Finds the child of `id` selected by a CLI step.
    ///
    /// Precedence: exact name, exact shortcut, then the first name that starts
    /// with `step`. Matching is case-insensitive.
    pub fn find_child(&self, id: NodeId, step: &str) -> Option<NodeId> {
        let step = step.to_lowercase();
        let children = self.children(id);
        children
            .iter()
            .find(|c| self[**c].name == step)
            .or_else(|| {
                children
                    .iter()
                    .find(|c| !self[**c].shortcut.is_empty() && self[**c].shortcut == step)
            })
            .or_else(|| children.iter().find(|c| self[**c].name.starts_with(&step)))
            .copied()
    }
}

impl Index<NodeId> for CommandTree {
    type Output = CommandNode;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, id: NodeId) -> &Self::Output {
        // Ids are only handed out by `push`, and nodes are never removed.
        &self.nodes[id.0]
    }
}

// --- PARAMETERS ---

/// How a parameter obtains its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterKind {
    /// Free text typed by the user (`[name]`).
    Input,
    /// One or more options enumerated by a sibling executable (`{name}`).
    Select,
}

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Input values and CLI-supplied values.
    Single(String),
    /// Select results, in option order without duplicates.
    Multi(Vec<String>),
}

impl ParameterValue {
    /// Flattens the value into one environment string.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::Multi(values) => values.join(MULTI_VALUE_SEPARATOR),
        }
    }
}

/// A value that must be resolved before a leaf executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Segment text without brackets, lower-cased.
    pub name: String,
    /// Uppercase letters of the segment, lower-cased.
    pub shortcut: String,
    /// Input or Select.
    pub kind: ParameterKind,
    /// Empty until resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ParameterValue>,
}

impl Parameter {
    /// Name of the environment variable this parameter is exported as.
    pub fn env_key(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

/// One record produced by a Select sibling executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Shown in the list.
    pub label: String,
    /// Shown next to the label; empty when the record has a single field.
    pub description: String,
    /// The resolved value; defaults to the label.
    pub value: String,
}
