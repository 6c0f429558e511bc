//! # Tree Builder
//!
//! Compiles a project marker directory into a [`CommandTree`]. Every
//! subdirectory becomes a module and every file with an extension becomes a
//! command. Parameter directories (`[x]`, `{x}`) are transparent: their
//! entries are spliced into the nearest enclosing module, so the parameters
//! only show up later, when a leaf's path is inspected.
//!
//! Construction is all-or-nothing. Any I/O failure or illegal shape aborts the
//! build; there is no partial tree.

use crate::{
    constants::{HIDDEN_PREFIX, PROJECT_MARKER},
    core::{classifier, commons::name_and_shortcut},
    models::{CommandNode, CommandTree, NodeId, NodeKind},
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that abort tree construction.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A file uses parameter syntax for its own name.
    #[error("Invalid shape at '{path}': a leaf cannot require a parameter at its own segment.")]
    InvalidShape {
        /// The offending file.
        path: PathBuf,
    },
    /// Two siblings derive the same display name.
    #[error("Duplicate name '{name}' in module '{module}'.")]
    DuplicateName {
        /// The colliding name.
        name: String,
        /// The module holding both entries.
        module: PathBuf,
    },
    /// The tree root is not a directory.
    #[error("'{0}' is not a directory and cannot be used as a command tree root.")]
    NotAModule(PathBuf),
    /// Reading a directory failed.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The directory being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

type TreeResult<T> = Result<T, TreeError>;

/// Builds the command tree rooted at `root` (normally the `.clide` directory).
pub fn build(root: &Path) -> TreeResult<CommandTree> {
    build_with_marker(root, PROJECT_MARKER)
}

/// Same as [`build`], for a project marker with a custom name.
pub fn build_with_marker(root: &Path, marker: &str) -> TreeResult<CommandTree> {
    log::debug!("Building command tree from '{}'", root.display());

    if !root.is_dir() {
        return Err(TreeError::NotAModule(root.to_path_buf()));
    }

    let mut builder = TreeBuilder {
        tree: CommandTree::empty(),
        marker,
    };
    let root_id = builder.push_module(None, root)?;
    builder.tree.set_root(root_id);

    log::info!(
        "Compiled {} node(s) from '{}'",
        builder.tree.len(),
        root.display()
    );
    Ok(builder.tree)
}

struct TreeBuilder<'a> {
    tree: CommandTree,
    marker: &'a str,
}

impl TreeBuilder<'_> {
    /// Compiles one directory entry. The result holds zero nodes (hidden or
    /// filtered entries), one node (a module or command), or many nodes (the
    /// spliced contents of a parameter directory).
    fn build_entry(&mut self, parent: NodeId, path: &Path) -> TreeResult<Vec<NodeId>> {
        let entry_name = entry_name(path);

        if entry_name.starts_with(HIDDEN_PREFIX) && entry_name != self.marker {
            log::debug!("Skipping hidden entry '{}'", path.display());
            return Ok(Vec::new());
        }

        if classifier::is_parameter_segment(&entry_name) {
            if classifier::is_leaf(path) {
                return Err(TreeError::InvalidShape {
                    path: path.to_path_buf(),
                });
            }
            log::debug!("Splicing parameter directory '{}'", path.display());
            return self.build_children(parent, path);
        }

        if classifier::is_module(path) {
            return Ok(vec![self.push_module(Some(parent), path)?]);
        }

        // Extensionless files are helpers (e.g. Select enumerators), not commands.
        if !entry_name.contains('.') {
            log::debug!("Skipping extensionless file '{}'", path.display());
            return Ok(Vec::new());
        }
        let (name, shortcut) = name_and_shortcut(&entry_name);
        let id = self.tree.push(CommandNode {
            name,
            shortcut,
            path: path.to_path_buf(),
            kind: NodeKind::Command,
            parent: Some(parent),
            children: Vec::new(),
        });
        Ok(vec![id])
    }

    fn push_module(&mut self, parent: Option<NodeId>, path: &Path) -> TreeResult<NodeId> {
        let (name, shortcut) = name_and_shortcut(&entry_name(path));
        let id = self.tree.push(CommandNode {
            name,
            shortcut,
            path: path.to_path_buf(),
            kind: NodeKind::Module,
            parent,
            children: Vec::new(),
        });

        let children = self.build_children(id, path)?;
        self.check_unique_names(path, &children)?;
        self.tree.set_children(id, children);
        Ok(id)
    }

    /// Builds every entry of `dir` on behalf of module `owner`.
    fn build_children(&mut self, owner: NodeId, dir: &Path) -> TreeResult<Vec<NodeId>> {
        let mut children = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| TreeError::Io {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;
            children.extend(self.build_entry(owner, entry.path())?);
        }
        Ok(children)
    }

    fn check_unique_names(&self, module: &Path, children: &[NodeId]) -> TreeResult<()> {
        let mut seen = HashSet::with_capacity(children.len());
        for child in children {
            let name = &self.tree[*child].name;
            if !seen.insert(name.as_str()) {
                return Err(TreeError::DuplicateName {
                    name: name.clone(),
                    module: module.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
