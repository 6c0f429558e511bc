// src/core/parameters.rs

use crate::{
    core::{classifier, commons::name_and_shortcut},
    models::{CommandTree, NodeId, Parameter, ParameterKind, SelectOption},
};
use std::path::{Component, Path};

/// Derives the ordered parameter list of a node from its path.
///
/// Every segment between the project root (exclusive) and the node
/// (inclusive) that uses `[x]` or `{x}` syntax yields one parameter, so the
/// order is always outermost-first and depends on nothing but the path.
pub fn parameters_for(tree: &CommandTree, node: NodeId) -> Vec<Parameter> {
    parameters_for_path(tree.root_path(), &tree[node].path)
}

/// Path-level form of [`parameters_for`].
pub fn parameters_for_path(root: &Path, path: &Path) -> Vec<Parameter> {
    let relative = path.strip_prefix(root).unwrap_or(path);

    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .filter_map(|segment| {
            let kind = if classifier::is_input_segment(segment) {
                ParameterKind::Input
            } else if classifier::is_select_segment(segment) {
                ParameterKind::Select
            } else {
                return None;
            };
            let (name, shortcut) = name_and_shortcut(segment);
            Some(Parameter {
                name,
                shortcut,
                kind,
                value: None,
            })
        })
        .collect()
}

/// Parses the output of a Select sibling executable.
///
/// Each non-empty line is `label:description[:value]`. Only the first two
/// colons split fields, so values may contain colons. A line with a single
/// field has an empty description, and a missing value falls back to the label.
pub fn parse_select_options(output: &str) -> Vec<SelectOption> {
    output
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut fields = line.splitn(3, ':').map(str::trim);
            let label = fields.next().unwrap_or_default().to_string();
            let description = fields.next().unwrap_or_default().to_string();
            let value = fields
                .next()
                .filter(|v| !v.is_empty())
                .map_or_else(|| label.clone(), str::to_string);
            SelectOption {
                label,
                description,
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{test_support::fixture, tree_builder};

    fn names(params: &[Parameter]) -> Vec<(&str, ParameterKind)> {
        params.iter().map(|p| (p.name.as_str(), p.kind)).collect()
    }

    #[test]
    fn test_parameters_follow_path_order() {
        let root = Path::new("/repo/.clide");
        let path = root.join("deploy/{Env}/[Tag]/run.sh");
        let params = parameters_for_path(root, &path);

        assert_eq!(
            names(&params),
            vec![("env", ParameterKind::Select), ("tag", ParameterKind::Input)]
        );
        assert_eq!(params[0].shortcut, "e");
        assert!(params.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn test_segments_above_the_root_are_ignored() {
        let root = Path::new("/{weird}/.clide");
        let params = parameters_for_path(root, &root.join("run.sh"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_wrapping_adds_one_parameter_per_level() {
        let (_plain_dir, plain) = fixture(&["deploy/run.sh", "deploy/stop.sh"]);
        let (_wrapped_dir, wrapped) =
            fixture(&["deploy/{a}/[b]/run.sh", "deploy/{a}/[b]/stop.sh"]);

        let plain_tree = tree_builder::build(&plain).unwrap();
        let wrapped_tree = tree_builder::build(&wrapped).unwrap();

        let plain_deploy = plain_tree.find_child(plain_tree.root(), "deploy").unwrap();
        let wrapped_deploy = wrapped_tree.find_child(wrapped_tree.root(), "deploy").unwrap();

        let plain_children: Vec<_> = plain_tree
            .children(plain_deploy)
            .iter()
            .map(|c| plain_tree[*c].name.clone())
            .collect();
        let wrapped_children: Vec<_> = wrapped_tree
            .children(wrapped_deploy)
            .iter()
            .map(|c| wrapped_tree[*c].name.clone())
            .collect();
        assert_eq!(plain_children, wrapped_children);

        for (p, w) in plain_tree
            .children(plain_deploy)
            .iter()
            .zip(wrapped_tree.children(wrapped_deploy))
        {
            assert!(parameters_for(&plain_tree, *p).is_empty());
            let params = parameters_for(&wrapped_tree, *w);
            assert_eq!(
                names(&params),
                vec![("a", ParameterKind::Select), ("b", ParameterKind::Input)]
            );
            // Deterministic across calls.
            assert_eq!(params, parameters_for(&wrapped_tree, *w));
        }
    }

    #[test]
    fn test_parse_select_options() {
        let options = parse_select_options("us:US East\neu:EU West:eu-west-1\n");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "us");
        assert_eq!(options[0].description, "US East");
        assert_eq!(options[1].label, "eu");
        assert_eq!(options[1].value, "eu-west-1");
    }

    #[test]
    fn test_parse_select_options_edge_cases() {
        let options = parse_select_options("\n  solo  \n\nurl:Endpoint:https://x.io:443\n");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "solo");
        assert_eq!(options[0].description, "");
        assert_eq!(options[0].value, "solo");
        assert_eq!(options[1].value, "https://x.io:443");

        assert!(parse_select_options("  \n \n").is_empty());
    }
}
