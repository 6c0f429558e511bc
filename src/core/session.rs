//! # Session
//!
//! The state machine behind one interactive run. A session browses the
//! compiled tree, loads the parameter list of the chosen leaf, and resolves
//! each parameter either from a `-key=value` flag or by surfacing a prompt to
//! the UI layer. It never renders anything and never executes the leaf; once
//! it reaches [`State::Done`] the caller turns it into an execution plan.
//!
//! All transitions go through the methods on [`Session`], which keep the
//! cursor within `0..=parameters.len()` at all times.

use crate::{
    core::{
        arg_parser::CliArgs,
        classifier,
        parameters::{parameters_for, parse_select_options},
    },
    models::{CommandNode, CommandTree, NodeId, NodeKind, Parameter, ParameterKind, ParameterValue, SelectOption},
    system::executor::{self, ExecutionError},
};
use std::path::PathBuf;
use thiserror::Error;

/// Failures that move a session into [`State::Error`].
#[derive(Error, Debug)]
pub enum SessionError {
    /// A step matched no child of the current module.
    #[error("No command or module '{0}'.")]
    StepNotFound(String),
    /// A module without any commands was entered.
    #[error("No commands found in '{0}'.")]
    EmptyModule(PathBuf),
    /// A Select parameter has no helper executable next to its leaf.
    #[error("Invalid parameter: no '{name}' found in '{dir}'.")]
    SiblingNotFound {
        /// The parameter name, which is also the helper's file name.
        name: String,
        /// The directory that was searched.
        dir: PathBuf,
    },
    /// The helper executable produced no options.
    #[error("'{0}' yielded no options.")]
    EmptyEnumeration(String),
    /// Running a helper executable failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// An execution plan was requested before the session finished.
    #[error("The session has not finished resolving a command.")]
    NotDone,
    /// A parameter is still missing a value.
    #[error("Parameter '{0}' has no value.")]
    Unresolved(String),
}

/// A Select parameter waiting for the user to pick options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPrompt {
    /// Name of the parameter being resolved.
    pub parameter: String,
    /// Options enumerated by the helper executable, never empty.
    pub options: Vec<SelectOption>,
}

/// An Input parameter waiting for free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    /// Name of the parameter being resolved.
    pub parameter: String,
    /// Output of the helper executable, if one exists.
    pub default: Option<String>,
}

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Browsing the children of the current module.
    PathSelect,
    /// Resolving a Select parameter.
    ParamSelect(SelectPrompt),
    /// Resolving an Input parameter.
    ParamInput(InputPrompt),
    /// Every parameter of the current command is resolved.
    Done,
    /// Something failed; only backtrack, root and quit remain available.
    Error(String),
}

impl State {
    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PathSelect => "PathSelect",
            Self::ParamSelect(_) => "ParamSelect",
            Self::ParamInput(_) => "ParamInput",
            Self::Done => "Done",
            Self::Error(_) => "Error",
        }
    }
}

/// One interactive run over a compiled tree.
#[derive(Debug)]
pub struct Session<'t> {
    tree: &'t CommandTree,
    current: NodeId,
    parameters: Vec<Parameter>,
    cursor: usize,
    cli_args: CliArgs,
    state: State,
    /// Module to return to when backtracking out of an error.
    recovery: Option<NodeId>,
}

impl<'t> Session<'t> {
    /// Starts browsing at the root. Ends up in [`State::Error`] right away if
    /// the root has no children.
    pub fn new(tree: &'t CommandTree, cli_args: CliArgs) -> Self {
        let mut session = Self {
            tree,
            current: tree.root(),
            parameters: Vec::new(),
            cursor: 0,
            cli_args,
            state: State::PathSelect,
            recovery: None,
        };
        session.enter_module(tree.root());
        session
    }

    // --- ACCESSORS ---

    /// The current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The tree this session browses.
    pub fn tree(&self) -> &'t CommandTree {
        self.tree
    }

    /// The module being browsed, or the command being resolved.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Node data for [`Session::current`].
    pub fn current_node(&self) -> &'t CommandNode {
        &self.tree[self.current]
    }

    /// Parameters of the command being resolved (empty while browsing).
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Index of the parameter being resolved.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// `deploy / run`-style rendering of the current position.
    pub fn header(&self) -> String {
        self.tree.ancestry(self.current).join(" / ")
    }

    // --- PATH SELECTION ---

    /// Follows every step in order, stopping at the first error.
    pub fn apply_steps<S: AsRef<str>>(&mut self, steps: &[S]) {
        for step in steps {
            if matches!(self.state, State::Error(_)) {
                break;
            }
            self.select_step(step.as_ref());
        }
    }

    /// Selects a child of the current module by name prefix or shortcut.
    pub fn select_step(&mut self, step: &str) {
        if self.state != State::PathSelect {
            self.fail(SessionError::StepNotFound(step.to_string()));
            return;
        }
        match self.tree.find_child(self.current, step) {
            Some(child) => self.enter(child),
            None => self.fail(SessionError::StepNotFound(step.to_string())),
        }
    }

    /// Selects the `index`-th child of the current module (menu order).
    pub fn select_index(&mut self, index: usize) {
        if self.state != State::PathSelect {
            log::warn!("Ignoring path selection while in {}", self.state.label());
            return;
        }
        match self.tree.children(self.current).get(index).copied() {
            Some(child) => self.enter(child),
            None => log::warn!(
                "Ignoring selection {} of '{}': it has {} entries",
                index,
                self.tree[self.current].name,
                self.tree.children(self.current).len()
            ),
        }
    }

    fn enter(&mut self, child: NodeId) {
        match self.tree[child].kind {
            NodeKind::Module => self.enter_module(child),
            NodeKind::Command => self.enter_command(child),
        }
    }

    fn enter_module(&mut self, module: NodeId) {
        self.current = module;
        self.parameters.clear();
        self.cursor = 0;

        if self.tree.children(module).is_empty() {
            self.fail(SessionError::EmptyModule(self.tree[module].path.clone()));
        } else {
            self.transition(State::PathSelect);
        }
    }

    fn enter_command(&mut self, command: NodeId) {
        self.current = command;
        self.parameters = parameters_for(self.tree, command);
        self.cursor = 0;
        log::debug!(
            "Command '{}' requires {} parameter(s)",
            self.tree[command].name,
            self.parameters.len()
        );
        self.resolve_current();
    }

    // --- PARAMETER RESOLUTION ---

    /// Resolves parameters from the cursor onwards until one needs the user,
    /// or none are left.
    fn resolve_current(&mut self) {
        while let Some(param) = self.parameters.get(self.cursor) {
            let preset = self.preset_value(param).map(str::to_string);
            let Some(value) = preset else {
                self.prompt_current();
                return;
            };
            log::debug!("Parameter '{}' supplied on the command line", param.name);
            if let Some(param) = self.parameters.get_mut(self.cursor) {
                param.value = Some(ParameterValue::Single(value));
            }
            self.cursor += 1;
        }
        self.transition(State::Done);
    }

    /// A `-key=value` flag always wins over prompting. Keyed by shortcut, then name.
    fn preset_value(&self, param: &Parameter) -> Option<&str> {
        self.cli_args
            .get(&param.shortcut)
            .or_else(|| self.cli_args.get(&param.name))
    }

    /// Surfaces the prompt for the parameter under the cursor.
    fn prompt_current(&mut self) {
        let Some(param) = self.parameters.get(self.cursor) else {
            self.transition(State::Done);
            return;
        };
        let name = param.name.clone();
        let next = match param.kind {
            ParameterKind::Select => self.load_options(&name).map(|options| {
                State::ParamSelect(SelectPrompt {
                    parameter: name.clone(),
                    options,
                })
            }),
            ParameterKind::Input => self.load_default(&name).map(|default| {
                State::ParamInput(InputPrompt {
                    parameter: name.clone(),
                    default,
                })
            }),
        };
        match next {
            Ok(state) => self.transition(state),
            Err(e) => self.fail(e),
        }
    }

    fn leaf_dir(&self) -> PathBuf {
        let leaf = &self.tree[self.current].path;
        leaf.parent()
            .map_or_else(|| self.tree.root_path().to_path_buf(), |p| p.to_path_buf())
    }

    fn load_options(&self, name: &str) -> Result<Vec<SelectOption>, SessionError> {
        let leaf = &self.tree[self.current].path;
        let sibling =
            classifier::find_sibling(leaf, name).ok_or_else(|| SessionError::SiblingNotFound {
                name: name.to_string(),
                dir: self.leaf_dir(),
            })?;

        let output = executor::execute_and_capture_output(&sibling, &self.leaf_dir())?;
        let options = parse_select_options(&output);
        if options.is_empty() {
            return Err(SessionError::EmptyEnumeration(name.to_string()));
        }
        log::debug!("'{}' offered {} option(s)", name, options.len());
        Ok(options)
    }

    fn load_default(&self, name: &str) -> Result<Option<String>, SessionError> {
        let leaf = &self.tree[self.current].path;
        let Some(sibling) = classifier::find_sibling(leaf, name) else {
            return Ok(None);
        };
        let output = executor::execute_and_capture_output(&sibling, &self.leaf_dir())?;
        let default = output.trim();
        Ok((!default.is_empty()).then(|| default.to_string()))
    }

    /// Confirms the options at `indices` of the pending Select prompt.
    ///
    /// Values keep option order and are de-duplicated. An empty or entirely
    /// out-of-range selection leaves the prompt open.
    pub fn submit_selection(&mut self, indices: &[usize]) {
        let State::ParamSelect(prompt) = &self.state else {
            log::warn!("Ignoring a selection while in {}", self.state.label());
            return;
        };

        let mut values: Vec<String> = Vec::new();
        for (i, option) in prompt.options.iter().enumerate() {
            if indices.contains(&i) && !values.contains(&option.value) {
                values.push(option.value.clone());
            }
        }

        if values.is_empty() {
            log::debug!("Empty selection for '{}', prompt stays open", prompt.parameter);
            return;
        }
        self.advance(ParameterValue::Multi(values));
    }

    /// Confirms free text for the pending Input prompt.
    pub fn submit_input(&mut self, value: impl Into<String>) {
        if !matches!(self.state, State::ParamInput(_)) {
            log::warn!("Ignoring input while in {}", self.state.label());
            return;
        }
        self.advance(ParameterValue::Single(value.into()));
    }

    fn advance(&mut self, value: ParameterValue) {
        if let Some(param) = self.parameters.get_mut(self.cursor) {
            param.value = Some(value);
        }
        self.cursor += 1;
        self.resolve_current();
    }

    // --- NAVIGATION ---

    /// Steps back to the previous state.
    ///
    /// While resolving parameters this clears the current parameter and
    /// re-prompts the previous one, skipping parameters that came from flags.
    /// With nothing left to step back over, it returns to the module holding
    /// the command. `Done` is final, and at the root this is a no-op.
    pub fn backtrack(&mut self) {
        match self.state {
            State::Done => log::debug!("Backtrack ignored: session is done"),
            State::PathSelect => match self.tree.parent(self.current) {
                Some(parent) => self.enter_module(parent),
                None => log::debug!("Backtrack ignored: already at the root"),
            },
            State::ParamSelect(_) | State::ParamInput(_) => self.backtrack_parameter(),
            State::Error(_) => match self.recovery {
                Some(module) => self.enter_module(module),
                None => log::debug!("Backtrack ignored: nowhere to recover to"),
            },
        }
    }

    fn backtrack_parameter(&mut self) {
        if let Some(param) = self.parameters.get_mut(self.cursor) {
            param.value = None;
        }

        while self.cursor > 0 {
            self.cursor -= 1;
            let was_preset = self
                .parameters
                .get(self.cursor)
                .is_some_and(|p| self.preset_value(p).is_some());
            if let Some(param) = self.parameters.get_mut(self.cursor) {
                param.value = None;
            }
            if !was_preset {
                self.prompt_current();
                return;
            }
        }

        let module = self.tree.parent(self.current).unwrap_or(self.tree.root());
        self.enter_module(module);
    }

    /// Discards any progress and browses the root again.
    pub fn jump_to_root(&mut self) {
        self.enter_module(self.tree.root());
    }

    /// Abandons the session without executing anything.
    pub fn quit(self) {
        log::debug!("Session abandoned in {}", self.state.label());
    }

    // --- INTERNALS ---

    fn transition(&mut self, next: State) {
        log::debug!(
            "Session: {} -> {} at '{}'",
            self.state.label(),
            next.label(),
            self.tree[self.current].path.display()
        );
        self.state = next;
    }

    fn fail(&mut self, error: SessionError) {
        // Return to the module that was on screen when the failure happened.
        let node = &self.tree[self.current];
        self.recovery = if node.kind == NodeKind::Module && !node.children.is_empty() {
            Some(self.current)
        } else {
            node.parent
        };
        log::warn!("{}", error);
        self.transition(State::Error(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{test_support::fixture, tree_builder};

    fn args(pairs: &[(&str, &str)]) -> CliArgs {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_starts_at_root() {
        let (_dir, root) = fixture(&["run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let session = Session::new(&tree, CliArgs::default());
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current(), tree.root());
    }

    #[test]
    fn test_empty_root_is_an_error() {
        let (_dir, root) = fixture(&[]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        assert!(matches!(session.state(), State::Error(msg) if msg.contains("No commands found")));

        // Nowhere to go back to.
        session.backtrack();
        assert!(matches!(session.state(), State::Error(_)));
    }

    #[test]
    fn test_command_without_parameters_is_done() {
        let (_dir, root) = fixture(&["tools/lint.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.apply_steps(&["tools", "lint"]);
        assert_eq!(session.state(), &State::Done);
        assert_eq!(session.current_node().name, "lint");
    }

    #[test]
    fn test_unknown_step_and_recovery() {
        let (_dir, root) = fixture(&["deploy/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.apply_steps(&["deploy", "nope", "run"]);
        assert!(matches!(session.state(), State::Error(msg) if msg.contains("'nope'")));

        session.backtrack();
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current_node().name, "deploy");
    }

    #[test]
    fn test_empty_module_error_recovers_to_parent() {
        let (_dir, root) = fixture(&["empty/", "run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.select_step("empty");
        assert!(matches!(session.state(), State::Error(_)));

        session.backtrack();
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current(), tree.root());
    }

    #[test]
    fn test_cli_args_resolve_without_prompting() {
        // No helper executables exist, so any prompt would fail.
        let (_dir, root) = fixture(&["Deploy/{env}/[Tag]/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, args(&[("env", "prod"), ("t", "v1")]));
        session.apply_steps(&["deploy", "run"]);

        assert_eq!(session.state(), &State::Done);
        let values: Vec<_> = session
            .parameters()
            .iter()
            .map(|p| p.value.clone().unwrap().joined())
            .collect();
        assert_eq!(values, vec!["prod", "v1"]);
    }

    #[test]
    fn test_empty_flag_value_still_prompts() {
        let (_dir, root) = fixture(&["[env]/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, args(&[("env", "")]));
        session.select_step("run");
        assert!(matches!(session.state(), State::ParamInput(p) if p.parameter == "env"));
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let (_dir, root) = fixture(&["run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.select_index(5);
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current(), tree.root());
    }

    #[test]
    fn test_input_prompt_and_backtrack() {
        let (_dir, root) = fixture(&["build/[Target]/[mode]/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.apply_steps(&["b", "run"]);

        assert!(matches!(session.state(), State::ParamInput(p) if p.parameter == "target" && p.default.is_none()));
        session.submit_input("x86");
        assert_eq!(session.cursor(), 1);
        assert!(matches!(session.state(), State::ParamInput(p) if p.parameter == "mode"));

        // Backtrack undoes exactly the last advance.
        session.backtrack();
        assert_eq!(session.cursor(), 0);
        assert!(session.parameters().iter().all(|p| p.value.is_none()));
        assert!(matches!(session.state(), State::ParamInput(p) if p.parameter == "target"));

        // Cursor 0: back to the module that holds the command.
        session.backtrack();
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current_node().name, "build");
        assert!(session.parameters().is_empty());
    }

    #[test]
    fn test_backtrack_skips_preset_parameters() {
        let (_dir, root) = fixture(&["[first]/[second]/[third]/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, args(&[("second", "2")]));
        session.select_step("run");

        session.submit_input("1");
        // "second" came from a flag, so the session is already on "third".
        assert_eq!(session.cursor(), 2);

        session.backtrack();
        assert_eq!(session.cursor(), 0);
        assert!(matches!(session.state(), State::ParamInput(p) if p.parameter == "first"));
    }

    #[test]
    fn test_jump_to_root_discards_progress() {
        let (_dir, root) = fixture(&["a/[x]/[y]/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.apply_steps(&["a", "run"]);
        session.submit_input("1");

        session.jump_to_root();
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current(), tree.root());
        assert!(session.parameters().is_empty());
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_backtrack_at_root_is_noop() {
        let (_dir, root) = fixture(&["run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.backtrack();
        assert_eq!(session.state(), &State::PathSelect);
        assert_eq!(session.current(), tree.root());
    }

    #[test]
    fn test_select_without_helper_is_an_error() {
        let (_dir, root) = fixture(&["{region}/run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.select_step("run");
        assert!(matches!(session.state(), State::Error(msg) if msg.contains("no 'region' found")));
    }

    #[test]
    fn test_steps_after_a_command_fail() {
        let (_dir, root) = fixture(&["run.sh"]);
        let tree = tree_builder::build(&root).unwrap();
        let mut session = Session::new(&tree, CliArgs::default());
        session.apply_steps(&["run", "extra"]);
        assert!(matches!(session.state(), State::Error(_)));
    }

    #[cfg(unix)]
    mod helpers {
        use super::*;
        use crate::core::test_support::write_script;

        #[test]
        fn test_select_resolves_option_value() {
            let (_dir, root) = fixture(&["cloud/{region}/run.sh"]);
            write_script(
                &root.join("cloud/{region}/region"),
                "printf 'us:US East\\neu:EU West:eu-west-1\\n'",
            );
            let tree = tree_builder::build(&root).unwrap();
            let mut session = Session::new(&tree, CliArgs::default());
            session.apply_steps(&["cloud", "run"]);

            let State::ParamSelect(prompt) = session.state() else {
                panic!("expected a select prompt, got {:?}", session.state());
            };
            assert_eq!(prompt.options.len(), 2);

            session.submit_selection(&[1]);
            assert_eq!(session.state(), &State::Done);
            assert_eq!(
                session.parameters()[0].value,
                Some(ParameterValue::Multi(vec!["eu-west-1".to_string()]))
            );
        }

        #[test]
        fn test_multi_select_and_empty_selection() {
            let (_dir, root) = fixture(&["{Targets}/run.sh"]);
            write_script(&root.join("{Targets}/targets"), "echo a:A; echo b:B; echo c:C");
            let tree = tree_builder::build(&root).unwrap();
            let mut session = Session::new(&tree, CliArgs::default());
            session.select_step("run");

            session.submit_selection(&[]);
            assert!(matches!(session.state(), State::ParamSelect(_)));

            session.submit_selection(&[2, 0, 0, 9]);
            assert_eq!(
                session.parameters()[0].value,
                Some(ParameterValue::Multi(vec!["a".to_string(), "c".to_string()]))
            );
        }

        #[test]
        fn test_empty_enumeration_is_an_error() {
            let (_dir, root) = fixture(&["{region}/run.sh"]);
            write_script(&root.join("{region}/region"), "echo '   '");
            let tree = tree_builder::build(&root).unwrap();
            let mut session = Session::new(&tree, CliArgs::default());
            session.select_step("run");
            assert!(matches!(session.state(), State::Error(msg) if msg.contains("yielded no options")));

            session.backtrack();
            assert_eq!(session.state(), &State::PathSelect);
        }

        #[test]
        fn test_failing_helper_is_an_error() {
            let (_dir, root) = fixture(&["{region}/run.sh"]);
            write_script(&root.join("{region}/region"), "exit 1");
            let tree = tree_builder::build(&root).unwrap();
            let mut session = Session::new(&tree, CliArgs::default());
            session.select_step("run");
            assert!(matches!(session.state(), State::Error(_)));
        }

        #[test]
        fn test_input_default_from_helper() {
            let (_dir, root) = fixture(&["[name]/greet.sh"]);
            write_script(&root.join("[name]/name"), "echo '  world  '");
            let tree = tree_builder::build(&root).unwrap();
            let mut session = Session::new(&tree, CliArgs::default());
            session.select_step("greet");
            assert!(matches!(
                session.state(),
                State::ParamInput(p) if p.default.as_deref() == Some("world")
            ));
        }
    }
}
