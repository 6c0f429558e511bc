//! # Interactive Prompts
//!
//! Renders each [`State`] of a [`Session`] as a `dialoguer` prompt and feeds
//! the answer back as a transition. The session decides what happens next;
//! this module only translates keys into calls.
//!
//! - `PathSelect`: a list of children plus a `/ root` entry below the root.
//!   Esc goes back, or quits at the root.
//! - `ParamSelect`: a multi-select. Esc goes back.
//! - `ParamInput`: a text prompt. `:back`, `:root` and `:quit` navigate.
//! - `Error`: the message in red, then a back/root/quit menu.

use crate::core::session::{InputPrompt, SelectPrompt, Session, State};
use colored::Colorize;
use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};
use std::io::{self, IsTerminal};
use thiserror::Error;

const ROOT_ENTRY: &str = "/ root";
const BACK_COMMAND: &str = ":back";
const ROOT_COMMAND: &str = ":root";
const QUIT_COMMAND: &str = ":quit";

#[derive(Error, Debug)]
pub enum PromptError {
    /// Ctrl+C while a prompt was open.
    #[error("Interrupted.")]
    Interrupted,
    #[error("Terminal prompt failed: {0}")]
    Terminal(#[source] dialoguer::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(e: dialoguer::Error) -> Self {
        match e {
            dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::Interrupted => {
                PromptError::Interrupted
            }
            other => PromptError::Terminal(other),
        }
    }
}

/// How an interactive run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The session reached `Done`.
    Execute,
    /// The user walked away.
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Whether prompts can be shown at all.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Prompts until the session is done or the user quits.
pub fn drive(session: &mut Session<'_>) -> Result<Outcome, PromptError> {
    let theme = ColorfulTheme::default();
    loop {
        let flow = match session.state().clone() {
            State::Done => return Ok(Outcome::Execute),
            State::PathSelect => path_select(session, &theme)?,
            State::ParamSelect(prompt) => param_select(session, &prompt, &theme)?,
            State::ParamInput(prompt) => param_input(session, &prompt, &theme)?,
            State::Error(message) => error_menu(session, &message, &theme)?,
        };
        if let Flow::Quit = flow {
            return Ok(Outcome::Quit);
        }
    }
}

fn header(session: &Session<'_>) -> String {
    let path = session.header();
    if path.is_empty() {
        "clide".to_string()
    } else {
        format!("clide / {}", path)
    }
}

fn path_select(session: &mut Session<'_>, theme: &ColorfulTheme) -> Result<Flow, PromptError> {
    let tree = session.tree();
    let children = tree.children(session.current());
    let at_root = session.current() == tree.root();

    let mut items: Vec<String> = children.iter().map(|c| tree[*c].title()).collect();
    if !at_root {
        items.push(ROOT_ENTRY.to_string());
    }

    let selection = Select::with_theme(theme)
        .with_prompt(header(session))
        .items(&items)
        .default(0)
        .interact_opt()?;

    match selection {
        None if at_root => return Ok(Flow::Quit),
        None => session.backtrack(),
        Some(index) if index < children.len() => session.select_index(index),
        Some(_) => session.jump_to_root(),
    }
    Ok(Flow::Continue)
}

fn param_select(
    session: &mut Session<'_>,
    prompt: &SelectPrompt,
    theme: &ColorfulTheme,
) -> Result<Flow, PromptError> {
    let items: Vec<String> = prompt
        .options
        .iter()
        .map(|option| {
            if option.description.is_empty() {
                option.label.clone()
            } else {
                format!("{}  {}", option.label, option.description.dimmed())
            }
        })
        .collect();

    let selection = MultiSelect::with_theme(theme)
        .with_prompt(format!("{} > {}", header(session), prompt.parameter))
        .items(&items)
        .interact_opt()?;

    match selection {
        None => session.backtrack(),
        Some(indices) if indices.is_empty() => {
            eprintln!("{}", "Select at least one option (space toggles).".yellow());
        }
        Some(indices) => session.submit_selection(&indices),
    }
    Ok(Flow::Continue)
}

fn param_input(
    session: &mut Session<'_>,
    prompt: &InputPrompt,
    theme: &ColorfulTheme,
) -> Result<Flow, PromptError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(format!("{} > {}", header(session), prompt.parameter))
        .allow_empty(true);
    if let Some(default) = &prompt.default {
        input = input.default(default.clone());
    }
    let text = input.interact_text()?;

    match text.trim() {
        BACK_COMMAND => session.backtrack(),
        ROOT_COMMAND => session.jump_to_root(),
        QUIT_COMMAND => return Ok(Flow::Quit),
        _ => session.submit_input(text.clone()),
    }
    Ok(Flow::Continue)
}

fn error_menu(
    session: &mut Session<'_>,
    message: &str,
    theme: &ColorfulTheme,
) -> Result<Flow, PromptError> {
    eprintln!("{}", message.red());

    let selection = Select::with_theme(theme)
        .with_prompt("What now?")
        .items(&["Back", "Root", "Quit"])
        .default(0)
        .interact_opt()?;

    match selection {
        Some(0) => session.backtrack(),
        Some(1) => session.jump_to_root(),
        _ => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Explains why a session that is not done cannot continue without a terminal.
pub fn describe_pending(session: &Session<'_>) -> String {
    match session.state() {
        State::Error(message) => message.clone(),
        State::ParamSelect(SelectPrompt { parameter, .. })
        | State::ParamInput(InputPrompt { parameter, .. }) => format!(
            "Parameter '{}' needs a value; pass it as -{}=<value>.",
            parameter, parameter
        ),
        State::PathSelect => {
            let tree = session.tree();
            let names: Vec<&str> = tree
                .children(session.current())
                .iter()
                .map(|c| tree[*c].name.as_str())
                .collect();
            let location = session.header();
            let location = if location.is_empty() { "the root" } else { location.as_str() };
            format!("A command is required under {}: {}.", location, names.join(", "))
        }
        State::Done => String::new(),
    }
}
