// src/core/environment.rs

use crate::core::session::{Session, SessionError, State};
use crate::models::Parameter;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Everything needed to hand the process over to a resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Display name of the command, used as `argv[0]`.
    pub name: String,
    /// Absolute path of the leaf executable.
    pub path: PathBuf,
    /// The complete environment of the new process.
    pub env: BTreeMap<OsString, OsString>,
}

/// Builds the execution plan of a finished session.
///
/// The environment is `inherited`, plus `root_variable` pointing at the tree
/// root, plus one variable per parameter. Later entries win on key collisions,
/// so parameters override both. Inherited entries are passed through as raw
/// OS strings and need not be valid UTF-8.
pub fn execution_plan<I>(
    session: &Session<'_>,
    root_variable: &str,
    inherited: I,
) -> Result<ExecutionPlan, SessionError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    if *session.state() != State::Done {
        return Err(SessionError::NotDone);
    }

    let node = session.current_node();
    let env = build_environment(
        inherited,
        root_variable,
        session.tree().root_path(),
        session.parameters(),
    )?;

    Ok(ExecutionPlan {
        name: node.name.clone(),
        path: node.path.clone(),
        env,
    })
}

/// Assembles the environment map for a set of resolved parameters.
pub fn build_environment<I>(
    inherited: I,
    root_variable: &str,
    root: &Path,
    parameters: &[Parameter],
) -> Result<BTreeMap<OsString, OsString>, SessionError>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut env: BTreeMap<OsString, OsString> = inherited.into_iter().collect();
    env.insert(OsString::from(root_variable), root.as_os_str().to_os_string());

    for param in parameters {
        let value = param
            .value
            .as_ref()
            .ok_or_else(|| SessionError::Unresolved(param.name.clone()))?;
        log::debug!("Exporting {}", param.env_key());
        env.insert(OsString::from(param.env_key()), OsString::from(value.joined()));
    }
    Ok(env)
}
