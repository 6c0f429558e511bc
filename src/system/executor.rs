// src/system/executor.rs

use crate::core::environment::ExecutionPlan;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Failures while running helper executables or the final command.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The program does not exist.
    #[error("Executable '{0}' was not found.")]
    NotFound(String),
    /// Spawning or waiting failed.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    /// The program ran but reported failure.
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
    /// Standard output was not UTF-8.
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        /// The program that produced the output.
        command: String,
        /// The decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// Replacing the process image failed.
    #[error("Could not hand control to '{0}': {1}")]
    ExecFailed(String, std::io::Error),
}

/// Runs `program` with no arguments and captures its standard output.
/// Stderr is passed through to the user's terminal.
///
/// NOTE: This call blocks until the program exits; there is no timeout. It is
/// meant for the short helper executables that enumerate options or defaults.
pub fn execute_and_capture_output(program: &Path, cwd: &Path) -> Result<String, ExecutionError> {
    let display = program.display().to_string();
    let clean_cwd = dunce::simplified(cwd);
    log::debug!("Capturing output of '{}' in '{}'", display, clean_cwd.display());

    let command_output = StdCommand::new(program)
        .current_dir(clean_cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ExecutionError::NotFound(display.clone())
            } else {
                ExecutionError::CommandFailed(display.clone(), e)
            }
        })?;

    if !command_output.status.success() {
        return Err(ExecutionError::NonZeroExitStatus(display));
    }

    String::from_utf8(command_output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: display,
        source: e,
    })
}

/// Hands the process over to the resolved command.
///
/// On Unix the current process image is replaced, so this only returns on
/// failure. Elsewhere the command is spawned and its exit code is returned for
/// the caller to propagate.
pub fn execute_plan(plan: &ExecutionPlan) -> Result<i32, ExecutionError> {
    let display = plan.path.display().to_string();
    log::info!(
        "Executing '{}' with {} environment variable(s)",
        display,
        plan.env.len()
    );

    let mut command = StdCommand::new(&plan.path);
    command.env_clear().envs(&plan.env);
    hand_off(command, &plan.name, display)
}

#[cfg(unix)]
fn hand_off(mut command: StdCommand, arg0: &str, display: String) -> Result<i32, ExecutionError> {
    use std::os::unix::process::CommandExt;
    // `exec` only returns if the image could not be replaced.
    let e = command.arg0(arg0).exec();
    Err(ExecutionError::ExecFailed(display, e))
}

#[cfg(not(unix))]
fn hand_off(mut command: StdCommand, _arg0: &str, display: String) -> Result<i32, ExecutionError> {
    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| ExecutionError::CommandFailed(display, e))?;
    Ok(status.code().unwrap_or(1))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::test_support::write_script;
    use tempfile::TempDir;

    #[test]
    fn test_capture_output() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("region");
        write_script(&script, "echo 'us:US East'");

        let output = execute_and_capture_output(&script, dir.path()).unwrap();
        assert_eq!(output.trim(), "us:US East");
    }

    #[test]
    fn test_capture_output_non_zero_exit() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("broken");
        write_script(&script, "exit 3");

        let result = execute_and_capture_output(&script, dir.path());
        assert!(matches!(result, Err(ExecutionError::NonZeroExitStatus(_))));
    }

    #[test]
    fn test_capture_output_missing_program() {
        let dir = TempDir::new().unwrap();
        let result = execute_and_capture_output(&dir.path().join("nope"), dir.path());
        assert!(matches!(result, Err(ExecutionError::NotFound(_))));
    }
}
