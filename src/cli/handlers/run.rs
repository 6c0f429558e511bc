use crate::{
    cli::{
        handlers::commons,
        prompt::{self, Outcome},
    },
    core::{arg_parser::CliArgs, environment, session::{Session, State}},
    system::executor,
};
use anyhow::{Result, anyhow};
use std::env;

///
/// Entry point for every non-builtin invocation: `clide [steps...] [-key=value...]`.
///
/// The steps are replayed against a fresh session. Whatever is still missing is
/// asked for interactively; without a terminal the run fails instead.
///
pub fn handle(steps: Vec<String>, cli_args: CliArgs) -> Result<()> {
    let project = commons::load_project()?;
    let mut session = Session::new(&project.tree, cli_args);
    session.apply_steps(&steps);

    if *session.state() != State::Done {
        if !prompt::is_interactive() {
            return Err(anyhow!(prompt::describe_pending(&session)));
        }
        if prompt::drive(&mut session)? == Outcome::Quit {
            session.quit();
            return Ok(());
        }
    }

    let plan = environment::execution_plan(&session, &project.config.root_variable, env::vars_os())?;
    let code = executor::execute_plan(&plan)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
