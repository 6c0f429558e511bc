use clap::Parser;

pub mod dispatcher;
pub mod handlers;
pub mod prompt;

const HELP_TEMPLATE: &str = "\
<title>{name}</title> {version}
{about}

<title>USAGE:</title>
  <cmd>clide</cmd>                           Browse the command tree interactively
  <cmd>clide</cmd> <hl><step>...</hl> [-key=value...]  Select a command by name, prefix or shortcut
  <cmd>clide</cmd> <hl>@<builtin></hl> [args...]        Run a builtin

<title>BUILTINS:</title>
  <cmd>@list</cmd>, <cmd>@ls</cmd> [--json]                Every command with its path and steps
  <cmd>@tree</cmd> [--paths] [--params] [-d N]  The command tree
  <cmd>@root</cmd>                            The project's command directory

<title>PROMPTS:</title>
  <dim>Esc goes back one level. In text prompts type :back, :root or :quit.</dim>

<title>OPTIONS:</title>
{options}
";

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    // Define styles. If colors are disabled, they are empty strings.
    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = HELP_TEMPLATE
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// clide: turns a directory hierarchy into an interactive command tree.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = build_help_string(),
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Steps, `-key=value` flags, or an `@builtin` with its arguments.
    /// Hidden from the help output; the template documents the grammar.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub args: Vec<String>,
}
