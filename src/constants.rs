// src/constants.rs

/// The name of the directory that marks (and is) the root of a command tree.
pub const PROJECT_MARKER: &str = ".clide";

/// The version-control directory that bounds the upward search for a project marker.
pub const BOUNDARY_MARKER: &str = ".git";

/// The environment variable that receives the path of the project root.
pub const ROOT_VARIABLE: &str = "CLIDE_PATH";

/// The name of the configuration file (inside `~/.config/clide/`).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable that points at an alternative configuration file.
pub const CONFIG_ENV_VAR: &str = "CLIDE_CONFIG";

/// Environment variable holding the `env_logger` filter.
pub const LOG_ENV_VAR: &str = "CLIDE_LOG";

/// Entries whose name starts with this are hidden from the tree.
pub const HIDDEN_PREFIX: char = '.';

/// Opens a free-text (Input) parameter segment.
pub const INPUT_PREFIX: char = '[';
/// Closes a free-text (Input) parameter segment.
pub const INPUT_SUFFIX: char = ']';

/// Opens an enumerated (Select) parameter segment.
pub const SELECT_PREFIX: char = '{';
/// Closes an enumerated (Select) parameter segment.
pub const SELECT_SUFFIX: char = '}';

/// Every bracket character that is stripped when deriving a display name.
pub const PARAM_BRACKET_CHARS: &[char] = &[INPUT_PREFIX, INPUT_SUFFIX, SELECT_PREFIX, SELECT_SUFFIX];

/// Separator used to join multi-valued Select results into one variable.
pub const MULTI_VALUE_SEPARATOR: &str = "\n";

/// Prefix of a builtin invocation (`clide @list`).
pub const BUILTIN_PREFIX: char = '@';
