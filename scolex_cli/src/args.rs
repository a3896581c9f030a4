//! Command-line argument parsing.
//!
//! The surface is small enough that a hand-written parser stays clearer than
//! a derive-based one:
//!
//! ```text
//! scolex [--verify-symbols] [demo]
//! scolex [--verify-symbols] render <word>...
//! scolex --version | --help
//! ```

use thiserror::Error;

/// Exit code for malformed command lines.
pub const EXIT_USAGE_ERROR: u8 = 2;

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Walk through the sample expressions.
    Demo,
    /// Build a list from the given words and print its rendering.
    Render(Vec<String>),
    /// Print the version and exit.
    PrintVersion,
    /// Print usage and exit.
    PrintHelp,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub mode: ExecutionMode,
    pub verify_symbols: bool,
}

/// Command-line errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'demo' takes no arguments, got '{0}'")]
    UnexpectedArgument(String),
}

/// Parse arguments, excluding the program name.
pub fn parse_args_vec(args: &[String]) -> Result<ParsedArgs, ArgsError> {
    let mut verify_symbols = false;
    let mut positional = Vec::new();

    for arg in args {
        match arg.as_str() {
            "-V" | "--version" => {
                return Ok(ParsedArgs {
                    mode: ExecutionMode::PrintVersion,
                    verify_symbols,
                });
            }
            "-h" | "--help" => {
                return Ok(ParsedArgs {
                    mode: ExecutionMode::PrintHelp,
                    verify_symbols,
                });
            }
            "--verify-symbols" => verify_symbols = true,
            opt if opt.starts_with("--") || (opt.starts_with('-') && positional.is_empty()) => {
                return Err(ArgsError::UnknownOption(opt.to_string()));
            }
            _ => positional.push(arg.clone()),
        }
    }

    let mode = match positional.split_first() {
        None => ExecutionMode::Demo,
        Some((cmd, rest)) if cmd == "demo" => match rest.first() {
            None => ExecutionMode::Demo,
            Some(extra) => return Err(ArgsError::UnexpectedArgument(extra.clone())),
        },
        Some((cmd, rest)) if cmd == "render" => ExecutionMode::Render(rest.to_vec()),
        Some((cmd, _)) => return Err(ArgsError::UnknownCommand(cmd.clone())),
    };

    Ok(ParsedArgs {
        mode,
        verify_symbols,
    })
}

/// Version banner.
pub fn version_string() -> String {
    format!("scolex {}", scolex_core::VERSION)
}

/// Usage text.
pub fn help_text() -> &'static str {
    "usage: scolex [--verify-symbols] [demo]\n\
     \x20      scolex [--verify-symbols] render <word>...\n\
     \x20      scolex --version | --help\n\
     \n\
     Words passed to 'render' become numbers, #t/#f booleans, \"quoted\"\n\
     strings, nil, or symbols.\n\
     \n\
     environment:\n\
     \x20 SCOLEX_LOG   tracing filter directive (default: warn)"
}
