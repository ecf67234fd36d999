//! Command-line argument parsing for the chatwire CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Usage text printed for `--help` and argument errors.
pub const USAGE: &str = "\
Usage: chatwire [OPTIONS] <PROMPT>...

Stream an assistant reply for PROMPT to stdout.

Options:
  --url <URL>    Backend base URL (default: $CHATWIRE_URL or http://127.0.0.1:8000)
  -d, --debug    Log decoder diagnostics to stderr
  -V, --version  Print version
  -h, --help     Print this help";

/// Arguments for a streamed prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct AskArgs {
    /// Base URL override
    pub url: Option<String>,
    /// Enable debug logging
    pub debug: bool,
    /// Prompt words joined with single spaces
    pub prompt: String,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send a prompt and stream the reply
    Ask(AskArgs),
    /// The arguments could not be understood
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use chatwire::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatwire".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    let mut debug = false;
    let mut words: Vec<String> = Vec::new();
    let mut only_words = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        if only_words {
            words.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--debug" | "-d" => debug = true,
            "--url" => match args.next() {
                Some(value) => url = Some(value),
                None => return CliCommand::Invalid("--url requires a value".to_string()),
            },
            "--" => only_words = true,
            _ => {
                if let Some(value) = arg.strip_prefix("--url=") {
                    url = Some(value.to_string());
                } else if arg.starts_with('-') && arg.len() > 1 {
                    return CliCommand::Invalid(format!("unknown option: {}", arg));
                } else {
                    words.push(arg);
                }
            }
        }
    }

    let prompt = words.join(" ");
    if prompt.trim().is_empty() {
        return CliCommand::Invalid("missing prompt".to_string());
    }

    CliCommand::Ask(AskArgs { url, debug, prompt })
}
