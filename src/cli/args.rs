//! Command-line argument parsing.
//!
//! Flags may appear anywhere; every other word is part of the prompt.
//! `--` ends flag parsing so a prompt may itself start with dashes.

use thiserror::Error;

use crate::models::DEFAULT_CONFIDENCE_TARGET;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Probe the backend's health endpoint
    Health { url: Option<String> },
    /// Submit a debate (default)
    Run(RunArgs),
}

/// Arguments of a debate submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub prompt: String,
    pub confidence: u8,
    pub rounds: Option<u8>,
    /// Overrides the configured base URL
    pub url: Option<String>,
}

/// Reasons the command line could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}: expected a whole number")]
    InvalidNumber { flag: String, value: String },

    #[error("unknown option '{0}' (see --help)")]
    UnknownFlag(String),

    #[error("no prompt given (see --help)")]
    MissingPrompt,
}

/// Parse command-line arguments and return the command to run.
///
/// The first item is the program name and is skipped.
///
/// # Examples
///
/// ```
/// use debate_feed::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["debate-feed".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut words: Vec<String> = Vec::new();
    let mut confidence = DEFAULT_CONFIDENCE_TARGET;
    let mut rounds = None;
    let mut url = None;
    let mut health = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--health" => health = true,
            "--confidence" => confidence = number(&arg, args.next())?,
            "--rounds" => rounds = Some(number(&arg, args.next())?),
            "--url" => url = Some(value(&arg, args.next())?),
            "--" => {
                words.extend(args.by_ref());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgError::UnknownFlag(flag.to_string()))
            }
            _ => words.push(arg),
        }
    }

    if health {
        return Ok(CliCommand::Health { url });
    }

    let prompt = words.join(" ");
    if prompt.trim().is_empty() {
        return Err(ArgError::MissingPrompt);
    }

    Ok(CliCommand::Run(RunArgs {
        prompt,
        confidence,
        rounds,
        url,
    }))
}

fn value(flag: &str, next: Option<String>) -> Result<String, ArgError> {
    next.ok_or_else(|| ArgError::MissingValue(flag.to_string()))
}

fn number(flag: &str, next: Option<String>) -> Result<u8, ArgError> {
    let raw = value(flag, next)?;
    raw.parse().map_err(|_| ArgError::InvalidNumber {
        flag: flag.to_string(),
        value: raw,
    })
}
