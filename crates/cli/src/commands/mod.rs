//! CLI subcommands.
//!
//! Each command drives a [`Storefront`](larq_storefront::state::Storefront)
//! and returns the text to print, so the commands can be tested without
//! capturing stdout.

pub mod account;
pub mod catalog;
pub mod checkout;

use std::process::ExitCode;

use thiserror::Error;

use larq_storefront::config::ConfigError;
use larq_storefront::error::StorefrontError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    /// An `--item` argument did not parse.
    #[error("Invalid item '{0}': expected id[:colour[:size]]")]
    InvalidItem(String),
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        Self::Storefront(err.into())
    }
}

impl CommandError {
    /// The message shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storefront(err) => err.user_message(),
            Self::InvalidItem(_) => self.to_string(),
        }
    }
}

/// Print the outcome of a command and turn it into the process exit code.
pub fn finish(result: Result<String, CommandError>) -> ExitCode {
    match result {
        Ok(output) => {
            emit(&output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            emit_error(&e.user_message());
            ExitCode::FAILURE
        }
    }
}

/// Print command output.
#[allow(clippy::print_stdout)]
pub fn emit(output: &str) {
    println!("{output}");
}

/// Print a message for the shopper on stderr.
#[allow(clippy::print_stderr)]
pub fn emit_error(message: &str) {
    eprintln!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_exit_codes() {
        assert_eq!(finish(Ok("Déconnecté".to_string())), ExitCode::SUCCESS);
        assert_eq!(
            finish(Err(CommandError::InvalidItem(":Black".to_string()))),
            ExitCode::FAILURE
        );
        assert_eq!(
            finish(Err(StorefrontError::NotFound("bottle-unknown".to_string()).into())),
            ExitCode::FAILURE
        );
    }
}
