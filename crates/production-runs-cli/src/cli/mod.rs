//! CLI module for the production runs client
//!
//! Command definitions live in `commands`, rendering in `output`.

pub mod commands;
pub mod output;

pub use commands::{RunsCli, RunsCommands};

use production_runs_client::ClientError;
use thiserror::Error;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Request completed
    Success = 0,
    /// Transport failure or error status from the server
    RequestFailed = 1,
    /// Server does not know the requested run
    NotFound = 2,
    /// Invalid arguments, payload or configuration
    InvalidInput = 3,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Errors raised while running a command
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Exit code reported for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Client(e) if e.is_not_found() => ExitCode::NotFound,
            CliError::Client(e) if e.is_user_error() => ExitCode::InvalidInput,
            CliError::Client(_) => ExitCode::RequestFailed,
            CliError::InvalidInput(_) => ExitCode::InvalidInput,
            CliError::Output(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub async fn run(cli: RunsCli) -> Result<ExitCode, CliError> {
    let client = commands::build_client(&cli)?;
    let format = cli.format;
    let mut out = std::io::stdout().lock();

    match cli.command {
        RunsCommands::List => commands::execute_list(&client, format, &mut out).await,
        RunsCommands::Get { id } => commands::execute_get(&client, &id, format, &mut out).await,
        RunsCommands::Create { file, json } => {
            commands::execute_create(&client, file, json, format, &mut out).await
        }
    }
}
