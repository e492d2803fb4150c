use thiserror::Error;

/// Process exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Generic failure or user abort.
pub const EXIT_FAILURE: i32 = 1;
/// No GitHub token could be obtained from any source.
pub const EXIT_MISSING_TOKEN: i32 = 2;
/// Anything we did not anticipate.
pub const EXIT_UNEXPECTED: i32 = 99;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("GitHub token not available: {0}")]
    MissingToken(String),

    #[error("Operation cancelled by user")]
    Aborted,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Directory '{0}' already exists")]
    AlreadyExists(String),

    #[error("Command not found: {0}. Is it installed and in PATH?")]
    CommandNotFound(String),

    #[error("Command `{command}` failed with exit code {}: {stderr}", code.map_or("unknown".to_string(), |c| c.to_string()))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(
        "Remote repository {remote} was created but local setup failed: {reason}\n\
         Manual cleanup of the remote repository and local directory might be required."
    )]
    PartialSetup { remote: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SetupError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::MissingToken(_) => EXIT_MISSING_TOKEN,
            SetupError::Io(_) | SetupError::Json(_) => EXIT_UNEXPECTED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Maps an error chain to the process exit code.
///
/// The first [`SetupError`] found in the chain decides; an error that never
/// passed through one is treated as unexpected.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SetupError>())
        .map_or(EXIT_UNEXPECTED, SetupError::exit_code)
}

pub type Result<T> = std::result::Result<T, SetupError>;
