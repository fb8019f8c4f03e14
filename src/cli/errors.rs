//! CLI-specific error types
//!
//! Every CLI error is fatal: the command prints it and exits non-zero.

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error
    IoError,
    /// Already initialized
    AlreadyInitialized,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DOCBRIDGE_CLI_CONFIG_ERROR",
            Self::IoError => "DOCBRIDGE_CLI_IO_ERROR",
            Self::AlreadyInitialized => "DOCBRIDGE_CLI_ALREADY_INITIALIZED",
            Self::BootFailed => "DOCBRIDGE_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Already initialized
    pub fn already_initialized() -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            "Configuration file already exists",
        )
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
