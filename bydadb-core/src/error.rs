//! The error type shared by every core operation.
//!
//! Front ends branch on [`Error::kind`] to pick a title and wording for the
//! message they show; they never need to inspect message text.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Coarse classification of an [`Error`], used to decide how it is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed user input, rejected before anything is attempted.
    Validation,
    /// A path or file the operation depends on is missing or unusable.
    Environment,
    /// The ADB server or the device refused a request.
    Protocol,
    /// The operation's deadline passed.
    Timeout,
    /// The user asked to stop.
    Cancelled,
    /// Anything that does not fit the categories above.
    Unknown,
}

impl ErrorKind {
    /// Title for a message box reporting an error of this kind.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Protocol => "ADB Error",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::Validation | ErrorKind::Environment | ErrorKind::Unknown => "Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Environment => "environment",
            ErrorKind::Protocol => "ADB",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Unknown => "unexpected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid IP address format: '{0}'.")]
    InvalidAddress(String),

    #[error("The address '{0}' has an octet above 255 and cannot be dialled.")]
    AddressOutOfRange(String),

    #[error("No APK files were selected.")]
    NoPackages,

    #[error("The specified USB path does not exist: {}", .0.display())]
    DestinationMissing(PathBuf),

    #[error("The APK folder does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("The specified APK file does not exist: {}", .0.display())]
    PackageMissing(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Could not access the recent address file {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Bridge(String),

    #[error("The operation timed out after {} seconds.", .0.as_secs())]
    Timeout(Duration),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidAddress(_) | Error::AddressOutOfRange(_) | Error::NoPackages => {
                ErrorKind::Validation
            }
            Error::DestinationMissing(_)
            | Error::SourceMissing(_)
            | Error::PackageMissing(_)
            | Error::Io { .. }
            | Error::Store { .. } => ErrorKind::Environment,
            Error::Bridge(_) => ErrorKind::Protocol,
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Other(_) => ErrorKind::Unknown,
        }
    }

    /// The sentence shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidAddress(_) => "Invalid IP address format. Please try again.".to_string(),
            Error::DestinationMissing(_) => {
                "The specified USB path does not exist. Please check and try again.".to_string()
            }
            Error::PackageMissing(_) => {
                "The specified APK file does not exist. Please check the path and try again."
                    .to_string()
            }
            Error::Bridge(msg) => format!("ADB error occurred: {msg}"),
            Error::Timeout(limit) => format!(
                "The operation timed out after {}. Please try again.",
                human_duration(*limit)
            ),
            Error::Other(msg) => format!("An unexpected error occurred: {msg}"),
            other => other.to_string(),
        }
    }

    /// Wraps an I/O error with a short description of what was being done.
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<adb_client::RustADBError> for Error {
    fn from(err: adb_client::RustADBError) -> Self {
        Error::Bridge(err.to_string())
    }
}

fn human_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 60, secs % 60) {
        (1, 0) => "1 minute".to_string(),
        (m, 0) if m > 0 => format!("{m} minutes"),
        _ => format!("{secs} seconds"),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
