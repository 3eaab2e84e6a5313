//! Errors for backtrace symbolization.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// A backtrace token did not start with `0x`.
    InvalidAddress(String),

    /// The search directory did not contain any entry ending with the artifact
    /// suffix.
    NoArtifact { dir: PathBuf, suffix: String },

    /// The search directory contained more than one entry ending with the
    /// artifact suffix.
    ///
    /// `names` is sorted so the message is the same on every platform.
    MultipleArtifacts {
        dir: PathBuf,
        suffix: String,
        names: Vec<String>,
    },

    /// Listing the search directory failed.
    ReadDir { dir: PathBuf, source: io::Error },

    /// The symbolizer could not be started, usually because it is not on the
    /// `PATH`.
    Spawn { tool: String, source: io::Error },

    /// The symbolizer ran but exited with a non-zero status.
    ToolFailed {
        tool: String,
        address: String,
        status: ExitStatus,
    },

    /// Writing the banner to the output stream failed.
    Output(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(token) => write!(f, "Invalid address \"{token}\""),
            Self::NoArtifact { dir, suffix } => {
                write!(f, "No {suffix} file found in {} directory", dir.display())
            }
            Self::MultipleArtifacts { dir, suffix, names } => write!(
                f,
                "More than one {suffix} files found in {} directory: {names:?}",
                dir.display()
            ),
            Self::ReadDir { dir, .. } => write!(f, "failed to read directory `{}`", dir.display()),
            Self::Spawn { tool, .. } => write!(f, "failed to run `{tool}`"),
            Self::ToolFailed {
                tool,
                address,
                status,
            } => write!(f, "`{tool}` failed on address {address} ({status})"),
            Self::Output(_) => f.write_str("failed to write to the output stream"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadDir { source, .. } | Self::Spawn { source, .. } => Some(source),
            Self::Output(e) => Some(e),
            _ => None,
        }
    }
}
