//! Errors surfaced by a conversion run.
//!
//! Every variant maps onto one process exit status so the binary and the
//! library agree on what a failure means.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::input::DiscoveryError;
use crate::path::PathError;
use crate::svg::SvgError;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Output file could not be created or written.
pub const EXIT_OUTPUT: u8 = 1;
/// An input file could not be opened or read.
pub const EXIT_INPUT: u8 = 2;
/// Output path extension does not name a known format.
pub const EXIT_EXTENSION: u8 = 3;
/// A path used a command letter outside `M`, `m`, `l`, `c`.
pub const EXIT_UNKNOWN_COMMAND: u8 = 4;
/// Path data or SVG markup could not be parsed.
pub const EXIT_MALFORMED: u8 = 5;
/// Configuration could not be loaded or failed validation.
pub const EXIT_CONFIG: u8 = 6;

/// Line printed to stdout after a successful run.
pub const SUCCESS_MESSAGE: &str = "Output file successfully generated";

/// Error type for a conversion run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Output could not be created, written or flushed
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input file could not be read
    #[error("could not open file {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output format could not be determined
    #[error(transparent)]
    Format(#[from] ExportError),

    /// Path data in an input file could not be parsed
    #[error("error occurred at file {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: PathError,
    },

    /// SVG markup in an input file could not be scanned
    #[error("error occurred at file {}: {source}", path.display())]
    Svg {
        path: PathBuf,
        #[source]
        source: SvgError,
    },

    /// Input pattern could not be expanded
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report could not be rendered as JSON
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl ConvertError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Output { .. } | ConvertError::Report(_) => EXIT_OUTPUT,
            ConvertError::Input { .. } => EXIT_INPUT,
            ConvertError::Format(ExportError::UnknownExtension(_)) => EXIT_EXTENSION,
            ConvertError::Path { source: PathError::UnknownCommand(_), .. } => {
                EXIT_UNKNOWN_COMMAND
            }
            ConvertError::Path { .. } | ConvertError::Svg { .. } => EXIT_MALFORMED,
            ConvertError::Discovery(_) | ConvertError::Config(_) => EXIT_CONFIG,
        }
    }

    /// One-line summary printed to stdout when the run fails.
    pub fn status_message(&self) -> &'static str {
        match self.exit_code() {
            EXIT_OUTPUT => "Error: failure to create output file",
            EXIT_INPUT => "Error: failure to open SVG file",
            EXIT_EXTENSION => "Error: unknown output file extension",
            EXIT_UNKNOWN_COMMAND => "Error: unknown SVG command",
            EXIT_MALFORMED => "Error: malformed SVG path data",
            EXIT_CONFIG => "Error: invalid configuration",
            _ => "Unknown error encountered",
        }
    }

    /// Input file the error occurred in, if any.
    pub fn input_path(&self) -> Option<&PathBuf> {
        match self {
            ConvertError::Input { path, .. }
            | ConvertError::Path { path, .. }
            | ConvertError::Svg { path, .. } => Some(path),
            _ => None,
        }
    }
}
