//! Input frame discovery.
//!
//! Frames are either numbered files (`svgs/0001.svg` .. `svgs/6562.svg`) or
//! every file matching a glob pattern inside the input directory.

use crate::config::InputConfig;
use glob::glob;
use std::path::{Path, PathBuf};

/// Error during input discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Invalid glob pattern
    InvalidPattern(String, glob::PatternError),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidPattern(pattern, err) => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, err)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::InvalidPattern(_, err) => Some(err),
        }
    }
}

/// Numbered frame paths `dir/<index>.<extension>` for `first..=last`.
///
/// Files are not checked for existence; a missing frame surfaces as an input
/// error once the converter reaches it.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use svg2clip::input::numbered_files;
///
/// let files = numbered_files(Path::new("svgs"), 9, 10, 4, "svg");
/// assert_eq!(files, vec![PathBuf::from("svgs/0009.svg"), PathBuf::from("svgs/0010.svg")]);
/// ```
pub fn numbered_files(
    dir: &Path,
    first: u32,
    last: u32,
    pad: usize,
    extension: &str,
) -> Vec<PathBuf> {
    (first..=last).map(|n| dir.join(format!("{:0width$}.{}", n, extension, width = pad))).collect()
}

/// Files inside `dir` matching `pattern`, sorted by path.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let full_pattern = dir.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let paths =
        glob(&pattern_str).map_err(|e| DiscoveryError::InvalidPattern(pattern.to_string(), e))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "skipping unreadable path"),
        }
    }

    files.sort();
    Ok(files)
}

/// Resolve the configured input selection to an ordered file list.
pub fn input_files(config: &InputConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    match &config.pattern {
        Some(pattern) => discover_files(&config.dir, pattern),
        None => Ok(numbered_files(
            &config.dir,
            config.first,
            config.last,
            config.pad,
            &config.extension,
        )),
    }
}
