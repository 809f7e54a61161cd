//! Clip output formats.
//!
//! This module provides writers that turn a sampled keyframe sequence into a
//! file the game engine can load.
//!
//! # Supported Formats
//!
//! - **anim**: Unity `AnimationClip` asset (YAML 1.1) with position and
//!   editor curves
//! - **cs**: MelonLoader mod script that embeds the coordinates and rebuilds
//!   the curves, including the depth pulse at curve breaks, at runtime
//!
//! # Example
//!
//! ```ignore
//! use svg2clip::export::{writer_for, ClipFormat, ClipSettings};
//!
//! let writer = writer_for(ClipFormat::Anim, ClipSettings::default());
//! writer.begin(&mut out)?;
//! writer.finish(&keyframes, &mut out)?;
//! ```

pub mod anim;
pub mod number;
pub mod script;

pub use anim::AnimWriter;
pub use script::ScriptWriter;

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::Keyframes;

/// Common error type for export operations.
///
/// Write failures stay `io::Error`s; the converter attaches the output path.
#[derive(Debug)]
pub enum ExportError {
    /// Output path extension does not name a known format
    UnknownExtension(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::UnknownExtension(ext) if ext.is_empty() => {
                write!(f, "output file has no extension (expected .anim or .cs)")
            }
            ExportError::UnknownExtension(ext) => {
                write!(f, "could not recognize extension '{}' (expected .anim or .cs)", ext)
            }
        }
    }
}

impl std::error::Error for ExportError {}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ClipFormat {
    /// Unity animation clip asset
    #[serde(rename = "anim")]
    #[value(name = "anim")]
    Anim,
    /// MelonLoader C# mod script
    #[serde(rename = "cs")]
    #[value(name = "cs")]
    Script,
}

impl ClipFormat {
    /// Match a file extension (without the dot, case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "anim" => Some(Self::Anim),
            "cs" => Some(Self::Script),
            _ => None,
        }
    }

    /// Infer the format from an output path.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::UnknownExtension` if the extension is missing or
    /// unsupported.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| ExportError::UnknownExtension(ext.to_string()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Anim => "anim",
            Self::Script => "cs",
        }
    }
}

impl std::fmt::Display for ClipFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Values embedded in the generated mod script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSettings {
    /// C# namespace of the mod
    pub namespace: String,
    /// Mod class name
    pub class_name: String,
    /// Scene in which the clip gets installed
    pub scene: String,
    /// Scene path of the object that plays the clip
    pub target_object: String,
    /// Message logged once the clip is playing
    pub loaded_message: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            namespace: "TraceClipMod".to_string(),
            class_name: "TraceClip".to_string(),
            scene: "LAB_Labyrinth".to_string(),
            target_object: "/Events/LAB_PatternPond/Oszilloskop".to_string(),
            loaded_message: "Trace clip loaded successfully".to_string(),
        }
    }
}

/// Settings shared by every clip writer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSettings {
    /// Clip name
    pub clip_name: String,
    /// Keyframes per second
    pub sample_rate: u32,
    /// Digits after the decimal point in script literals
    pub decimal_places: usize,
    /// Transform path the curves animate
    pub bone_path: String,
    /// Unity's hash of `bone_path`, used in the clip's generic binding
    pub binding_hash: u32,
    /// Depth at which the tracer is barely inside the camera frustum
    pub z_in: f64,
    /// Depth at which the tracer is hidden
    pub z_out: f64,
    /// Hold-frames around each break (must match the sampler)
    pub break_margin: usize,
    /// Script-only values
    pub script: ScriptSettings,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            clip_name: "TraceClip".to_string(),
            sample_rate: 1024,
            decimal_places: 3,
            bone_path: "Armature/Bone_001".to_string(),
            binding_hash: 2729491044,
            z_in: 3.46,
            z_out: 512.0,
            break_margin: 4,
            script: ScriptSettings::default(),
        }
    }
}

/// Trait for clip format implementations.
///
/// `begin` runs once the output file exists and before any input is read;
/// `finish` runs after every input has been sampled.
pub trait ClipWriter {
    /// Write everything that is known before sampling.
    fn begin(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Write the keyframe data and the closing text.
    fn finish(&self, keyframes: &Keyframes, out: &mut dyn Write) -> io::Result<()>;

    /// Get the format name for this writer.
    fn format_name(&self) -> &'static str;
}

/// Create the writer for a format.
pub fn writer_for(format: ClipFormat, settings: ClipSettings) -> Box<dyn ClipWriter> {
    match format {
        ClipFormat::Anim => Box::new(AnimWriter::new(settings)),
        ClipFormat::Script => Box::new(ScriptWriter::new(settings)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ClipFormat::from_path(Path::new("out/Clip.anim")).unwrap(), ClipFormat::Anim);
        assert_eq!(ClipFormat::from_path(Path::new("Clip.CS")).unwrap(), ClipFormat::Script);
    }

    #[test]
    fn test_format_unknown_extension() {
        let err = ClipFormat::from_path(Path::new("clip.yaml")).unwrap_err();
        assert!(matches!(err, ExportError::UnknownExtension(ref e) if e == "yaml"));
        assert!(err.to_string().contains("'yaml'"));

        let err = ClipFormat::from_path(Path::new("clip")).unwrap_err();
        assert!(err.to_string().contains("no extension"));
    }

    #[test]
    fn test_writer_for() {
        let anim = writer_for(ClipFormat::Anim, ClipSettings::default());
        let script = writer_for(ClipFormat::Script, ClipSettings::default());
        assert_ne!(anim.format_name(), script.format_name());
    }
}
