//! Configuration schema types for `svg2clip.toml`
//!
//! Defines the structure and validation rules for conversion settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::{ClipFormat, ClipSettings, ExportError, ScriptSettings};
use crate::sampler::SamplerSettings;

/// Name of the configuration file searched for by `find_config`.
pub const CONFIG_FILE_NAME: &str = "svg2clip.toml";

/// Largest accepted number of hold-frames on each side of a curve break.
pub const MAX_BREAK_MARGIN: usize = 1024;

/// Largest accepted number of digits after the decimal point in script
/// literals. More digits than an `f64` carries only grow the file.
pub const MAX_DECIMAL_PLACES: usize = 17;

/// Tuning presets for the two supported targets.
///
/// Each preset supplies the defaults for every sampling knob, the sample
/// rate and the output format; individual settings override it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Mod script driving an in-game oscilloscope, with curve breaks
    #[default]
    Oscilloscope,
    /// Plain animation clip, sparser sampling and no breaks
    Flat,
}

impl Preset {
    pub fn sampler_settings(self) -> SamplerSettings {
        match self {
            Preset::Oscilloscope => SamplerSettings::oscilloscope(),
            Preset::Flat => SamplerSettings::flat(),
        }
    }

    pub fn sample_rate(self) -> u32 {
        match self {
            Preset::Oscilloscope => 1024,
            Preset::Flat => 60,
        }
    }

    pub fn format(self) -> ClipFormat {
        match self {
            Preset::Oscilloscope => ClipFormat::Script,
            Preset::Flat => ClipFormat::Anim,
        }
    }
}

/// Input frame discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory holding the numbered frame files
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    /// First frame number (inclusive)
    #[serde(default = "default_first")]
    pub first: u32,
    /// Last frame number (inclusive)
    #[serde(default = "default_last")]
    pub last: u32,
    /// Zero-padded width of frame numbers in file names
    #[serde(default = "default_pad")]
    pub pad: usize,
    /// Frame file extension
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Glob pattern used instead of numbered names (relative to `dir`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("svgs")
}

fn default_first() -> u32 {
    1
}

fn default_last() -> u32 {
    6562
}

fn default_pad() -> usize {
    4
}

fn default_extension() -> String {
    "svg".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            first: default_first(),
            last: default_last(),
            pad: default_pad(),
            extension: default_extension(),
            pattern: None,
        }
    }
}

/// Sampling overrides; unset values come from the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_inset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_x: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_y: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_margin: Option<usize>,
}

/// Values embedded in the generated mod script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default = "default_scene")]
    pub scene: String,
    #[serde(default = "default_target_object")]
    pub target_object: String,
    #[serde(default = "default_loaded_message")]
    pub loaded_message: String,
}

fn default_namespace() -> String {
    ScriptSettings::default().namespace
}

fn default_class_name() -> String {
    ScriptSettings::default().class_name
}

fn default_scene() -> String {
    ScriptSettings::default().scene
}

fn default_target_object() -> String {
    ScriptSettings::default().target_object
}

fn default_loaded_message() -> String {
    ScriptSettings::default().loaded_message
}

impl Default for ScriptConfig {
    fn default() -> Self {
        let defaults = ScriptSettings::default();
        Self {
            namespace: defaults.namespace,
            class_name: defaults.class_name,
            scene: defaults.scene,
            target_object: defaults.target_object,
            loaded_message: defaults.loaded_message,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file; defaults to `<clip_name>.<format extension>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Output format; inferred from `path` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ClipFormat>,
    /// Keyframes per second; defaults to the preset's rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    /// Digits after the decimal point in script literals
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
    #[serde(default = "default_clip_name")]
    pub clip_name: String,
    #[serde(default = "default_bone_path")]
    pub bone_path: String,
    #[serde(default = "default_binding_hash")]
    pub binding_hash: u32,
    #[serde(default = "default_z_in")]
    pub z_in: f64,
    #[serde(default = "default_z_out")]
    pub z_out: f64,
    #[serde(default)]
    pub script: ScriptConfig,
}

fn default_decimal_places() -> usize {
    ClipSettings::default().decimal_places
}

fn default_clip_name() -> String {
    ClipSettings::default().clip_name
}

fn default_bone_path() -> String {
    ClipSettings::default().bone_path
}

fn default_binding_hash() -> u32 {
    ClipSettings::default().binding_hash
}

fn default_z_in() -> f64 {
    ClipSettings::default().z_in
}

fn default_z_out() -> f64 {
    ClipSettings::default().z_out
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: None,
            sample_rate: None,
            decimal_places: default_decimal_places(),
            clip_name: default_clip_name(),
            bone_path: default_bone_path(),
            binding_hash: default_binding_hash(),
            z_in: default_z_in(),
            z_out: default_z_out(),
            script: ScriptConfig::default(),
        }
    }
}

/// Complete svg2clip.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Svg2ClipConfig {
    /// Tuning preset
    #[serde(default)]
    pub preset: Preset,
    /// Input frame discovery
    #[serde(default)]
    pub input: InputConfig,
    /// Sampling overrides
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "sampling.edge")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' {}", CONFIG_FILE_NAME, self.field, self.message)
    }
}

impl Svg2ClipConfig {
    /// Sampling settings: preset defaults with explicit overrides applied
    pub fn sampler_settings(&self) -> SamplerSettings {
        let base = self.preset.sampler_settings();
        let s = &self.sampling;
        SamplerSettings {
            width: s.width.unwrap_or(base.width),
            height: s.height.unwrap_or(base.height),
            edge: s.edge.unwrap_or(base.edge),
            spacing: s.spacing.unwrap_or(base.spacing),
            scale_inset: s.scale_inset.unwrap_or(base.scale_inset),
            invert_x: s.invert_x.unwrap_or(base.invert_x),
            invert_y: s.invert_y.unwrap_or(base.invert_y),
            breaks: s.breaks.unwrap_or(base.breaks),
            break_margin: s.break_margin.unwrap_or(base.break_margin),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.output.sample_rate.unwrap_or_else(|| self.preset.sample_rate())
    }

    /// Writer settings derived from the output section
    pub fn clip_settings(&self) -> ClipSettings {
        let o = &self.output;
        ClipSettings {
            clip_name: o.clip_name.clone(),
            sample_rate: self.sample_rate(),
            decimal_places: o.decimal_places,
            bone_path: o.bone_path.clone(),
            binding_hash: o.binding_hash,
            z_in: o.z_in,
            z_out: o.z_out,
            break_margin: self.sampler_settings().break_margin,
            script: ScriptSettings {
                namespace: o.script.namespace.clone(),
                class_name: o.script.class_name.clone(),
                scene: o.script.scene.clone(),
                target_object: o.script.target_object.clone(),
                loaded_message: o.script.loaded_message.clone(),
            },
        }
    }

    /// Resolve the output format.
    ///
    /// An explicit format wins, then the output path's extension, then the
    /// preset's format.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::UnknownExtension` when only a path is given and
    /// its extension is not recognized.
    pub fn output_format(&self) -> Result<ClipFormat, ExportError> {
        match (self.output.format, &self.output.path) {
            (Some(format), _) => Ok(format),
            (None, Some(path)) => ClipFormat::from_path(path),
            (None, None) => Ok(self.preset.format()),
        }
    }

    /// Output file path for a resolved format
    pub fn output_path(&self, format: ClipFormat) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", self.output.clip_name, format.extension())))
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut error = |field: &str, message: &str| {
            errors.push(ConfigValidationError {
                field: field.to_string(),
                message: message.to_string(),
            });
        };

        let s = self.sampler_settings();
        if !(s.width > 0.0) || !(s.height > 0.0) {
            error("sampling.width/height", "must be positive");
        }
        if !(s.edge >= 0.0) {
            error("sampling.edge", "must not be negative");
        } else if s.edge * 2.0 >= s.width || s.edge * 2.0 >= s.height {
            error("sampling.edge", "leaves no visible area inside the viewport");
        }
        if !(s.spacing >= 0.0) {
            error("sampling.spacing", "must not be negative");
        }
        if !(s.scale_inset < s.width) {
            error("sampling.scale_inset", "must be smaller than the viewport width");
        }
        if s.break_margin > MAX_BREAK_MARGIN {
            error("sampling.break_margin", &format!("must be at most {}", MAX_BREAK_MARGIN));
        }

        if self.input.first > self.input.last {
            error("input.first", "must not be greater than input.last");
        }
        if self.input.extension.is_empty() {
            error("input.extension", "must be a non-empty string");
        }
        if matches!(&self.input.pattern, Some(p) if p.trim().is_empty()) {
            error("input.pattern", "must be a non-empty glob pattern");
        }

        if self.sample_rate() == 0 {
            error("output.sample_rate", "must be a positive integer");
        }
        if self.output.decimal_places > MAX_DECIMAL_PLACES {
            error("output.decimal_places", &format!("must be at most {}", MAX_DECIMAL_PLACES));
        }
        if self.output.clip_name.is_empty() {
            error("output.clip_name", "must be a non-empty string");
        }
        if self.output.bone_path.is_empty() {
            error("output.bone_path", "must be a non-empty string");
        }
        if self.output.script.class_name.is_empty() {
            error("output.script.class_name", "must be a non-empty string");
        }
        if self.output.script.namespace.is_empty() {
            error("output.script.namespace", "must be a non-empty string");
        }

        errors
    }
}
