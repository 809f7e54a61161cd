//! Configuration loading and discovery for `svg2clip.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{Preset, Svg2ClipConfig, CONFIG_FILE_NAME};
use crate::export::ClipFormat;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse svg2clip.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the preset
    pub preset: Option<Preset>,
    /// Override the input directory
    pub input_dir: Option<PathBuf>,
    /// Override the input glob pattern
    pub pattern: Option<String>,
    /// Override the first frame number
    pub first: Option<u32>,
    /// Override the last frame number
    pub last: Option<u32>,
    /// Override the output path
    pub output: Option<PathBuf>,
    /// Override the output format
    pub format: Option<ClipFormat>,
    /// Override the sample rate
    pub sample_rate: Option<u32>,
    /// Override the edge margin
    pub edge: Option<f64>,
    /// Override the point spacing
    pub spacing: Option<f64>,
}

/// Find svg2clip.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find svg2clip.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Load configuration from an svg2clip.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&Path>) -> Result<Svg2ClipConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<Svg2ClipConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let config: Svg2ClipConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no svg2clip.toml is found.
pub fn default_config() -> Svg2ClipConfig {
    Svg2ClipConfig::default()
}

/// Merge CLI overrides into a loaded config.
pub fn merge_cli_overrides(config: &mut Svg2ClipConfig, overrides: &CliOverrides) {
    if let Some(preset) = overrides.preset {
        config.preset = preset;
    }

    // Input selection
    if let Some(ref dir) = overrides.input_dir {
        config.input.dir = dir.clone();
    }
    if let Some(ref pattern) = overrides.pattern {
        config.input.pattern = Some(pattern.clone());
    }
    if let Some(first) = overrides.first {
        config.input.first = first;
    }
    if let Some(last) = overrides.last {
        config.input.last = last;
    }

    // Output
    if let Some(ref output) = overrides.output {
        config.output.path = Some(output.clone());
        // An explicit path re-derives the format unless --format is also given
        if overrides.format.is_none() {
            config.output.format = None;
        }
    }
    if let Some(format) = overrides.format {
        config.output.format = Some(format);
    }
    if let Some(rate) = overrides.sample_rate {
        config.output.sample_rate = Some(rate);
    }

    // Sampling
    if let Some(edge) = overrides.edge {
        config.sampling.edge = Some(edge);
    }
    if let Some(spacing) = overrides.spacing {
        config.sampling.spacing = Some(spacing);
    }
}

/// Load, merge and validate configuration for a run.
///
/// # Errors
///
/// Returns `ConfigError` if loading fails or the merged result is invalid.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Svg2ClipConfig, ConfigError> {
    let mut config = load_config(path)?;
    merge_cli_overrides(&mut config, overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Commented default configuration written by `svg2clip init`.
pub fn default_config_toml() -> &'static str {
    r#"# svg2clip configuration
#
# preset: "oscilloscope" (mod script, dense sampling, curve breaks)
#      or "flat" (animation clip, sparse sampling, no breaks)
preset = "oscilloscope"

[input]
dir = "svgs"
first = 1
last = 6562
pad = 4
extension = "svg"
# pattern = "*.svg"

[sampling]
# Unset values come from the preset.
# width = 14400
# height = 10800
# edge = 30
# spacing = 0
# scale_inset = 2000
# invert_x = true
# invert_y = false
# breaks = true
# break_margin = 4

[output]
# path = "TraceClip.cs"
# format = "cs"
# sample_rate = 1024
decimal_places = 3
clip_name = "TraceClip"
bone_path = "Armature/Bone_001"
binding_hash = 2729491044
z_in = 3.46
z_out = 512

[output.script]
namespace = "TraceClipMod"
class_name = "TraceClip"
scene = "LAB_Labyrinth"
target_object = "/Events/LAB_PatternPond/Oszilloskop"
loaded_message = "Trace clip loaded successfully"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SamplerSettings;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(b"preset = \"flat\"")
            .expect("should write config content");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).expect("should create config file");

        let subdir = temp.path().join("frames").join("act1");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "preset = \"flat\"\n[input]\nlast = 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.preset, Preset::Flat);
        assert_eq!(config.input.last, 3);
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[input\nlast = 3").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[output]\nsample_rate = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("output.sample_rate"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/svg2clip.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            preset: Some(Preset::Flat),
            input_dir: Some(PathBuf::from("frames")),
            first: Some(3),
            last: Some(9),
            spacing: Some(0.0),
            sample_rate: Some(24),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.input.dir, PathBuf::from("frames"));
        assert_eq!((config.input.first, config.input.last), (3, 9));
        assert_eq!(config.sample_rate(), 24);
        assert_eq!(
            config.sampler_settings(),
            SamplerSettings { spacing: 0.0, ..SamplerSettings::flat() }
        );
    }

    #[test]
    fn test_merge_output_path_rederives_format() {
        let mut config = default_config();
        config.output.format = Some(ClipFormat::Script);

        let overrides = CliOverrides { output: Some(PathBuf::from("x.anim")), ..Default::default() };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output_format().unwrap(), ClipFormat::Anim);

        let overrides = CliOverrides {
            output: Some(PathBuf::from("x.anim")),
            format: Some(ClipFormat::Script),
            ..Default::default()
        };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output_format().unwrap(), ClipFormat::Script);
    }

    #[test]
    fn test_resolve_config_validates_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();

        let overrides = CliOverrides { first: Some(10), last: Some(2), ..Default::default() };
        let err = resolve_config(Some(&path), &overrides).unwrap_err();
        assert!(err.to_string().contains("input.first"));
    }

    #[test]
    fn test_default_config_toml_round_trips_to_defaults() {
        let config: Svg2ClipConfig = toml::from_str(default_config_toml()).unwrap();
        let defaults = default_config();
        assert_eq!(config.preset, defaults.preset);
        assert_eq!(config.sampler_settings(), defaults.sampler_settings());
        assert_eq!(config.clip_settings(), defaults.clip_settings());
        assert_eq!(config.input.dir, defaults.input.dir);
    }
}
