//! Conversion driver.
//!
//! Opens the output once, streams every input frame through the sampler in
//! order, then hands the finished keyframe sequence to the clip writer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::config::Svg2ClipConfig;
use crate::error::ConvertError;
use crate::export::{writer_for, ClipFormat, ClipSettings};
use crate::input::input_files;
use crate::progress::{NullProgress, ProgressEvent, ProgressReporter};
use crate::sampler::{Sampler, SamplerSettings, SamplerStats};
use crate::svg::path_data;

/// Summary of a finished conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Input files sampled
    pub files: usize,
    /// Keyframes written, hold-frames included
    pub keyframes: usize,
    /// Curve breaks written
    pub breaks: usize,
    /// Sampler counters
    pub stats: SamplerStats,
    /// Output file
    pub output: PathBuf,
    /// Output format
    pub format: ClipFormat,
}

/// Sequential SVG-to-clip converter.
pub struct Converter {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    format: ClipFormat,
    sampler: SamplerSettings,
    clip: ClipSettings,
    reporter: Box<dyn ProgressReporter>,
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("inputs", &self.inputs.len())
            .field("output", &self.output)
            .field("format", &self.format)
            .finish()
    }
}

impl Converter {
    pub fn new(
        inputs: Vec<PathBuf>,
        output: PathBuf,
        format: ClipFormat,
        sampler: SamplerSettings,
        clip: ClipSettings,
    ) -> Self {
        Self { inputs, output, format, sampler, clip, reporter: Box::new(NullProgress) }
    }

    /// Build a converter from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Fails with an unknown-extension error if the output format cannot be
    /// determined, or a discovery error if the input pattern is invalid.
    pub fn from_config(config: &Svg2ClipConfig) -> Result<Self, ConvertError> {
        let format = config.output_format()?;
        let output = config.output_path(format);
        let inputs = input_files(&config.input)?;
        Ok(Self::new(inputs, output, format, config.sampler_settings(), config.clip_settings()))
    }

    /// Set the progress reporter.
    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn format(&self) -> ClipFormat {
        self.format
    }

    /// Run the conversion.
    ///
    /// Stops at the first failing input. Whatever was already written to the
    /// output stays on disk.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError` describing the first failure.
    pub fn run(&self) -> Result<ConversionReport, ConvertError> {
        let started = Instant::now();
        let output_error = |source| ConvertError::Output { path: self.output.clone(), source };

        let writer = writer_for(self.format, self.clip.clone());
        let file = File::create(&self.output).map_err(output_error)?;
        let mut out = BufWriter::new(file);
        writer.begin(&mut out).map_err(output_error)?;

        tracing::info!(
            inputs = self.inputs.len(),
            output = %self.output.display(),
            format = writer.format_name(),
            "starting conversion"
        );
        self.reporter.report(ProgressEvent::ConversionStarted { total_files: self.inputs.len() });

        let mut sampler = Sampler::new(self.sampler);
        for path in &self.inputs {
            self.sample_file(&mut sampler, path)?;
        }

        let stats = sampler.stats();
        let keyframes = sampler.into_keyframes();
        if keyframes.is_empty() {
            self.reporter.report(ProgressEvent::Warning {
                path: None,
                message: "no keyframes were accepted".to_string(),
            });
        }

        writer.finish(&keyframes, &mut out).map_err(output_error)?;
        out.flush().map_err(output_error)?;

        let report = ConversionReport {
            files: self.inputs.len(),
            keyframes: keyframes.len(),
            breaks: keyframes.breaks().len(),
            stats,
            output: self.output.clone(),
            format: self.format,
        };
        tracing::info!(
            files = report.files,
            keyframes = report.keyframes,
            breaks = report.breaks,
            "conversion finished"
        );
        self.reporter.report(ProgressEvent::ConversionCompleted {
            output: self.output.display().to_string(),
            keyframes: report.keyframes,
            breaks: report.breaks,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        Ok(report)
    }

    /// Feed every path of one frame file into the sampler.
    fn sample_file(&self, sampler: &mut Sampler, path: &Path) -> Result<(), ConvertError> {
        let started = Instant::now();
        let svg = fs::read_to_string(path)
            .map_err(|source| ConvertError::Input { path: path.to_path_buf(), source })?;
        let paths = path_data(&svg)
            .map_err(|source| ConvertError::Svg { path: path.to_path_buf(), source })?;

        if paths.is_empty() {
            self.reporter.report(ProgressEvent::Warning {
                path: Some(path.display().to_string()),
                message: "no <path> elements".to_string(),
            });
        }

        let mut accepted = 0;
        for data in paths {
            accepted += sampler
                .feed_path(data)
                .map_err(|source| ConvertError::Path { path: path.to_path_buf(), source })?;
        }

        tracing::debug!(file = %path.display(), accepted, total = sampler.keyframes().len(), "sampled");
        self.reporter.report(ProgressEvent::FileCompleted {
            path: path.display().to_string(),
            accepted,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        Ok(())
    }
}
