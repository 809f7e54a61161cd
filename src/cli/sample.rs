//! Sample command implementation

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use super::convert::report_failure;
use super::EXIT_SUCCESS;
use crate::config::{resolve_config, CliOverrides, Preset};
use crate::error::ConvertError;
use crate::models::{Keyframes, Point};
use crate::sampler::{Sampler, SamplerStats};
use crate::svg::path_data;

/// Keyframes of one file, as printed by `--json`.
#[derive(Debug, Serialize)]
struct SampleReport<'a> {
    file: String,
    sample_rate: u32,
    paths: usize,
    points: &'a [Point],
    breaks: &'a [usize],
    stats: SamplerStats,
}

/// Run the sample command
pub fn run_sample(file: &Path, config: Option<&Path>, preset: Option<Preset>, json: bool) -> ExitCode {
    match sample(file, config, preset, json) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => report_failure(&e),
    }
}

fn sample(
    file: &Path,
    config: Option<&Path>,
    preset: Option<Preset>,
    json: bool,
) -> Result<(), ConvertError> {
    let overrides = CliOverrides { preset, ..Default::default() };
    let config = resolve_config(config, &overrides)?;
    let sample_rate = config.sample_rate();

    let svg = fs::read_to_string(file)
        .map_err(|source| ConvertError::Input { path: file.to_path_buf(), source })?;
    let paths =
        path_data(&svg).map_err(|source| ConvertError::Svg { path: file.to_path_buf(), source })?;

    let mut sampler = Sampler::new(config.sampler_settings());
    for data in &paths {
        sampler
            .feed_path(data)
            .map_err(|source| ConvertError::Path { path: file.to_path_buf(), source })?;
    }

    let stats = sampler.stats();
    let keyframes = sampler.into_keyframes();

    if json {
        let report = SampleReport {
            file: file.display().to_string(),
            sample_rate,
            paths: paths.len(),
            points: keyframes.points(),
            breaks: keyframes.breaks(),
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(file, paths.len(), &keyframes, sample_rate, &stats);
    }
    Ok(())
}

fn print_table(file: &Path, paths: usize, keyframes: &Keyframes, sample_rate: u32, stats: &SamplerStats) {
    println!("{}: {} path(s), {} keyframe(s)", file.display(), paths, keyframes.len());
    println!("{:>6}  {:>10}  {:>10}  {:>10}", "index", "time", "x", "y");
    for (index, p) in keyframes.points().iter().enumerate() {
        let marker = if keyframes.breaks().contains(&index) { "  <- break" } else { "" };
        println!(
            "{:>6}  {:>10.5}  {:>10.5}  {:>10.5}{}",
            index,
            Keyframes::time_at(index, sample_rate),
            p.x,
            p.y,
            marker
        );
    }
    println!();
    println!(
        "{} candidate(s): {} accepted, {} near edge, {} too close, {} break(s)",
        stats.candidates, stats.accepted, stats.near_edge, stats.too_close, stats.breaks
    );
}
