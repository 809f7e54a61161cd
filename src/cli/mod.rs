//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod init;
mod sample;

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Preset;
use crate::export::ClipFormat;

pub(crate) use crate::error::{EXIT_OUTPUT, EXIT_SUCCESS};

/// svg2clip - Convert traced SVG frame sequences into animation clips
#[derive(Parser)]
#[command(name = "svg2clip")]
#[command(about = "svg2clip - Sample traced SVG frames into a Unity clip or MelonLoader script")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final status line
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a frame sequence into one clip file
    Convert {
        /// Config file (default: svg2clip.toml in this or a parent directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the frame files
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Glob pattern (relative to the input directory) used instead of numbered names
        #[arg(long)]
        pattern: Option<String>,

        /// First frame number
        #[arg(long)]
        first: Option<u32>,

        /// Last frame number
        #[arg(long)]
        last: Option<u32>,

        /// Output file; the extension selects the format unless --format is given
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<ClipFormat>,

        /// Tuning preset
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Minimum path distance between keyframes, in source units
        #[arg(long)]
        spacing: Option<f64>,

        /// Border width in which points are dropped, in source units
        #[arg(long)]
        edge: Option<f64>,

        /// Keyframes per second
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Sample a single SVG file and print its keyframes
    Sample {
        /// SVG frame file
        file: PathBuf,

        /// Config file (default: svg2clip.toml in this or a parent directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tuning preset
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a commented svg2clip.toml to the current directory
    Init {
        /// Overwrite an existing svg2clip.toml
        #[arg(long)]
        force: bool,
    },
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let max_level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let result = tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(max_level)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .finish(),
    );
    if let Err(e) = result {
        eprintln!("Warning: could not install log subscriber: {}", e);
    }
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert {
            config,
            input_dir,
            pattern,
            first,
            last,
            output,
            format,
            preset,
            spacing,
            edge,
            fps,
        } => {
            let overrides = crate::config::CliOverrides {
                preset,
                input_dir,
                pattern,
                first,
                last,
                output,
                format,
                sample_rate: fps,
                edge,
                spacing,
            };
            convert::run_convert(config.as_deref(), &overrides, cli.quiet, cli.verbose)
        }
        Commands::Sample { file, config, preset, json } => {
            sample::run_sample(&file, config.as_deref(), preset, json)
        }
        Commands::Init { force } => init::run_init(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_overrides() {
        let cli = Cli::try_parse_from([
            "svg2clip", "convert", "--input-dir", "frames", "--first", "2", "--last", "8",
            "--output", "clip.anim", "--preset", "flat", "--spacing", "12.5", "--fps", "30",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert { input_dir, first, last, output, preset, spacing, fps, .. } => {
                assert_eq!(input_dir, Some(PathBuf::from("frames")));
                assert_eq!((first, last), (Some(2), Some(8)));
                assert_eq!(output, Some(PathBuf::from("clip.anim")));
                assert_eq!(preset, Some(Preset::Flat));
                assert_eq!(spacing, Some(12.5));
                assert_eq!(fps, Some(30));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_format_values() {
        let cli = Cli::try_parse_from(["svg2clip", "convert", "--format", "cs"]).unwrap();
        assert!(matches!(cli.command, Commands::Convert { format: Some(ClipFormat::Script), .. }));
        assert!(Cli::try_parse_from(["svg2clip", "convert", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["svg2clip", "convert", "-q", "-v"]).is_err());
        let cli = Cli::try_parse_from(["svg2clip", "init", "--force", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
