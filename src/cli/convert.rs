//! Convert command implementation

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use super::EXIT_SUCCESS;
use crate::config::{resolve_config, CliOverrides};
use crate::convert::Converter;
use crate::error::{ConvertError, SUCCESS_MESSAGE};
use crate::progress::{ConsoleProgress, NullProgress, ProgressReporter};

/// Run the convert command
pub fn run_convert(
    config: Option<&Path>,
    overrides: &CliOverrides,
    quiet: bool,
    verbose: bool,
) -> ExitCode {
    match convert(config, overrides, quiet, verbose) {
        Ok(()) => {
            println!("{}", SUCCESS_MESSAGE);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => report_failure(&e),
    }
}

fn convert(
    config: Option<&Path>,
    overrides: &CliOverrides,
    quiet: bool,
    verbose: bool,
) -> Result<(), ConvertError> {
    let config = resolve_config(config, overrides)?;

    let reporter: Box<dyn ProgressReporter> = if quiet {
        Box::new(NullProgress::new())
    } else {
        Box::new(
            ConsoleProgress::new()
                .with_colors(std::io::stderr().is_terminal())
                .with_verbose(verbose),
        )
    };

    let converter = Converter::from_config(&config)?.with_reporter(reporter);
    converter.run()?;
    Ok(())
}

/// Print the failure and map it to the process exit status.
pub(crate) fn report_failure(error: &ConvertError) -> ExitCode {
    eprintln!("Error: {}", error);
    println!("{}", error.status_message());
    ExitCode::from(error.exit_code())
}
