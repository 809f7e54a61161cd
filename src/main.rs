//! svg2clip - Command-line tool for turning traced SVG frames into animation clips

use std::process::ExitCode;

use svg2clip::cli;

fn main() -> ExitCode {
    cli::run()
}
