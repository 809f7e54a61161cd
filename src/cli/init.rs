//! Init command implementation

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_OUTPUT, EXIT_SUCCESS};
use crate::config::{default_config_toml, CONFIG_FILE_NAME};

/// Run the init command
pub fn run_init(force: bool) -> ExitCode {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() && !force {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        eprintln!("Use --force to overwrite it");
        return ExitCode::from(EXIT_OUTPUT);
    }

    match fs::write(path, default_config_toml()) {
        Ok(()) => {
            println!("Created {}", CONFIG_FILE_NAME);
            println!();
            println!("Next steps:");
            println!("  put traced frames in svgs/0001.svg, svgs/0002.svg, ...");
            println!("  svg2clip convert");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: failed to write {}: {}", CONFIG_FILE_NAME, e);
            ExitCode::from(EXIT_OUTPUT)
        }
    }
}
