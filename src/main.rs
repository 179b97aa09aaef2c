use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use memory_match::settings::{load_config, load_config_from, resolve};
use memory_match::tui;

#[derive(Parser)]
#[command(name = "memory-match", about = "Flip cards two at a time and find every pair")]
struct Args {
    /// Palette to deal from (overrides config file)
    #[arg(short, long)]
    palette: Option<String>,

    /// Fixed deal seed (overrides config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Config file to read instead of ~/.memory-match/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    let file_config = match file_config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("memory-match: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = match resolve(&file_config, args.palette.as_deref(), args.seed) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("memory-match: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize file logger - writes to memory-match.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("memory-match.log") {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!("memory-match starting with palette {}", config.palette);

    match tui::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("memory-match: {e}");
            ExitCode::FAILURE
        }
    }
}
