use anyhow::{Context, Result};
use clap::Parser;
use date_taken_renamer_core::{load_config, rename_directory};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "date-taken-renamer")]
#[command(about = "Renames photos and videos in a folder after the date they were taken")]
struct Cli {
    /// Folder containing the files to rename (defaults to the current folder)
    folder: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;
    init_logging(&config.log_level);

    let folder = resolve_folder(cli.folder)?;
    info!(folder = %folder.display(), "start");
    let summary = rename_directory(&folder)?;

    for line in summary.log() {
        println!("{line}");
    }
    println!("______________________________________");
    println!("Stop       : {}", summary.summary_line());
    Ok(())
}

fn resolve_folder(arg: Option<PathBuf>) -> Result<PathBuf> {
    match arg {
        Some(folder) => Ok(folder),
        None => {
            let cwd = env::current_dir().context("could not resolve the current folder")?;
            println!("Start      : Use current folder");
            Ok(cwd)
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
