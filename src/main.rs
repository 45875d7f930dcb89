mod commands;

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, SharedLogger, TermLogger, TerminalMode, WriteLogger};

#[derive(Parser, Debug)]
#[command(name = "massing", about = "Voxel massing grid with an image codec")]
struct Cli {
    /// TOML configuration; defaults apply to anything it leaves out
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Write a training set of random box layouts as square PNGs
    Samples {
        #[arg(long)]
        out: PathBuf,
        /// Overrides `samples.count`
        #[arg(long)]
        count: Option<usize>,
    },
    /// Stamp random boxes and save the ground layer
    Random {
        #[arg(long)]
        out: PathBuf,
        /// Export solid cells as x,y,z,state records
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Number of boxes; drawn from the sample quantity range if omitted
        #[arg(long)]
        boxes: Option<usize>,
    },
    /// Decode an image onto an empty grid and export the result
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Turn pure black pixels into solid columns
        #[arg(long)]
        include_solid: bool,
        /// Write records here instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn init_logging(level: LevelFilter, file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let cfg = simplelog::Config::default();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        cfg.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = file {
        loggers.push(WriteLogger::new(level, cfg, File::create(path)?));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_logging(cli.log_level, cli.log_file.as_ref())?;
    let config = match &cli.config {
        Some(path) => massing_io::load_config(path)?,
        None => massing_io::Config::default(),
    };
    match cli.command {
        Cmd::Samples { out, count } => {
            commands::samples(&config, &out, count)?;
        }
        Cmd::Random { out, csv, boxes } => {
            commands::random(&config, &out, csv.as_deref(), boxes)?;
        }
        Cmd::Decode {
            image,
            include_solid,
            csv,
        } => {
            commands::decode(&config, &image, include_solid, csv.as_deref())?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
