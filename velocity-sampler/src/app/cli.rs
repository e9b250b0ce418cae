//! Command-Line Interface

use crate::sampler::PlanarMapping;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Velocity Sampler - Replay pointer traces through a rolling velocity estimator
#[derive(Parser, Debug)]
#[command(name = "velocity-sampler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a JSON-lines trace and print the velocity estimate
    Replay {
        /// Trace file
        input: PathBuf,

        /// Window size (overrides config)
        #[arg(short = 'n', long)]
        capacity: Option<usize>,

        /// Planar mapping (overrides config)
        #[arg(short, long, value_enum)]
        mapping: Option<MappingArg>,

        /// Report every N stored samples (overrides config)
        #[arg(short, long)]
        every: Option<usize>,

        /// Emit reports as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the default config file location
    Path,

    /// Write the default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Planar mapping as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingArg {
    /// (x, y) -> (x, y, 0)
    Preserve,
    /// (x, y) -> (y, y, 0)
    DuplicateY,
}

impl From<MappingArg> for PlanarMapping {
    fn from(arg: MappingArg) -> Self {
        match arg {
            MappingArg::Preserve => PlanarMapping::Preserve,
            MappingArg::DuplicateY => PlanarMapping::DuplicateY,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
