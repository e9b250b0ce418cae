//! Velocity Sampler - trace replay tool
//!
//! Replays recorded pointer traces through the rolling velocity sampler.

use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use velocity_sampler::app::cli::{Cli, Commands, ConfigAction, MappingArg};
use velocity_sampler::app::config::Config;
use velocity_sampler::replay::{ReplaySummary, Replayer, Trace};
use velocity_sampler::time::MonotonicClock;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Pin the clock anchor for untimed trace records
    MonotonicClock::init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Replay {
            input,
            capacity,
            mapping,
            every,
            json,
        } => {
            run_replay(&input, capacity, mapping, every, json, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_replay(
    input: &Path,
    capacity: Option<usize>,
    mapping: Option<MappingArg>,
    every: Option<usize>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Trace file not found: {:?}", input);
    }

    // Command-line overrides go through the same validation as the file
    let mut config = config.clone();
    if let Some(capacity) = capacity {
        config.sampler.capacity = capacity;
    }
    if let Some(mapping) = mapping {
        config.sampler.planar_mapping = mapping.into();
    }
    if let Some(every) = every {
        config.replay.report_every = every;
    }
    config.validate()?;

    let trace = Trace::load(input)?;
    info!(
        "Replaying {} records (capacity {}, {:?} mapping)",
        trace.len(),
        config.sampler.capacity,
        config.sampler.planar_mapping
    );

    let sampler = config.sampler.build(MonotonicClock);
    let mut replayer = Replayer::new(sampler, config.replay.report_every);
    let summary = replayer.run(&trace);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &summary)?;
    } else {
        write_table(&mut out, &summary)?;
    }

    Ok(())
}

fn write_json(out: &mut impl Write, summary: &ReplaySummary) -> anyhow::Result<()> {
    for report in &summary.reports {
        serde_json::to_writer(&mut *out, report)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_table(out: &mut impl Write, summary: &ReplaySummary) -> anyhow::Result<()> {
    writeln!(
        out,
        "{:>6}  {:>10}  {:>28}  {:>28}  {:>10}",
        "index", "t (s)", "position", "velocity", "speed"
    )?;
    for report in &summary.reports {
        writeln!(
            out,
            "{:>6}  {:>10.4}  {:>28}  {:>28}  {:>10.3}",
            report.index,
            report.timestamp,
            report.position.to_string(),
            report.velocity.to_string(),
            report.speed
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "records: {}  stored: {}  evicted: {}  dropped: {}",
        summary.records,
        summary.stored(),
        summary.evicted,
        summary.dropped
    )?;
    writeln!(out, "final velocity: {}", summary.final_velocity)?;
    if let (Some(start), Some(end)) = (summary.start_position, summary.end_position) {
        writeln!(out, "start: {}  end: {}", start, end)?;
    }
    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
        ConfigAction::Init { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {:?}. Use --force to overwrite.",
                    config_path
                );
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Created config at {:?}", config_path);
            println!("\nConfig content:\n{}", default_config.to_toml()?);
        }
    }

    Ok(())
}
