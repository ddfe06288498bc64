//! Headless turret simulation.
//!
//! A turret fires bullets from a pool, each hit spawns a spark from a second
//! pool, and both are recycled instead of destroyed. Pools come from a JSON
//! manifest (the bundled one unless `--manifest` is given).

mod components;
mod sim;
mod world;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use recycle_log::{Config, Format};
use recycle_pool::PoolManifest;
use tracing::info;

use crate::sim::{Settings, Simulation};

const BUNDLED_POOLS: &str = include_str!("../pools.json");

#[derive(Debug, Parser)]
#[command(name = "recycle-demo", version, about = "Turret simulation over recycled entity pools")]
struct Args {
    /// Number of simulation ticks
    #[arg(long, default_value_t = 120, env = "RECYCLE_DEMO_TICKS")]
    ticks: u32,

    /// Ticks between two shots
    #[arg(long, default_value_t = 2)]
    fire_every: u32,

    /// Ticks a bullet flies before it hits
    #[arg(long, default_value_t = 9)]
    lifetime: u32,

    /// Pool manifest to load instead of the bundled one
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Log level filter
    #[arg(long, default_value = "info", env = "RECYCLE_LOG")]
    log_level: String,

    /// Log output format (pretty, compact, json)
    #[arg(long, env = "RECYCLE_LOG_FORMAT")]
    log_format: Option<Format>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()
        .with_level(&args.log_level)
        .with_service("recycle-demo");
    if let Some(format) = args.log_format {
        config = config.with_format(format);
    }
    let _guard = recycle_log::init_with(config)?;

    let manifest = match &args.manifest {
        Some(path) => PoolManifest::load(path)
            .with_context(|| format!("loading pool manifest {}", path.display()))?,
        None => PoolManifest::from_json(BUNDLED_POOLS).context("parsing bundled pool manifest")?,
    };

    recycle_pool::init();
    let mut simulation = Simulation::stock(
        &manifest,
        Settings {
            fire_every: args.fire_every,
            lifetime: args.lifetime,
        },
    )?;
    let report = simulation.run(args.ticks);

    info!(
        ticks = report.ticks,
        shots = report.shots,
        impacts = report.impacts,
        dry_impacts = report.dry_impacts,
        entities = report.entities,
        "simulation finished"
    );
    info!(
        created = report.bullets.created,
        active = report.bullets.active,
        pooled = report.bullets.pooled,
        hit_rate = report.bullets.hit_rate(),
        "bullet pool"
    );
    info!(
        created = report.sparks.created,
        active = report.sparks.active,
        pooled = report.sparks.pooled,
        misses = report.sparks.misses,
        "spark pool"
    );

    recycle_pool::shutdown();
    Ok(())
}
