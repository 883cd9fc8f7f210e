use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use sim::{CatalogError, Catalogs, Health, SimConfig, SimEvent, World};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const SEED_ENV_VAR: &str = "VSHOOT_SEED";
const TICKS_ENV_VAR: &str = "VSHOOT_TICKS";
const SHIP_ENV_VAR: &str = "VSHOOT_SHIP";
const CATALOG_DIR_ENV_VAR: &str = "VSHOOT_CATALOG_DIR";
const REPORT_ENV_VAR: &str = "VSHOOT_REPORT";

const DEFAULT_SEED: u64 = 0;
const DEFAULT_TICK_COUNT: u32 = 3600;
const FIXED_DT_MS: f32 = 1000.0 / 60.0;
const SWEEP_MARGIN_PX: f32 = 160.0;

struct RunSettings {
    seed: u64,
    ticks: u32,
    ship_key: Option<String>,
    catalog_dir: Option<PathBuf>,
    report_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("failed to load catalogs: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to encode run report: {0}")]
    EncodeReport(#[source] serde_json::Error),
    #[error("failed to write run report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default)]
struct RunTally {
    shots_fired: u32,
    waves_announced: u32,
    bosses_defeated: u32,
    power_ups_applied: u32,
}

#[derive(Debug, PartialEq, Serialize)]
struct RunReport {
    seed: u64,
    ship: String,
    ticks_requested: u32,
    ticks_run: u32,
    sim_time_ms: f64,
    score: u32,
    level: u32,
    player_alive: bool,
    player_health: i32,
    shots_fired: u32,
    enemies_spawned: u64,
    waves_announced: u32,
    bosses_defeated: u32,
    power_ups_applied: u32,
}

fn run(settings: RunSettings) -> Result<(), RunError> {
    let catalogs = match &settings.catalog_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "loading_catalogs");
            Catalogs::load_from_dir(dir)?
        }
        None => Catalogs::builtin(),
    };

    let report = drive_world(&settings, catalogs)?;
    info!(
        score = report.score,
        level = report.level,
        ticks = report.ticks_run,
        sim_time_ms = report.sim_time_ms,
        shots = report.shots_fired,
        enemies = report.enemies_spawned,
        player_alive = report.player_alive,
        "run_complete"
    );

    if let Some(path) = &settings.report_path {
        write_report(path, &report)?;
    }
    Ok(())
}

fn drive_world(settings: &RunSettings, catalogs: Catalogs) -> Result<RunReport, CatalogError> {
    let mut config = SimConfig {
        rng_seed: settings.seed,
        ..SimConfig::default()
    };
    if let Some(ship) = &settings.ship_key {
        config.ship_key.clone_from(ship);
    }
    let mut world = World::new(config, catalogs)?;

    let mut tally = RunTally::default();
    let mut heading = 1.0f32;
    let mut ticks_run = 0u32;
    for _ in 0..settings.ticks {
        heading = steer(
            world.player().entity.position.x,
            world.config().play_width,
            heading,
        );
        world.move_player(heading, 0.0, FIXED_DT_MS);
        if world.fire_player_weapon() {
            tally.shots_fired += 1;
        }
        world.tick(FIXED_DT_MS);
        ticks_run += 1;
        for event in world.drain_events() {
            note_event(event, &mut tally);
        }
        if !world.player().entity.active {
            info!(tick = ticks_run, "run_ended_early");
            break;
        }
    }

    Ok(RunReport {
        seed: settings.seed,
        ship: world.player().ship_key.clone(),
        ticks_requested: settings.ticks,
        ticks_run,
        sim_time_ms: world.now_ms(),
        score: world.score(),
        level: world.level(),
        player_alive: world.player().entity.active,
        player_health: world
            .player()
            .entity
            .health
            .as_ref()
            .map(Health::current)
            .unwrap_or(0),
        shots_fired: tally.shots_fired,
        enemies_spawned: world.pools().enemies.enabled_total(),
        waves_announced: tally.waves_announced,
        bosses_defeated: tally.bosses_defeated,
        power_ups_applied: tally.power_ups_applied,
    })
}

fn note_event(event: SimEvent, tally: &mut RunTally) {
    debug!(event = ?event, "sim_event");
    match event {
        SimEvent::WaveIncoming { .. } => tally.waves_announced += 1,
        SimEvent::BossDefeated => tally.bosses_defeated += 1,
        SimEvent::PowerUpApplied { .. } => tally.power_ups_applied += 1,
        _ => {}
    }
}

fn steer(player_x: f32, play_width: f32, heading: f32) -> f32 {
    if player_x <= SWEEP_MARGIN_PX {
        1.0
    } else if player_x >= play_width - SWEEP_MARGIN_PX {
        -1.0
    } else {
        heading
    }
}

fn write_report(path: &Path, report: &RunReport) -> Result<(), RunError> {
    let json = serde_json::to_string_pretty(report).map_err(RunError::EncodeReport)?;
    std::fs::write(path, json).map_err(|source| RunError::WriteReport {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "report_written");
    Ok(())
}

fn main() {
    init_tracing();
    info!("=== VShoot Startup ===");

    if let Err(err) = run(settings_from_env()) {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn settings_from_env() -> RunSettings {
    RunSettings {
        seed: parse_env_number(SEED_ENV_VAR, non_empty_env(SEED_ENV_VAR), DEFAULT_SEED),
        ticks: parse_env_number(TICKS_ENV_VAR, non_empty_env(TICKS_ENV_VAR), DEFAULT_TICK_COUNT),
        ship_key: non_empty_env(SHIP_ENV_VAR),
        catalog_dir: non_empty_env(CATALOG_DIR_ENV_VAR).map(PathBuf::from),
        report_path: non_empty_env(REPORT_ENV_VAR).map(PathBuf::from),
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_env_number<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> T {
    let Some(text) = raw else {
        return default;
    };
    match text.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(var, value = %text, "ignoring_unparseable_env_value");
            default
        }
    }
}
