//! Synthetic end-to-end demo: simulated scans through an affine model
//! onto an in-memory surface, with a wandering heading.

use std::collections::HashMap;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use indoor_locator::{
    adapter::{BufferSurface, LinearModel, SimulatedScanner},
    Bitmap, Color, FeatureIndex, FeatureScaler, LocatorConfig, LocatorResult, LocatorSession,
};

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "indoor-locator synthetic demo")]
struct Args {
    /// Tick budget in milliseconds
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// How long to run before stopping, in seconds
    #[arg(long, default_value = "5")]
    run_secs: u64,

    /// Feature-index JSON (ssid -> slot); a built-in 4-AP index if omitted
    #[arg(long, value_name = "PATH")]
    index: Option<PathBuf>,

    /// Feature-vector length N (must match the index)
    #[arg(long, default_value = "5")]
    feature_len: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn builtin_index(feature_len: usize) -> LocatorResult<FeatureIndex> {
    let mut slots = HashMap::new();
    for (i, ssid) in ["AP1", "AP2", "AP3", "AP4"].iter().enumerate() {
        slots.insert((*ssid).to_string(), i);
    }
    FeatureIndex::from_map(slots, feature_len)
}

fn main() -> LocatorResult<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(
            args.log_level
                .parse::<tracing_subscriber::filter::LevelFilter>()
                .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .with_target(false)
        .init();

    let config = LocatorConfig::default()
        .with_feature_len(args.feature_len)
        .with_tick_ms(args.tick_ms);
    config.validate()?;

    let index = match &args.index {
        Some(path) => FeatureIndex::load(path, config.feature_len)?,
        None => builtin_index(config.feature_len)?,
    };
    info!(known_aps = index.len(), "feature index ready");

    // Map the first two signal slots onto the grid, ignoring the rest.
    let mut wx = vec![0.0; config.feature_len];
    let mut wy = vec![0.0; config.feature_len];
    wx[0] = 0.1;
    wy[1] = 0.1;
    let model = LinearModel::from_parts(vec![wx, wy], vec![0.0, 0.0], config.feature_len)?;

    let ssids = (1..=4).map(|i| format!("AP{i}")).collect();
    let surface = BufferSurface::new(800, 600);
    let probe = surface.probe();

    let mut session = LocatorSession::new(
        config,
        index,
        FeatureScaler::identity(args.feature_len),
        Box::new(SimulatedScanner::new(ssids)),
        Box::new(model),
        Box::new(surface),
        Bitmap::solid(24, 24, Color::BLACK),
    )?;

    session.surface_ready();

    // Stand in for the orientation sensor: sweep the heading while the
    // loop runs on its own thread.
    let deadline = std::time::Instant::now() + Duration::from_secs(args.run_secs);
    let mut heading = 0;
    while std::time::Instant::now() < deadline {
        session.set_heading(heading);
        heading = (heading + 15) % 360;
        thread::sleep(Duration::from_millis(250));
    }

    session.surface_destroyed();

    let (x_px, y_px) = session.position_px();
    info!(
        frames = probe.frames_presented(),
        x_px,
        y_px,
        heading = session.heading(),
        "simulation finished"
    );

    Ok(())
}
