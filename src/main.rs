use orbsim::simulation::diagnostics::{total_energy, total_momentum};
use orbsim::Scenario;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file: a path, or a name under `scenarios/`
    #[arg(short, long, default_value = "solar_system.yaml")]
    file_name: String,

    /// Run without a window and log conservation diagnostics
    #[arg(long)]
    headless: bool,

    /// Frames of 1/60 time unit to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// Override the scenario's speed multiplier
    #[arg(long)]
    speed: Option<f64>,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let direct = PathBuf::from(&args.file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name)
    };

    let mut scenario = Scenario::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;
    if let Some(speed) = args.speed {
        scenario.speed = speed;
    }
    Ok(scenario)
}

fn run_headless(scenario: Scenario, frames: usize) {
    let g = scenario.parameters.g;
    let speed = scenario.speed;
    let mut engine = scenario.into_engine();

    let e0 = total_energy(engine.bodies(), g);
    let p0 = total_momentum(engine.bodies());
    info!("start: E = {:.9e}, |p| = {:.9e}", e0, p0.norm());

    let mut steps = 0;
    for _ in 0..frames {
        steps += engine.advance(1.0 / 60.0, speed);
    }

    let e1 = total_energy(engine.bodies(), g);
    let p1 = total_momentum(engine.bodies());
    info!(
        "end after {} sub-steps (t = {:.3}): E = {:.9e} (rel. drift {:.3e}), |p| = {:.9e}",
        steps,
        engine.elapsed(),
        e1,
        ((e1 - e0) / e0).abs(),
        p1.norm()
    );
    for b in engine.bodies() {
        info!("{}: ({:.6}, {:.6}, {:.6})", b.name, b.position.x, b.position.y, b.position.z);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(feature = "viewer")]
    {
        if !args.headless {
            // bevy's LogPlugin installs the subscriber in viewer mode
            let scenario = load_scenario(&args)?;
            orbsim::run_3d(scenario);
            return Ok(());
        }
    }

    init_logging();
    let scenario = load_scenario(&args)?;
    run_headless(scenario, args.frames);

    Ok(())
}
