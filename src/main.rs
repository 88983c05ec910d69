use std::path::PathBuf;

use anyhow::Context;
use clap::{ Parser, ValueEnum };
use log::{ info, LevelFilter };

use whitted::consts::DEFAULT_OUT_FILE;
use whitted::parallel::render_parallel;
use whitted::scene::Scene;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders a JSON scene description to a PPM image.
#[derive(Debug, Parser)]
#[clap(name = "whitted", version, about)]
struct Args {
    /// The scene description to render.
    scene: PathBuf,

    /// Where to write the rendered image.
    #[clap(short, long, default_value = DEFAULT_OUT_FILE)]
    output: PathBuf,

    /// Draw surfaces with their flat color, without lights or shadows.
    #[clap(long)]
    flat: bool,

    /// Number of render threads; 0 uses one per logical CPU.
    #[clap(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Logging verbosity.
    #[clap(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    let scene = Scene::load(&args.scene)
        .with_context(|| format!("failed to load {}", args.scene.display()))?;

    let canvas = render_parallel(&scene, !args.flat, args.threads)
        .context("failed to render scene")?;

    canvas.save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!("wrote {}", args.output.display());
    Ok(())
}
