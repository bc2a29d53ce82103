use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vista_camera::{CameraController, Settings};
use vista_render::{DebugTextRenderer, RenderView, Renderer};

mod script;

use script::Script;

#[derive(Parser)]
#[command(name = "vista-cli", about = "Headless tools for the vista camera controller")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default settings as JSON
    Defaults,
    /// Replay a JSON input script and print the final camera
    Simulate {
        /// Input script: { "frames": [ { "press": [...], "dt": 0.016, ... } ] }
        #[arg(short, long)]
        script: PathBuf,
        /// Settings file; defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Aspect ratio used for the projection
        #[arg(long, default_value = "1.3333")]
        aspect: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("vista-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", vista_common::crate_info());
            println!("input: {}", vista_input::crate_info());
            println!("camera: {}", vista_camera::crate_info());
            println!("render: {}", vista_render::crate_info());
        }
        Commands::Defaults => {
            println!("{}", Settings::default().to_json_pretty()?);
        }
        Commands::Simulate {
            script,
            config,
            aspect,
        } => {
            let settings = match &config {
                Some(path) => Settings::load(path)
                    .with_context(|| format!("failed to load settings from {}", path.display()))?,
                None => Settings::default(),
            };
            let input = Script::load(&script)
                .with_context(|| format!("failed to load script {}", script.display()))?;

            let camera = CameraController::try_new(settings.controller)?;
            let outcome = input.run(camera);
            println!(
                "Simulated {} frames ({:.3}s)",
                outcome.frames, outcome.elapsed
            );

            let view = RenderView::capture(&outcome.camera, outcome.mix, aspect);
            print!("{}", DebugTextRenderer::new().render(&view));
        }
    }

    Ok(())
}
