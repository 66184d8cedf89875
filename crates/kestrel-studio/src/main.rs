//! Kestrel studio - runs the engine with the default subsystems.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use kestrel_engine::systems::DefaultFactory;
use kestrel_engine::{Engine, FrameHooks, FrameInfo, SubsystemRegistry};

#[derive(Parser)]
#[command(name = "kestrel-studio")]
#[command(about = "Runs a Kestrel world", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the engine config file
    #[arg(long, default_value = "kestrel.toml")]
    config: PathBuf,

    /// Run without a platform window
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames (headless only)
    #[arg(long, requires = "headless")]
    frames: Option<u64>,

    /// Only tick the component types listed under [editor]
    #[arg(long)]
    editor: bool,
}

/// Logs the frame rate once per second of frames.
struct FpsReport {
    every: u64,
}

impl FrameHooks for FpsReport {
    fn after_render(&mut self, info: &FrameInfo, _registry: &SubsystemRegistry) {
        if info.frame_index > 0 && info.frame_index % self.every == 0 {
            log::info!("frame {}: {} FPS", info.frame_index, info.fps);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        log::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut factory = if cli.headless {
        DefaultFactory::headless(cli.frames)
    } else {
        DefaultFactory::desktop()
    };

    let mut engine = Engine::new();
    engine.start(&cli.config, &mut factory)?;

    if cli.editor {
        engine.enter_editor_mode();
    }
    engine.frame_loop_mut().add_hook(FpsReport { every: 60 });

    engine.run();
    engine.shutdown();
    Ok(())
}
