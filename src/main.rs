use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufWriter, Write};

use scene_sim::cli::Cli;
use scene_sim::config::SimConfig;
use scene_sim::core::Clock;
use scene_sim::script::InputScript;
use scene_sim::sim::App;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimConfig::load(cli.config.as_deref())?;
    let script = match &cli.script {
        Some(path) => InputScript::from_json_file(path)?,
        None => InputScript::idle(cli.frames),
    };
    log::info!("Running {} frames at dt={}", script.total_frames(), cli.dt);

    let mut app = App::new(config);
    if let Some(path) = &cli.world {
        app.load_world(path);
    }
    if let Some(path) = &cli.character {
        app.load_character(path);
    }
    if cli.wait_for_assets {
        pollster::block_on(app.finish_loading());
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut clock = Clock::new();
    let mut last = None;
    for (controller, analog) in script.frames() {
        let dt = if cli.realtime { clock.tick() } else { cli.dt };
        let frame = app.frame(&controller, &analog, dt);
        if !cli.summary && !cli.quiet {
            serde_json::to_writer(&mut out, &frame).context("Failed to encode frame")?;
            writeln!(out)?;
        }
        last = Some(frame);
    }

    if cli.summary && !cli.quiet {
        match &last {
            Some(frame) => {
                serde_json::to_writer_pretty(&mut out, frame).context("Failed to encode frame")?;
                writeln!(out)?;
            }
            None => log::warn!("Script contained no frames"),
        }
    }
    out.flush()?;

    app.shutdown();
    Ok(())
}
