// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-sim")]
#[command(about = "Headless third-person scene simulation", long_about = None)]
pub struct Cli {
    /// JSON config file (falls back to $SCENE_SIM_CONFIG, then defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// World glTF; meshes named in the config become colliders
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Character glTF providing animation clips
    #[arg(long)]
    pub character: Option<PathBuf>,

    /// JSON input script; without one the player idles
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Frames to run when no script is given
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Use measured wall-clock deltas instead of --dt
    #[arg(long, default_value = "false")]
    pub realtime: bool,

    /// Finish loading assets before the first frame
    #[arg(long = "wait-for-assets", default_value = "false")]
    pub wait_for_assets: bool,

    /// Print no frame output at all
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Print only the final frame instead of one JSON line per frame
    #[arg(long, default_value = "false")]
    pub summary: bool,
}
