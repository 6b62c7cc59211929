pub mod cli;
pub mod config;
pub mod core;
pub mod loaders;
pub mod math;
pub mod scene;
pub mod script;
pub mod sim;
pub mod traits;
pub mod types;

pub use config::SimConfig;
pub use sim::{App, FrameOutput, SimContext};
