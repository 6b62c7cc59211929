//! Frame-loop owner: input aggregation, background asset loads and the
//! simulation context.

use std::path::Path;

use crate::config::SimConfig;
use crate::loaders::{load_character_rig, load_world_colliders, AssetLoad, CharacterRig};
use crate::traits::Controller;

use super::collision::ColliderBox;
use super::context::{FrameOutput, SimContext};
use super::input::{AnalogInput, InputAggregator};

pub struct App {
    context: SimContext,
    aggregator: InputAggregator,
    world_load: Option<AssetLoad<Vec<ColliderBox>>>,
    character_load: Option<AssetLoad<CharacterRig>>,
}

impl App {
    pub fn new(config: SimConfig) -> Self {
        log::info!(
            "Simulation starting at {:?} with {} mission markers",
            config.world.spawn,
            config.missions.markers.len()
        );
        let aggregator = InputAggregator::new(&config.input);
        Self {
            context: SimContext::new(config),
            aggregator,
            world_load: None,
            character_load: None,
        }
    }

    pub fn context(&self) -> &SimContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.context
    }

    /// Start reading the world model; colliders are registered when it finishes
    pub fn load_world(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let blocked = self.context.config().collision.blocked_meshes.clone();
        let label = path.display().to_string();
        self.world_load = Some(AssetLoad::spawn(label, move || {
            load_world_colliders(&path, &blocked)
        }));
    }

    /// Start reading the character model; clips are attached when it finishes
    pub fn load_character(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        self.character_load = Some(AssetLoad::spawn(label, move || load_character_rig(&path)));
    }

    /// Hand in a world load started elsewhere
    pub fn set_world_load(&mut self, load: AssetLoad<Vec<ColliderBox>>) {
        self.world_load = Some(load);
    }

    pub fn set_character_load(&mut self, load: AssetLoad<CharacterRig>) {
        self.character_load = Some(load);
    }

    pub fn assets_pending(&self) -> bool {
        self.world_load.is_some() || self.character_load.is_some()
    }

    /// Pick up finished loads without blocking
    pub fn poll_assets(&mut self) {
        if let Some(result) = self.world_load.as_mut().and_then(AssetLoad::poll_ready) {
            self.world_load = None;
            self.apply_world(result);
        }
        if let Some(result) = self.character_load.as_mut().and_then(AssetLoad::poll_ready) {
            self.character_load = None;
            self.apply_character(result);
        }
    }

    /// Block until every pending load has finished
    pub async fn finish_loading(&mut self) {
        if let Some(load) = self.world_load.take() {
            let result = load.await;
            self.apply_world(result);
        }
        if let Some(load) = self.character_load.take() {
            let result = load.await;
            self.apply_character(result);
        }
    }

    fn apply_world(&mut self, result: anyhow::Result<Vec<ColliderBox>>) {
        match result {
            Ok(colliders) => self.context.register_colliders(colliders),
            // the world stays walkable without colliders
            Err(e) => log::warn!("World load failed, continuing without colliders: {e:#}"),
        }
    }

    fn apply_character(&mut self, result: anyhow::Result<CharacterRig>) {
        match result {
            Ok(rig) => self.context.attach_character(rig),
            Err(e) => log::warn!("Character load failed, continuing without animation: {e:#}"),
        }
    }

    /// One frame: finished loads, input, then the simulation tick
    pub fn frame(
        &mut self,
        controller: &dyn Controller,
        analog: &AnalogInput,
        raw_dt: f32,
    ) -> FrameOutput {
        self.poll_assets();
        let intent = self.aggregator.aggregate(controller, analog);
        self.context.tick(&intent, raw_dt)
    }

    /// Drop pending loads; their threads finish on their own
    pub fn shutdown(self) {
        if self.assets_pending() {
            log::info!("Shutting down with asset loads still pending");
        }
        log::info!("Simulation stopped after {} frames", self.context.frame());
    }
}
