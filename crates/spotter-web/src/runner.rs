use std::time::Duration;

use spotter_engine::{
    AssetManifest, CommandRecorder, GameConfig, GameError, InputEvent, InputQueue, ScreenComposer, Size,
};

/// Wires the scene composer to a browser host.
///
/// The page pushes input as it arrives and calls `tick` once per animation
/// frame. Each tick drains input in arrival order, then advances scene
/// timers. Render commands and game events accumulate until the page
/// drains them as JSON.
pub struct GameRunner {
    composer: ScreenComposer<CommandRecorder>,
    input: InputQueue,
}

impl GameRunner {
    /// Build the scene. An empty `config_json` selects the default scene.
    pub fn new(config_json: &str, manifest_json: &str, width: f32, height: f32) -> Result<Self, GameError> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        let manifest = AssetManifest::from_json(manifest_json)?;
        let composer = ScreenComposer::new(config, &manifest, CommandRecorder::new(), Size::new(width, height))?;

        Ok(Self {
            composer,
            input: InputQueue::new(),
        })
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: route queued input, then advance timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !self.input.is_empty() {
            log::debug!("spotter: routing {} input events", self.input.len());
        }
        for event in self.input.drain() {
            if let Err(err) = self.composer.handle_input(event) {
                log::warn!("spotter: dropped {:?}: {}", event, err);
            }
        }

        match Duration::try_from_secs_f32(dt) {
            Ok(dt) => self.composer.advance(dt),
            Err(_) => log::warn!("spotter: ignored frame time {}", dt),
        }
    }

    /// Render commands recorded since the last call, as a JSON array.
    pub fn drain_commands_json(&mut self) -> String {
        match self.composer.renderer_mut().drain_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("spotter: failed to encode render commands: {}", err);
                String::from("[]")
            }
        }
    }

    /// Game events queued since the last call, as a JSON array.
    pub fn drain_events_json(&mut self) -> String {
        let events = self.composer.drain_events();
        match serde_json::to_string(&events) {
            Ok(json) => json,
            Err(err) => {
                log::error!("spotter: failed to encode game events: {}", err);
                String::from("[]")
            }
        }
    }

    pub fn composer(&self) -> &ScreenComposer<CommandRecorder> {
        &self.composer
    }

    /// Tear the scene down. Returns the final command batch, which destroys
    /// every element still on screen.
    pub fn shutdown(self) -> String {
        let mut recorder = self.composer.shutdown();
        match recorder.drain_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("spotter: failed to encode render commands: {}", err);
                String::from("[]")
            }
        }
    }
}
