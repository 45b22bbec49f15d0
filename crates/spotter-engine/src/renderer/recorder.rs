//! A [`Renderer`] that records every call as a serializable command.
//!
//! The web bridge drains the recorder once per frame and hands the batch to
//! the page as JSON; tests inspect the batch directly.

use std::collections::HashMap;
use glam::Vec2;
use serde::Serialize;

use crate::api::types::ElementHandle;
use crate::assets::manifest::{AssetManifest, ImageDescriptor};
use crate::core::layout::Size;
use crate::extensions::tween::Tween;
use super::traits::{AnimationDef, ElementKind, ParticleBurst, Renderer};

/// One renderer call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderCommand {
    LoadImage { key: String, image: ImageDescriptor },
    DefineAnimation { name: String, def: AnimationDef },
    Create { handle: ElementHandle, kind: ElementKind, parent: Option<ElementHandle> },
    Position { handle: ElementHandle, pos: Vec2 },
    Scale { handle: ElementHandle, scale: Vec2 },
    Size { handle: ElementHandle, size: Size },
    Origin { handle: ElementHandle, origin: Vec2 },
    FlipX { handle: ElementHandle, flip: bool },
    Alpha { handle: ElementHandle, alpha: f32 },
    Depth { handle: ElementHandle, depth: i32 },
    Visible { handle: ElementHandle, visible: bool },
    Destroy { handle: ElementHandle },
    PlayAnimation { handle: ElementHandle, animation: String },
    Tween { handle: ElementHandle, tween: Tween },
    Particles { at: Vec2, burst: ParticleBurst },
}

/// Command-buffer renderer.
#[derive(Debug)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
    next_handle: u32,
    /// Live element → parent.
    live: HashMap<ElementHandle, Option<ElementHandle>>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            next_handle: 1,
            live: HashMap::new(),
        }
    }

    /// Commands recorded since the last drain.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Take all pending commands.
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Take all pending commands as a JSON array.
    pub fn drain_json(&mut self) -> Result<String, serde_json::Error> {
        let batch = self.drain();
        serde_json::to_string(&batch)
    }

    /// Number of elements created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: ElementHandle) -> bool {
        self.live.contains_key(&handle)
    }

    fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    fn forget_subtree(&mut self, root: ElementHandle) {
        let children: Vec<ElementHandle> = self
            .live
            .iter()
            .filter(|(_, parent)| **parent == Some(root))
            .map(|(&child, _)| child)
            .collect();
        for child in children {
            self.forget_subtree(child);
        }
        self.live.remove(&root);
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CommandRecorder {
    fn load_assets(&mut self, manifest: &AssetManifest) {
        let mut keys: Vec<&String> = manifest.images.keys().collect();
        keys.sort();
        for key in keys {
            let image = manifest.images[key].clone();
            self.push(RenderCommand::LoadImage { key: key.clone(), image });
        }
    }

    fn define_animation(&mut self, name: &str, def: &AnimationDef) {
        self.push(RenderCommand::DefineAnimation {
            name: name.to_string(),
            def: def.clone(),
        });
    }

    fn create_element(&mut self, kind: ElementKind, parent: Option<ElementHandle>) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, parent);
        self.push(RenderCommand::Create { handle, kind, parent });
        handle
    }

    fn set_position(&mut self, handle: ElementHandle, pos: Vec2) {
        self.push(RenderCommand::Position { handle, pos });
    }

    fn set_scale(&mut self, handle: ElementHandle, scale: Vec2) {
        self.push(RenderCommand::Scale { handle, scale });
    }

    fn set_size(&mut self, handle: ElementHandle, size: Size) {
        self.push(RenderCommand::Size { handle, size });
    }

    fn set_origin(&mut self, handle: ElementHandle, origin: Vec2) {
        self.push(RenderCommand::Origin { handle, origin });
    }

    fn set_flip_x(&mut self, handle: ElementHandle, flip: bool) {
        self.push(RenderCommand::FlipX { handle, flip });
    }

    fn set_alpha(&mut self, handle: ElementHandle, alpha: f32) {
        self.push(RenderCommand::Alpha { handle, alpha });
    }

    fn set_depth(&mut self, handle: ElementHandle, depth: i32) {
        self.push(RenderCommand::Depth { handle, depth });
    }

    fn set_visible(&mut self, handle: ElementHandle, visible: bool) {
        self.push(RenderCommand::Visible { handle, visible });
    }

    fn destroy(&mut self, handle: ElementHandle) {
        self.forget_subtree(handle);
        self.push(RenderCommand::Destroy { handle });
    }

    fn play_animation(&mut self, handle: ElementHandle, animation: &str) {
        self.push(RenderCommand::PlayAnimation {
            handle,
            animation: animation.to_string(),
        });
    }

    fn tween(&mut self, handle: ElementHandle, tween: Tween) {
        self.push(RenderCommand::Tween { handle, tween });
    }

    fn spawn_particle_burst(&mut self, at: Vec2, burst: &ParticleBurst) {
        self.push(RenderCommand::Particles { at, burst: burst.clone() });
    }
}
