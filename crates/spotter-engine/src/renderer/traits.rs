//! Renderer contract.
//!
//! The engine never draws. It creates elements, positions them and asks for
//! cosmetic effects through this trait; the implementation decodes images,
//! plays animations and tweens, and emits particles. Handles are opaque to
//! the engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::ElementHandle;
use crate::assets::manifest::AssetManifest;
use crate::core::layout::Size;
use crate::extensions::tween::Tween;

/// What kind of element to create.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Static image from the manifest.
    Image { asset: String },
    /// Image that can play frame animations.
    Sprite { asset: String },
    Text { content: String, style: TextStyle },
    /// Solid rectangle, sized with [`Renderer::set_size`].
    Overlay { color: u32, alpha: f32 },
    /// Groups children; child positions are relative to the container.
    Container,
}

/// Font and decoration for text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. "bold 50px Arial".
    pub font: String,
    pub color: String,
    #[serde(default)]
    pub shadow_blur: f32,
    /// Corner tints (top-left, top-right, bottom-left, bottom-right).
    #[serde(default)]
    pub gradient: Option<[u32; 4]>,
}

impl TextStyle {
    /// White, centered text without decoration.
    pub fn plain(font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            color: "#ffffff".into(),
            shadow_blur: 0.0,
            gradient: None,
        }
    }

    /// White text with a soft drop shadow.
    pub fn headline(font: impl Into<String>) -> Self {
        Self {
            shadow_blur: 10.0,
            ..Self::plain(font)
        }
    }

    pub fn with_gradient(mut self, corners: [u32; 4]) -> Self {
        self.gradient = Some(corners);
        self
    }
}

/// A frame-sequence animation registered once and played on sprites.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationDef {
    /// Asset keys, one per frame.
    pub frames: Vec<String>,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
}

impl AnimationDef {
    pub fn from_frames(frames: Vec<String>, fps: f32, looping: bool) -> Self {
        Self {
            frames,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Play time of one pass through all frames.
    pub fn total_duration(&self) -> f32 {
        self.frame_duration * self.frames.len() as f32
    }
}

/// Fire-and-forget particle emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleBurst {
    pub asset: String,
    /// Initial particle speed, pixels/s.
    pub speed: f32,
    /// Downward acceleration, pixels/s².
    pub gravity_y: f32,
    pub scale: f32,
    /// How long the emitter keeps emitting.
    pub duration_ms: u64,
}

impl Default for ParticleBurst {
    fn default() -> Self {
        Self {
            asset: "sparkle".into(),
            speed: 50.0,
            gravity_y: 150.0,
            scale: 1.0,
            duration_ms: 100,
        }
    }
}

/// The capability surface the scene needs from a rendering backend.
///
/// Animation completion is reported back through
/// [`InputEvent::AnimationComplete`](crate::input::queue::InputEvent), never
/// through a callback, so no game state depends on playback.
pub trait Renderer {
    /// Load every image in the manifest.
    fn load_assets(&mut self, manifest: &AssetManifest);

    /// Register a named frame animation.
    fn define_animation(&mut self, name: &str, def: &AnimationDef);

    /// Spawn an element, optionally as a child of a container.
    fn create_element(&mut self, kind: ElementKind, parent: Option<ElementHandle>) -> ElementHandle;

    fn set_position(&mut self, handle: ElementHandle, pos: Vec2);

    fn set_scale(&mut self, handle: ElementHandle, scale: Vec2);

    /// Size of an overlay rectangle.
    fn set_size(&mut self, handle: ElementHandle, size: Size);

    /// Anchor point, (0, 0) top-left to (1, 1) bottom-right.
    fn set_origin(&mut self, handle: ElementHandle, origin: Vec2);

    fn set_flip_x(&mut self, handle: ElementHandle, flip: bool);

    fn set_alpha(&mut self, handle: ElementHandle, alpha: f32);

    /// Draw order; higher is on top.
    fn set_depth(&mut self, handle: ElementHandle, depth: i32);

    fn set_visible(&mut self, handle: ElementHandle, visible: bool);

    /// Remove an element and its children.
    fn destroy(&mut self, handle: ElementHandle);

    /// Play a registered animation once on a sprite.
    fn play_animation(&mut self, handle: ElementHandle, animation: &str);

    /// Start a tween. It replaces any tween already running on the same
    /// property of `handle`.
    fn tween(&mut self, handle: ElementHandle, tween: Tween);

    fn spawn_particle_burst(&mut self, at: Vec2, burst: &ParticleBurst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_duration() {
        let def = AnimationDef::from_frames(vec!["a".into(), "b".into(), "c".into()], 24.0, false);
        assert_eq!(def.frame_count(), 3);
        assert!((def.total_duration() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn headline_adds_shadow() {
        let style = TextStyle::headline("bold 50px Arial");
        assert_eq!(style.shadow_blur, 10.0);
        assert_eq!(style.color, "#ffffff");
        assert!(style.gradient.is_none());
    }
}
