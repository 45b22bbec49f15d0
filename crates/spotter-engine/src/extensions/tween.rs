// extensions/tween.rs
//
// Declarative tween descriptors. The renderer owns playback.
//
// Usage:
//   renderer.tween(cover, Tween::fade_in(0.8, Easing::Linear));
//   renderer.tween(button, Tween::scale(1.0, 1.1, 1.0, Easing::Linear).with_loop(TweenLoop::PingPong));

use serde::Serialize;
use super::easing::Easing;

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum TweenTarget {
    /// Element alpha.
    Alpha { from: f32, to: f32 },
    /// Uniform element scale.
    Scale { from: f32, to: f32 },
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenLoop {
    /// Stop at the end value.
    #[default]
    Once,
    /// Restart from the beginning.
    Loop,
    /// Reverse direction every cycle (yoyo), forever.
    PingPong,
}

/// A single tween animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tween {
    pub target: TweenTarget,
    /// Seconds per cycle.
    pub duration: f32,
    pub easing: Easing,
    pub loop_mode: TweenLoop,
}

impl Tween {
    pub fn alpha(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            target: TweenTarget::Alpha { from, to },
            duration,
            easing,
            loop_mode: TweenLoop::Once,
        }
    }

    pub fn fade_in(duration: f32, easing: Easing) -> Self {
        Self::alpha(0.0, 1.0, duration, easing)
    }

    pub fn fade_out(duration: f32, easing: Easing) -> Self {
        Self::alpha(1.0, 0.0, duration, easing)
    }

    pub fn scale(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            target: TweenTarget::Scale { from, to },
            duration,
            easing,
            loop_mode: TweenLoop::Once,
        }
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }
}
