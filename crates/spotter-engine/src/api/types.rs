use std::fmt;
use serde::{Deserialize, Serialize};

/// Opaque handle to a visual element owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub u32);

/// Index of a hotspot, `0..hotspot_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotspotId(pub usize);

impl fmt::Display for HotspotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An event reported to the host page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Start -> Playing.
    GameStarted,
    /// A hotspot was found. Fires once per hotspot.
    HotspotDiscovered { id: HotspotId },
    /// The outline animation on a found hotspot finished playing.
    OutlineRevealed { id: HotspotId },
    /// A tap that found nothing new.
    PointerMissed { x: f32, y: f32 },
    /// Playing -> Finished. Fires once per session.
    GameFinished,
    /// The call-to-action button was tapped.
    CallToAction,
}
