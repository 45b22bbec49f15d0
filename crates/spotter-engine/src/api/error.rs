use thiserror::Error;

use crate::core::layout::Orientation;

/// Errors surfaced by the scene engine.
///
/// Misses, repeated taps and input outside the playing phase are ordinary
/// outcomes and never show up here.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("hotspot {id} is out of range (session has {count})")]
    InvalidHotspot { id: usize, count: usize },

    #[error("no geometry table for {0:?} orientation")]
    InvalidOrientation(Orientation),

    #[error("{orientation:?} geometry has {found} hotspot placements, expected {expected}")]
    GeometryMismatch {
        orientation: Orientation,
        expected: usize,
        found: usize,
    },

    #[error("asset manifest has no image named `{0}`")]
    MissingAsset(String),

    #[error("hotspot count must be at least 1")]
    NoHotspots,

    #[error("outline frame rate must be positive, got {0}")]
    InvalidFrameRate(f32),

    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
