// extensions/easing.rs
//
// Easing curves for cosmetic tweens. Serialized by name so a browser
// renderer can pick the matching curve; the engine never samples them.

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    SineIn,
    SineOut,
    SineInOut,
}
