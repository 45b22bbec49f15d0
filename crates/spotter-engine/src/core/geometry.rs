//! Orientation-keyed scene geometry.
//!
//! Each orientation owns a complete table: one placement per hotspot index
//! plus the viewport anchors of the start and end screens. Switching
//! orientation swaps the whole table.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::api::error::GameError;
use super::layout::{Orientation, RelativePlacement, ViewportAnchor};

/// Viewport-relative anchors for the non-hotspot elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenAnchors {
    /// "N hidden ..." banner shown before play starts.
    pub start_banner: ViewportAnchor,
    /// Call-to-action button, visible in every phase.
    pub play_button: ViewportAnchor,
    pub logo: ViewportAnchor,
    pub character: ViewportAnchor,
    /// Origin of the character image, (0, 0) top-left to (1, 1) bottom-right.
    #[serde(default = "centered_origin")]
    pub character_origin: [f32; 2],
    #[serde(default)]
    pub character_flip_x: bool,
    pub end_title: ViewportAnchor,
    pub end_subtitle: ViewportAnchor,
}

fn centered_origin() -> [f32; 2] {
    [0.5, 0.5]
}

/// Everything positioned for one orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationLayout {
    /// Ordered by hotspot index.
    pub hotspots: Vec<RelativePlacement>,
    pub screens: ScreenAnchors,
}

/// The static layout table for the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneGeometry {
    layouts: HashMap<Orientation, OrientationLayout>,
}

impl SceneGeometry {
    pub fn new(layouts: HashMap<Orientation, OrientationLayout>) -> Self {
        Self { layouts }
    }

    /// The full table for an orientation.
    pub fn layout(&self, orientation: Orientation) -> Result<&OrientationLayout, GameError> {
        self.layouts
            .get(&orientation)
            .ok_or(GameError::InvalidOrientation(orientation))
    }

    /// Hotspot placements for an orientation, in index order.
    pub fn hotspots(&self, orientation: Orientation) -> Result<&[RelativePlacement], GameError> {
        self.layout(orientation).map(|l| l.hotspots.as_slice())
    }

    /// Screen anchors for an orientation.
    pub fn screens(&self, orientation: Orientation) -> Result<&ScreenAnchors, GameError> {
        self.layout(orientation).map(|l| &l.screens)
    }

    /// Check that every present table has exactly `count` hotspot rows.
    pub fn validate(&self, count: usize) -> Result<(), GameError> {
        for (&orientation, layout) in &self.layouts {
            if layout.hotspots.len() != count {
                return Err(GameError::GeometryMismatch {
                    orientation,
                    expected: count,
                    found: layout.hotspots.len(),
                });
            }
        }
        Ok(())
    }

    /// The tables shipped with the five-dog scene.
    pub fn reference() -> Self {
        let landscape = OrientationLayout {
            hotspots: vec![
                RelativePlacement::new(0.156, 0.347, 0.66),
                RelativePlacement::new(0.569, 0.391, 0.46),
                RelativePlacement::at(0.68, 0.74),
                RelativePlacement::new(0.9, 0.57, 0.6),
                RelativePlacement::new(0.66, 0.5, 0.37),
            ],
            screens: ScreenAnchors {
                start_banner: ViewportAnchor::new(0.5, 0.48, 1.0),
                play_button: ViewportAnchor::new(0.5, 0.9, 1.0),
                logo: ViewportAnchor::new(0.5, 0.2, 1.0),
                character: ViewportAnchor::new(0.0, 1.0, 0.6),
                character_origin: [0.0, 1.0],
                character_flip_x: false,
                end_title: ViewportAnchor::new(0.5, 0.47, 1.0),
                end_subtitle: ViewportAnchor::new(0.5, 0.65, 1.0),
            },
        };

        let portrait = OrientationLayout {
            hotspots: vec![
                RelativePlacement::new(0.505, 0.448, 0.45),
                RelativePlacement::new(0.652, 0.512, 0.35),
                RelativePlacement::new(0.665, 0.75, 0.9),
                RelativePlacement::new(0.365, 0.388, 0.6),
                RelativePlacement::new(0.59, 0.05, 0.5),
            ],
            screens: ScreenAnchors {
                start_banner: ViewportAnchor::new(0.5, 0.48, 0.5),
                play_button: ViewportAnchor::new(0.5, 0.9, 1.0),
                logo: ViewportAnchor::new(0.5, 0.17, 0.8),
                character: ViewportAnchor::new(0.5, 0.6, 0.5),
                character_origin: [0.5, 0.5],
                character_flip_x: true,
                end_title: ViewportAnchor::new(0.5, 0.63, 1.0),
                end_subtitle: ViewportAnchor::new(0.5, 0.75, 1.0),
            },
        };

        let mut layouts = HashMap::new();
        layouts.insert(Orientation::Landscape, landscape);
        layouts.insert(Orientation::Portrait, portrait);
        Self { layouts }
    }
}

impl Default for SceneGeometry {
    fn default() -> Self {
        Self::reference()
    }
}
