use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::api::error::GameError;
use crate::core::geometry::SceneGeometry;
use crate::core::layout::FitMode;
use crate::extensions::easing::Easing;
use crate::renderer::traits::{AnimationDef, ParticleBurst, TextStyle};

/// Scene configuration. Every field has a default matching the shipped
/// five-dog scene, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of hidden objects. Geometry tables must have this many rows.
    pub hotspot_count: usize,
    /// How the background is scaled into the viewport.
    pub fit_mode: FitMode,
    pub assets: AssetKeys,
    pub outline: OutlineConfig,
    pub timings: Timings,
    pub easing: SceneEasing,
    pub cover: CoverConfig,
    /// Particle burst spawned on taps that find nothing.
    pub miss_burst: ParticleBurst,
    pub text: ScreenText,
    pub geometry: SceneGeometry,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hotspot_count: 5,
            fit_mode: FitMode::Contain,
            assets: AssetKeys::default(),
            outline: OutlineConfig::default(),
            timings: Timings::default(),
            easing: SceneEasing::default(),
            cover: CoverConfig::default(),
            miss_burst: ParticleBurst::default(),
            text: ScreenText::default(),
            geometry: SceneGeometry::reference(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.hotspot_count == 0 {
            return Err(GameError::NoHotspots);
        }
        let rate = self.outline.frame_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(GameError::InvalidFrameRate(rate));
        }
        self.geometry.validate(self.hotspot_count)
    }

    /// Delay between the last discovery and the end screen: the outline
    /// animation runs out, then the grace period.
    pub fn finish_delay(&self) -> Duration {
        self.outline.duration() + self.timings.finish_grace()
    }
}

/// Asset keys the scene looks up in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetKeys {
    pub background: String,
    pub hotspot: String,
    pub button: String,
    pub character: String,
    pub logo: String,
}

impl Default for AssetKeys {
    fn default() -> Self {
        Self {
            background: "bg".into(),
            hotspot: "doggy".into(),
            button: "button".into(),
            character: "char".into(),
            logo: "logo".into(),
        }
    }
}

/// The frame-by-frame outline drawn around a found hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Animation name registered with the renderer.
    pub animation: String,
    /// Image shown before the first frame.
    pub base_asset: String,
    /// Frame keys are `{frame_prefix}{i}` for `i` in `1..=frame_count`.
    pub frame_prefix: String,
    pub frame_count: u32,
    pub frame_rate: f32,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            animation: "outline_reveal".into(),
            base_asset: "circle".into(),
            frame_prefix: "circle".into(),
            frame_count: 8,
            frame_rate: 24.0,
        }
    }
}

impl OutlineConfig {
    pub fn frame_keys(&self) -> Vec<String> {
        (1..=self.frame_count)
            .map(|i| format!("{}{}", self.frame_prefix, i))
            .collect()
    }

    pub fn animation_def(&self) -> AnimationDef {
        AnimationDef::from_frames(self.frame_keys(), self.frame_rate, false)
    }

    /// Play time of one reveal. Zero when the frame rate cannot produce a
    /// finite length.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.animation_def().total_duration()).unwrap_or(Duration::ZERO)
    }
}

/// Fixed delays and tween lengths, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Start screen on display before play begins. 0 skips the intro.
    pub start_delay_ms: u64,
    pub cover_fade_in_ms: u64,
    pub start_fade_out_ms: u64,
    /// Extra time after the outline animation before the end screen.
    pub finish_grace_ms: u64,
    pub end_fade_in_ms: u64,
    /// One half-cycle of the call-to-action pulse.
    pub button_pulse_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            start_delay_ms: 3000,
            cover_fade_in_ms: 800,
            start_fade_out_ms: 500,
            finish_grace_ms: 200,
            end_fade_in_ms: 1000,
            button_pulse_ms: 1000,
        }
    }
}

impl Timings {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn start_fade_out(&self) -> Duration {
        Duration::from_millis(self.start_fade_out_ms)
    }

    pub fn finish_grace(&self) -> Duration {
        Duration::from_millis(self.finish_grace_ms)
    }

    /// The start banner keeps growing until it has faded out.
    pub fn banner_grow(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms + self.start_fade_out_ms)
    }

    pub fn secs(ms: u64) -> f32 {
        Duration::from_millis(ms).as_secs_f32()
    }
}

/// Easing curves handed to the renderer with each tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneEasing {
    /// Cover and screen fades.
    pub fade: Easing,
    /// Start banner growth.
    pub grow: Easing,
    /// Call-to-action pulse.
    pub pulse: Easing,
}

/// Dimming overlay drawn over the background outside of play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            color: 0x000000,
            alpha: 0.9,
        }
    }
}

/// Strings and styles for the start and end screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenText {
    pub start_title: String,
    pub start_subtitle: String,
    pub end_title: String,
    pub end_subtitle: String,
    pub button_label: String,
    pub start_title_style: TextStyle,
    pub start_subtitle_style: TextStyle,
    pub end_title_style: TextStyle,
    pub end_subtitle_style: TextStyle,
    pub button_style: TextStyle,
}

impl Default for ScreenText {
    fn default() -> Self {
        Self {
            start_title: "5 hidden dogs".into(),
            start_subtitle: "Can you spot them?".into(),
            end_title: "Great Job".into(),
            end_subtitle: "Can you solve\nevery mystery?".into(),
            button_label: "Play Now".into(),
            start_title_style: TextStyle::headline("bold 50px Arial"),
            start_subtitle_style: TextStyle::headline("bold 60px Arial"),
            end_title_style: TextStyle::headline("bold 75px Arial")
                .with_gradient([0xf9dc71, 0xf9dc71, 0xe7aa38, 0xe7aa38]),
            end_subtitle_style: TextStyle::headline("bold 40px Arial"),
            button_style: TextStyle::plain("32px"),
        }
    }
}
