pub mod api;
pub mod core;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod scene;

// Re-export key types at crate root for convenience
pub use api::error::GameError;
pub use api::game::{GameConfig, AssetKeys, OutlineConfig, Timings, SceneEasing, CoverConfig, ScreenText};
pub use api::types::{ElementHandle, HotspotId, GameEvent};
pub use assets::manifest::{AssetManifest, ImageDescriptor};
pub use core::geometry::{SceneGeometry, OrientationLayout, ScreenAnchors};
pub use core::layout::{
    Size, Rect, Orientation, FitMode, BackgroundFit, Placement, RelativePlacement, ViewportAnchor,
    fit_background, fit_background_with, place_relative_to_background, place_relative_to_viewport,
};
pub use core::session::{GameSession, GamePhase, Discovery};
pub use core::time::{DelayQueue, TimerHandle};
pub use input::queue::{InputEvent, InputQueue};
pub use input::dispatch::{DispatchResult, dispatch_pointer, hit_test, hotspot_bounds};
pub use renderer::traits::{Renderer, ElementKind, TextStyle, AnimationDef, ParticleBurst};
pub use renderer::recorder::{CommandRecorder, RenderCommand};
pub use scene::composer::ScreenComposer;

// Extensions: cosmetic tween descriptors
pub use extensions::{Easing, Tween, TweenTarget, TweenLoop};
