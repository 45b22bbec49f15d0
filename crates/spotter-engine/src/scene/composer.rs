//! Screen composition for the hidden-object scene.
//!
//! The composer sequences renderer calls around the session: it builds the
//! start, game and end screens, re-lays everything out on resize, and turns
//! timer expiries into phase transitions. Game rules live in
//! [`GameSession`] and [`dispatch_pointer`]; nothing here decides whether a
//! tap counts.

use std::time::Duration;
use glam::Vec2;

use crate::api::error::GameError;
use crate::api::game::{GameConfig, Timings};
use crate::api::types::{ElementHandle, GameEvent, HotspotId};
use crate::assets::manifest::AssetManifest;
use crate::core::geometry::OrientationLayout;
use crate::core::layout::{
    fit_background_with, place_relative_to_background, place_relative_to_viewport, BackgroundFit,
    Orientation, Placement, Rect, Size, ViewportAnchor,
};
use crate::core::session::{GamePhase, GameSession};
use crate::core::time::{DelayQueue, TimerHandle};
use crate::extensions::tween::{Tween, TweenLoop};
use crate::input::dispatch::{dispatch_pointer, hotspot_bounds, DispatchResult};
use crate::input::queue::InputEvent;
use crate::renderer::traits::{ElementKind, Renderer};

// Draw order
const DEPTH_COVER_HIDDEN: i32 = -1;
const DEPTH_GAME: i32 = 0;
const DEPTH_COVER: i32 = 1;
const DEPTH_SCREEN: i32 = 2;
const DEPTH_BUTTON: i32 = 3;

// Start banner children, in banner-local pixels
const BANNER_TITLE_OFFSET: Vec2 = Vec2::new(-45.0, -60.0);
const BANNER_MASCOT_OFFSET: Vec2 = Vec2::new(170.0, -60.0);
const BANNER_SUBTITLE_OFFSET: Vec2 = Vec2::new(0.0, 60.0);
const BANNER_GROWTH: f32 = 0.05;

const BUTTON_PULSE_SCALE: f32 = 1.1;

/// Delayed work owned by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SceneTimer {
    /// Start screen has been up long enough.
    BeginPlay,
    /// Start banner finished fading out.
    DismissStartScreen,
    /// Grace delay after the last discovery ran out.
    ShowEndScreen,
}

#[derive(Debug)]
struct HotspotElements {
    container: ElementHandle,
    target: ElementHandle,
    outline: Option<ElementHandle>,
}

#[derive(Debug)]
struct StartScreen {
    container: ElementHandle,
}

#[derive(Debug)]
struct EndScreen {
    logo: ElementHandle,
    character: ElementHandle,
    title: ElementHandle,
    subtitle: ElementHandle,
}

#[derive(Debug)]
struct PlayButton {
    container: ElementHandle,
    image: ElementHandle,
    label: ElementHandle,
}

/// Native sizes the layout needs, resolved from the manifest once.
#[derive(Debug, Clone, Copy)]
struct NativeSizes {
    background: Size,
    hotspot: Size,
    button: Size,
}

/// Drives one session of the scene against a [`Renderer`].
pub struct ScreenComposer<R: Renderer> {
    config: GameConfig,
    renderer: R,
    session: GameSession,
    timers: DelayQueue<SceneTimer>,
    sizes: NativeSizes,

    viewport: Size,
    orientation: Orientation,
    /// Geometry table of the current orientation.
    layout: OrientationLayout,
    fit: BackgroundFit,
    hotspot_placements: Vec<Placement>,
    hotspot_bounds: Vec<Rect>,
    button_bounds: Rect,

    background: ElementHandle,
    cover: ElementHandle,
    hotspots: Vec<HotspotElements>,
    button: PlayButton,
    start_screen: Option<StartScreen>,
    end_screen: Option<EndScreen>,
    begin_timer: Option<TimerHandle>,
}

impl<R: Renderer> ScreenComposer<R> {
    /// Load assets, compose the scene for `viewport`, and show the start
    /// screen. Play begins after the configured start delay.
    pub fn new(config: GameConfig, manifest: &AssetManifest, mut renderer: R, viewport: Size) -> Result<Self, GameError> {
        config.validate()?;
        let orientation = Orientation::from_viewport(viewport);
        let layout = config.geometry.layout(orientation)?.clone();
        let keys = &config.assets;
        let sizes = NativeSizes {
            background: manifest.size_of(&keys.background)?,
            hotspot: manifest.size_of(&keys.hotspot)?,
            button: manifest.size_of(&keys.button)?,
        };
        manifest.require(&keys.character)?;
        manifest.require(&keys.logo)?;
        manifest.require(&config.outline.base_asset)?;
        manifest.require(&config.miss_burst.asset)?;
        for key in config.outline.frame_keys() {
            manifest.require(&key)?;
        }

        renderer.load_assets(manifest);
        renderer.define_animation(&config.outline.animation, &config.outline.animation_def());

        let background = renderer.create_element(ElementKind::Image { asset: keys.background.clone() }, None);
        renderer.set_origin(background, Vec2::ZERO);
        renderer.set_depth(background, DEPTH_GAME);

        let cover = renderer.create_element(
            ElementKind::Overlay {
                color: config.cover.color,
                alpha: config.cover.alpha,
            },
            None,
        );
        renderer.set_origin(cover, Vec2::ZERO);
        renderer.set_alpha(cover, 0.0);

        let hotspots = (0..config.hotspot_count)
            .map(|_| {
                let container = renderer.create_element(ElementKind::Container, None);
                renderer.set_depth(container, DEPTH_GAME);
                let target = renderer.create_element(ElementKind::Image { asset: keys.hotspot.clone() }, Some(container));
                HotspotElements {
                    container,
                    target,
                    outline: None,
                }
            })
            .collect();

        let button = {
            let container = renderer.create_element(ElementKind::Container, None);
            renderer.set_depth(container, DEPTH_BUTTON);
            let image = renderer.create_element(ElementKind::Image { asset: keys.button.clone() }, Some(container));
            let label = renderer.create_element(
                ElementKind::Text {
                    content: config.text.button_label.clone(),
                    style: config.text.button_style.clone(),
                },
                Some(container),
            );
            PlayButton { container, image, label }
        };

        let fit = fit_background_with(config.fit_mode, sizes.background, viewport);
        let session = GameSession::new(config.hotspot_count);

        let mut composer = Self {
            config,
            renderer,
            session,
            timers: DelayQueue::new(),
            sizes,
            viewport,
            orientation,
            layout,
            fit,
            hotspot_placements: Vec::new(),
            hotspot_bounds: Vec::new(),
            button_bounds: Rect::default(),
            background,
            cover,
            hotspots,
            button,
            start_screen: None,
            end_screen: None,
            begin_timer: None,
        };

        composer.apply_layout(viewport)?;
        composer.show_start_screen();
        log::info!(
            "composer: scene ready, {} hotspots, {:?} {}x{}",
            composer.hotspots.len(),
            composer.orientation,
            viewport.width,
            viewport.height
        );
        Ok(composer)
    }

    // -- Queries --

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn background_fit(&self) -> &BackgroundFit {
        &self.fit
    }

    /// Current screen-space bounds of every hotspot, in index order.
    pub fn hotspot_bounds(&self) -> &[Rect] {
        &self.hotspot_bounds
    }

    pub fn button_bounds(&self) -> Rect {
        self.button_bounds
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    // -- Event handling --

    /// Route one host event. Pointer events return how they were resolved.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<Option<DispatchResult>, GameError> {
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)).map(Some),
            InputEvent::Resize { width, height } => {
                self.resize(Size::new(width, height))?;
                Ok(None)
            }
            InputEvent::AnimationComplete { handle } => {
                self.animation_complete(handle);
                Ok(None)
            }
        }
    }

    /// Resolve a tap. The discovered flag is set before this returns; the
    /// outline animation is cosmetic.
    pub fn pointer_down(&mut self, point: Vec2) -> Result<DispatchResult, GameError> {
        if self.button_bounds.contains(point) {
            log::debug!("composer: call to action at ({}, {})", point.x, point.y);
            self.session.emit_event(GameEvent::CallToAction);
        }

        let result = dispatch_pointer(&mut self.session, &self.hotspot_bounds, point)?;
        match result {
            DispatchResult::HotspotDiscovered(id) => {
                self.reveal_outline(id);
                if self.session.all_discovered() {
                    let delay = self.config.finish_delay();
                    log::info!("composer: all hotspots found, end screen in {:?}", delay);
                    self.timers.schedule(delay, SceneTimer::ShowEndScreen);
                }
            }
            DispatchResult::Miss(p) | DispatchResult::Ignored(p) => {
                self.renderer.spawn_particle_burst(p, &self.config.miss_burst);
                self.session.emit_event(GameEvent::PointerMissed { x: p.x, y: p.y });
            }
        }
        Ok(result)
    }

    /// Re-lay out every composed element for a new viewport. Phase and
    /// discoveries are untouched. If the new orientation has no geometry
    /// table the scene stays exactly as it was.
    pub fn resize(&mut self, viewport: Size) -> Result<(), GameError> {
        let previous = self.orientation;
        self.apply_layout(viewport)?;
        if previous != self.orientation {
            log::info!("composer: orientation {:?} -> {:?}", previous, self.orientation);
        }
        Ok(())
    }

    /// A frame animation finished. Only outline reveals are of interest.
    pub fn animation_complete(&mut self, handle: ElementHandle) {
        let found = self
            .hotspots
            .iter()
            .position(|h| h.outline == Some(handle));
        match found {
            Some(index) => self.session.emit_event(GameEvent::OutlineRevealed { id: HotspotId(index) }),
            None => log::debug!("composer: animation on {:?} finished", handle),
        }
    }

    /// Advance scene time and run any timers that came due.
    pub fn advance(&mut self, dt: Duration) {
        for timer in self.timers.advance(dt) {
            match timer {
                SceneTimer::BeginPlay => {
                    self.begin_timer = None;
                    self.begin_play();
                }
                SceneTimer::DismissStartScreen => self.dismiss_start_screen(),
                SceneTimer::ShowEndScreen => {
                    if self.session.finish() {
                        self.show_end_screen();
                    }
                }
            }
        }
    }

    /// Skip the rest of the intro and start playing now.
    pub fn skip_intro(&mut self) {
        if let Some(handle) = self.begin_timer.take() {
            self.timers.cancel(handle);
        }
        self.begin_play();
    }

    /// End the session: cancel pending timers and destroy every element.
    /// Returns the renderer so the host can flush the final commands.
    pub fn shutdown(mut self) -> R {
        self.timers.clear();
        if let Some(start) = self.start_screen.take() {
            self.renderer.destroy(start.container);
        }
        if let Some(end) = self.end_screen.take() {
            for handle in [end.logo, end.character, end.title, end.subtitle] {
                self.renderer.destroy(handle);
            }
        }
        for hotspot in &self.hotspots {
            self.renderer.destroy(hotspot.container);
        }
        self.renderer.destroy(self.button.container);
        self.renderer.destroy(self.cover);
        self.renderer.destroy(self.background);
        log::info!("composer: shut down in {:?}", self.session.phase());
        self.renderer
    }

    // -- Phase sequencing --

    fn show_start_screen(&mut self) {
        let text = &self.config.text;
        let container = self.renderer.create_element(ElementKind::Container, None);
        self.renderer.set_depth(container, DEPTH_SCREEN);

        let title = self.renderer.create_element(
            ElementKind::Text {
                content: text.start_title.clone(),
                style: text.start_title_style.clone(),
            },
            Some(container),
        );
        self.renderer.set_position(title, BANNER_TITLE_OFFSET);

        let mascot = self.renderer.create_element(
            ElementKind::Image {
                asset: self.config.assets.hotspot.clone(),
            },
            Some(container),
        );
        self.renderer.set_flip_x(mascot, true);
        self.renderer.set_position(mascot, BANNER_MASCOT_OFFSET);

        let subtitle = self.renderer.create_element(
            ElementKind::Text {
                content: text.start_subtitle.clone(),
                style: text.start_subtitle_style.clone(),
            },
            Some(container),
        );
        self.renderer.set_position(subtitle, BANNER_SUBTITLE_OFFSET);

        self.start_screen = Some(StartScreen { container });

        self.renderer.set_depth(self.cover, DEPTH_COVER);
        self.renderer.tween(
            self.cover,
            Tween::fade_in(Timings::secs(self.config.timings.cover_fade_in_ms), self.config.easing.fade),
        );
        self.place_start_screen();

        let delay = self.config.timings.start_delay();
        if delay.is_zero() {
            self.begin_play();
        } else {
            self.begin_timer = Some(self.timers.schedule(delay, SceneTimer::BeginPlay));
        }
    }

    fn begin_play(&mut self) {
        if !self.session.start() {
            return;
        }
        let fade = Tween::fade_out(Timings::secs(self.config.timings.start_fade_out_ms), self.config.easing.fade);
        self.renderer.tween(self.cover, fade);
        match &self.start_screen {
            Some(start) => {
                self.renderer.tween(start.container, fade);
                self.timers
                    .schedule(self.config.timings.start_fade_out(), SceneTimer::DismissStartScreen);
            }
            None => self.renderer.set_depth(self.cover, DEPTH_COVER_HIDDEN),
        }
    }

    fn dismiss_start_screen(&mut self) {
        if let Some(start) = self.start_screen.take() {
            self.renderer.destroy(start.container);
        }
        if self.session.phase() == GamePhase::Playing {
            self.renderer.set_depth(self.cover, DEPTH_COVER_HIDDEN);
        }
    }

    fn reveal_outline(&mut self, id: HotspotId) {
        let Some(placement) = self.hotspot_placements.get(id.0).copied() else {
            return;
        };
        let asset = self.config.outline.base_asset.clone();
        let animation = self.config.outline.animation.clone();
        let Some(hotspot) = self.hotspots.get_mut(id.0) else {
            return;
        };

        let outline = self
            .renderer
            .create_element(ElementKind::Sprite { asset }, Some(hotspot.container));
        self.renderer.set_scale(outline, Vec2::splat(placement.scale));
        self.renderer.set_visible(outline, true);
        self.renderer.play_animation(outline, &animation);
        hotspot.outline = Some(outline);
    }

    fn show_end_screen(&mut self) {
        // A start banner still fading out must not linger.
        self.dismiss_start_screen();

        let text = &self.config.text;
        let keys = &self.config.assets;
        let logo = self.renderer.create_element(ElementKind::Image { asset: keys.logo.clone() }, None);
        let character = self.renderer.create_element(ElementKind::Image { asset: keys.character.clone() }, None);
        let title = self.renderer.create_element(
            ElementKind::Text {
                content: text.end_title.clone(),
                style: text.end_title_style.clone(),
            },
            None,
        );
        let subtitle = self.renderer.create_element(
            ElementKind::Text {
                content: text.end_subtitle.clone(),
                style: text.end_subtitle_style.clone(),
            },
            None,
        );

        let fade = Tween::fade_in(Timings::secs(self.config.timings.end_fade_in_ms), self.config.easing.fade);
        for handle in [logo, character, title, subtitle] {
            self.renderer.set_depth(handle, DEPTH_SCREEN);
            self.renderer.set_alpha(handle, 0.0);
            self.renderer.tween(handle, fade);
        }
        self.end_screen = Some(EndScreen {
            logo,
            character,
            title,
            subtitle,
        });
        self.place_end_screen();

        self.renderer.set_depth(self.cover, DEPTH_COVER);
        self.renderer.tween(self.cover, fade);

        let pulse = Tween::scale(
            1.0,
            BUTTON_PULSE_SCALE,
            Timings::secs(self.config.timings.button_pulse_ms),
            self.config.easing.pulse,
        )
        .with_loop(TweenLoop::PingPong);
        self.renderer.tween(self.button.image, pulse);
        self.renderer.tween(self.button.label, pulse);

        log::info!("composer: end screen");
    }

    // -- Layout --

    /// The geometry table is resolved before anything changes, so a failed
    /// lookup leaves the scene untouched.
    fn apply_layout(&mut self, viewport: Size) -> Result<(), GameError> {
        let orientation = Orientation::from_viewport(viewport);
        let layout = self.config.geometry.layout(orientation)?.clone();

        self.viewport = viewport;
        self.orientation = orientation;
        self.layout = layout;
        self.fit = fit_background_with(self.config.fit_mode, self.sizes.background, viewport);

        self.renderer.set_position(self.background, self.fit.offset);
        self.renderer.set_scale(self.background, self.fit.scale);
        self.renderer.set_position(self.cover, Vec2::ZERO);
        self.renderer.set_size(self.cover, viewport);

        self.place_hotspots();
        self.place_button();
        self.place_start_screen();
        self.place_end_screen();
        log::debug!(
            "composer: layout {:?}, background scale {} at ({}, {})",
            self.orientation,
            self.fit.reference_scale(),
            self.fit.offset.x,
            self.fit.offset.y
        );
        Ok(())
    }

    fn place_hotspots(&mut self) {
        let table = &self.layout.hotspots;
        self.hotspot_placements = table
            .iter()
            .map(|&p| place_relative_to_background(p, &self.fit))
            .collect();
        self.hotspot_bounds = hotspot_bounds(table, &self.fit, self.sizes.hotspot);

        for (hotspot, placement) in self.hotspots.iter().zip(&self.hotspot_placements) {
            let scale = Vec2::splat(placement.scale);
            self.renderer.set_position(hotspot.container, placement.pos);
            self.renderer.set_scale(hotspot.target, scale);
            if let Some(outline) = hotspot.outline {
                self.renderer.set_scale(outline, scale);
            }
        }
    }

    fn place_button(&mut self) {
        let placed = self.place_on_viewport(self.button.container, self.layout.screens.play_button);
        self.button_bounds = Rect::from_center(placed.pos, self.sizes.button.as_vec2() * placed.scale);
    }

    fn place_start_screen(&mut self) {
        let Some(container) = self.start_screen.as_ref().map(|s| s.container) else {
            return;
        };
        let placed = self.place_on_viewport(container, self.layout.screens.start_banner);
        let grow = Tween::scale(
            placed.scale,
            placed.scale + BANNER_GROWTH,
            self.config.timings.banner_grow().as_secs_f32(),
            self.config.easing.grow,
        );
        self.renderer.tween(container, grow);
    }

    fn place_end_screen(&mut self) {
        let Some((logo, character, title, subtitle)) = self
            .end_screen
            .as_ref()
            .map(|e| (e.logo, e.character, e.title, e.subtitle))
        else {
            return;
        };

        let anchors = self.layout.screens.clone();
        self.place_on_viewport(logo, anchors.logo);
        self.place_on_viewport(character, anchors.character);
        self.renderer.set_origin(character, Vec2::from(anchors.character_origin));
        self.renderer.set_flip_x(character, anchors.character_flip_x);
        self.place_on_viewport(title, anchors.end_title);
        self.place_on_viewport(subtitle, anchors.end_subtitle);
    }

    fn place_on_viewport(&mut self, handle: ElementHandle, anchor: ViewportAnchor) -> Placement {
        let placed = place_relative_to_viewport(anchor, self.viewport, self.fit.reference_scale());
        self.renderer.set_position(handle, placed.pos);
        self.renderer.set_scale(handle, Vec2::splat(placed.scale));
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::easing::Easing;
    use crate::renderer::recorder::{CommandRecorder, RenderCommand};

    const LANDSCAPE: Size = Size::new(1920.0, 1080.0);
    const PORTRAIT: Size = Size::new(1080.0, 1920.0);

    fn manifest() -> AssetManifest {
        let mut m = AssetManifest::new()
            .with_image("bg", "bg.jpg", 2400.0, 1350.0)
            .with_image("doggy", "doggy.png", 100.0, 80.0)
            .with_image("button", "button.png", 300.0, 100.0)
            .with_image("char", "char.png", 400.0, 600.0)
            .with_image("logo", "logo.png", 500.0, 200.0)
            .with_image("sparkle", "sparkle.png", 32.0, 32.0)
            .with_image("circle", "circle.png", 120.0, 120.0);
        for i in 1..=8 {
            m = m.with_image(format!("circle{}", i), format!("circle{}.png", i), 120.0, 120.0);
        }
        m
    }

    fn composer(config: GameConfig, viewport: Size) -> ScreenComposer<CommandRecorder> {
        ScreenComposer::new(config, &manifest(), CommandRecorder::new(), viewport).unwrap()
    }

    fn playing(viewport: Size) -> ScreenComposer<CommandRecorder> {
        let mut c = composer(GameConfig::default(), viewport);
        c.advance(Duration::from_millis(3000));
        assert_eq!(c.phase(), GamePhase::Playing);
        c
    }

    fn center(rect: Rect) -> Vec2 {
        rect.min + rect.size() * 0.5
    }

    fn tap_hotspot(c: &mut ScreenComposer<CommandRecorder>, index: usize) -> DispatchResult {
        let point = center(c.hotspot_bounds()[index]);
        c.pointer_down(point).unwrap()
    }

    fn count(events: &[GameEvent], wanted: GameEvent) -> usize {
        events.iter().filter(|e| **e == wanted).count()
    }

    #[test]
    fn composes_start_screen_and_waits() {
        let mut c = composer(GameConfig::default(), LANDSCAPE);
        assert_eq!(c.phase(), GamePhase::Start);
        assert_eq!(c.pending_timers(), 1);
        assert!(c
            .renderer()
            .commands()
            .iter()
            .any(|cmd| matches!(cmd, RenderCommand::DefineAnimation { name, .. } if name == "outline_reveal")));

        c.advance(Duration::from_millis(2999));
        assert_eq!(c.phase(), GamePhase::Start);
        c.advance(Duration::from_millis(1));
        assert_eq!(c.phase(), GamePhase::Playing);
        assert_eq!(count(&c.drain_events(), GameEvent::GameStarted), 1);
    }

    #[test]
    fn zero_start_delay_plays_immediately() {
        let mut config = GameConfig::default();
        config.timings.start_delay_ms = 0;
        let c = composer(config, LANDSCAPE);
        assert_eq!(c.phase(), GamePhase::Playing);
    }

    #[test]
    fn skip_intro_cancels_start_timer() {
        let mut c = composer(GameConfig::default(), LANDSCAPE);
        c.skip_intro();
        assert_eq!(c.phase(), GamePhase::Playing);
        c.advance(Duration::from_secs(5));
        assert_eq!(count(&c.drain_events(), GameEvent::GameStarted), 1);
        assert_eq!(c.pending_timers(), 0);
    }

    #[test]
    fn taps_during_start_are_ignored_but_sparkle() {
        let mut c = composer(GameConfig::default(), LANDSCAPE);
        let result = tap_hotspot(&mut c, 2);
        assert!(matches!(result, DispatchResult::Ignored(_)));
        assert_eq!(c.session().discovered_count(), 0);
        assert!(c
            .renderer()
            .commands()
            .iter()
            .any(|cmd| matches!(cmd, RenderCommand::Particles { .. })));
    }

    #[test]
    fn reveal_plays_outline_and_reports_completion() {
        let mut c = playing(LANDSCAPE);
        c.renderer_mut().drain();
        assert_eq!(tap_hotspot(&mut c, 2), DispatchResult::HotspotDiscovered(HotspotId(2)));

        let outline = c
            .renderer()
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                RenderCommand::PlayAnimation { handle, animation } if animation == "outline_reveal" => Some(*handle),
                _ => None,
            })
            .unwrap();
        c.drain_events();
        c.handle_input(InputEvent::AnimationComplete { handle: outline }).unwrap();
        assert_eq!(c.drain_events(), vec![GameEvent::OutlineRevealed { id: HotspotId(2) }]);
    }

    #[test]
    fn finishes_once_after_grace_delay() {
        let mut c = playing(LANDSCAPE);
        for i in 0..5 {
            assert_eq!(tap_hotspot(&mut c, i), DispatchResult::HotspotDiscovered(HotspotId(i)));
        }
        assert_eq!(c.phase(), GamePhase::Playing);

        let delay = c.config().finish_delay();
        c.advance(delay - Duration::from_millis(1));
        assert_eq!(c.phase(), GamePhase::Playing);
        c.advance(Duration::from_millis(1));
        assert_eq!(c.phase(), GamePhase::Finished);

        c.advance(Duration::from_secs(10));
        assert_eq!(count(&c.drain_events(), GameEvent::GameFinished), 1);

        // Taps on the end screen change nothing.
        assert!(matches!(tap_hotspot(&mut c, 0), DispatchResult::Ignored(_)));
        assert_eq!(c.session().discovered_count(), 5);
    }

    #[test]
    fn end_screen_pulses_the_button() {
        let mut c = playing(LANDSCAPE);
        for i in 0..5 {
            tap_hotspot(&mut c, i);
        }
        c.renderer_mut().drain();
        c.advance(Duration::from_secs(1));
        let pulses = c
            .renderer()
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, RenderCommand::Tween { tween, .. } if tween.loop_mode == TweenLoop::PingPong))
            .count();
        assert_eq!(pulses, 2);
    }

    #[test]
    fn orientation_switch_keeps_progress() {
        let mut c = playing(LANDSCAPE);
        tap_hotspot(&mut c, 0);
        tap_hotspot(&mut c, 3);

        c.handle_input(InputEvent::Resize {
            width: PORTRAIT.width,
            height: PORTRAIT.height,
        })
        .unwrap();
        assert_eq!(c.orientation(), Orientation::Portrait);
        assert_eq!(c.phase(), GamePhase::Playing);
        assert_eq!(c.session().discovered_count(), 2);
        assert!(c.session().is_discovered(HotspotId(3)).unwrap());

        // Bounds now come from the portrait table.
        let expected = place_relative_to_background(
            c.config().geometry.hotspots(Orientation::Portrait).unwrap()[1],
            c.background_fit(),
        );
        assert!((center(c.hotspot_bounds()[1]) - expected.pos).length() < 1e-3);
        assert_eq!(tap_hotspot(&mut c, 1), DispatchResult::HotspotDiscovered(HotspotId(1)));
        assert_eq!(c.session().discovered_count(), 3);
    }

    #[test]
    fn resize_keeps_scale_proportional() {
        let mut c = playing(LANDSCAPE);
        let before = c.hotspot_bounds()[2].size();
        c.resize(Size::new(960.0, 540.0)).unwrap();
        let after = c.hotspot_bounds()[2].size();
        assert!((after * 2.0 - before).length() < 1e-3);
    }

    #[test]
    fn button_tap_calls_to_action() {
        let mut c = playing(LANDSCAPE);
        c.drain_events();
        let point = center(c.button_bounds());
        c.pointer_down(point).unwrap();
        assert_eq!(count(&c.drain_events(), GameEvent::CallToAction), 1);
    }

    #[test]
    fn shutdown_drops_timers_and_elements() {
        let mut c = playing(LANDSCAPE);
        for i in 0..5 {
            tap_hotspot(&mut c, i);
        }
        assert!(c.pending_timers() > 0);
        let recorder = c.shutdown();
        assert_eq!(recorder.live_count(), 0);
    }

    #[test]
    fn missing_asset_fails_construction() {
        let m = AssetManifest::new().with_image("bg", "bg.jpg", 2400.0, 1350.0);
        let err = ScreenComposer::new(GameConfig::default(), &m, CommandRecorder::new(), LANDSCAPE)
            .err()
            .unwrap();
        assert!(matches!(err, GameError::MissingAsset(key) if key == "doggy"));
    }

    fn landscape_only() -> GameConfig {
        let mut config = GameConfig::default();
        let landscape = config.geometry.layout(Orientation::Landscape).unwrap().clone();
        let mut layouts = std::collections::HashMap::new();
        layouts.insert(Orientation::Landscape, landscape);
        config.geometry = crate::core::geometry::SceneGeometry::new(layouts);
        config
    }

    #[test]
    fn failed_resize_leaves_scene_untouched() {
        let mut config = landscape_only();
        config.timings.start_delay_ms = 0;
        let mut c = composer(config, LANDSCAPE);
        let bounds = c.hotspot_bounds().to_vec();
        let fit = *c.background_fit();
        for i in 0..5 {
            tap_hotspot(&mut c, i);
        }
        c.renderer_mut().drain();

        assert!(matches!(c.resize(PORTRAIT), Err(GameError::InvalidOrientation(Orientation::Portrait))));
        assert_eq!(c.orientation(), Orientation::Landscape);
        assert_eq!(c.viewport(), LANDSCAPE);
        assert_eq!(*c.background_fit(), fit);
        assert_eq!(c.hotspot_bounds(), bounds.as_slice());
        assert!(c.renderer().commands().is_empty());

        // The end screen still composes in full.
        c.advance(Duration::from_secs(2));
        assert_eq!(c.phase(), GamePhase::Finished);
        let pulses = c
            .renderer()
            .commands()
            .iter()
            .filter(|cmd| matches!(cmd, RenderCommand::Tween { tween, .. } if tween.loop_mode == TweenLoop::PingPong))
            .count();
        assert_eq!(pulses, 2);
    }

    #[test]
    fn missing_orientation_fails_construction() {
        let err = ScreenComposer::new(landscape_only(), &manifest(), CommandRecorder::new(), PORTRAIT)
            .err()
            .unwrap();
        assert!(matches!(err, GameError::InvalidOrientation(Orientation::Portrait)));
    }

    #[test]
    fn configured_easing_reaches_renderer() {
        let mut config = GameConfig::default();
        config.easing.fade = Easing::SineInOut;
        let c = composer(config, LANDSCAPE);
        assert!(c.renderer().commands().iter().any(|cmd| matches!(
            cmd,
            RenderCommand::Tween { tween, .. } if tween.easing == Easing::SineInOut
        )));
    }
}
