//! Responsive layout math.
//!
//! Everything here is a pure function of its inputs: the background's native
//! size, the viewport size and a relative placement. Callers apply the
//! returned values to renderer elements.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// True when either side is zero, negative or NaN.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of `size` centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Screen orientation, derived from the viewport every time layout runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Square viewports count as landscape.
    pub fn from_viewport(viewport: Size) -> Self {
        if viewport.width >= viewport.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// How the background is scaled into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Whole background visible, letterboxed on the free axis.
    #[default]
    Contain,
    /// Background fills the viewport and overflows the free axis.
    Cover,
}

/// Displayed geometry of the background image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundFit {
    /// Uniform scale, stored per axis (both components are equal).
    pub scale: Vec2,
    /// Top-left corner of the displayed background.
    pub offset: Vec2,
    /// Native size of the background asset.
    pub native: Size,
}

impl BackgroundFit {
    /// Displayed size of the background.
    pub fn display_size(&self) -> Vec2 {
        self.native.as_vec2() * self.scale
    }

    /// The scale other elements should inherit.
    pub fn reference_scale(&self) -> f32 {
        self.scale.max_element()
    }
}

/// Computed position/scale for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub scale: f32,
}

/// A point relative to the background: `(rx, ry)` in [0, 1] with an
/// optional scale multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePlacement {
    pub rx: f32,
    pub ry: f32,
    #[serde(default = "unit_scale")]
    pub initial_scale: f32,
}

impl RelativePlacement {
    pub const fn new(rx: f32, ry: f32, initial_scale: f32) -> Self {
        Self { rx, ry, initial_scale }
    }

    /// Placement with the default scale of 1.
    pub const fn at(rx: f32, ry: f32) -> Self {
        Self::new(rx, ry, 1.0)
    }
}

/// A point relative to the viewport with a multiplier on the reference scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportAnchor {
    pub rel_x: f32,
    pub rel_y: f32,
    #[serde(default = "unit_scale")]
    pub scale_factor: f32,
}

impl ViewportAnchor {
    pub const fn new(rel_x: f32, rel_y: f32, scale_factor: f32) -> Self {
        Self { rel_x, rel_y, scale_factor }
    }
}

fn unit_scale() -> f32 {
    1.0
}

/// Fit the background inside the viewport, preserving its aspect ratio.
pub fn fit_background(native: Size, viewport: Size) -> BackgroundFit {
    fit_background_with(FitMode::Contain, native, viewport)
}

/// Fit the background using an explicit [`FitMode`].
///
/// A viewport relatively wider than the image is height-constrained under
/// `Contain` and width-constrained under `Cover`. The free axis is centered:
/// its offset is `(viewport - displayed) / 2`.
pub fn fit_background_with(mode: FitMode, native: Size, viewport: Size) -> BackgroundFit {
    if native.is_degenerate() {
        return BackgroundFit {
            scale: Vec2::ZERO,
            offset: viewport.as_vec2() * 0.5,
            native,
        };
    }

    let viewport_wider = viewport.aspect() > native.aspect();
    let match_height = match mode {
        FitMode::Contain => viewport_wider,
        FitMode::Cover => !viewport_wider,
    };

    if match_height {
        let scale = viewport.height / native.height;
        BackgroundFit {
            scale: Vec2::splat(scale),
            offset: Vec2::new((viewport.width - native.width * scale) / 2.0, 0.0),
            native,
        }
    } else {
        let scale = viewport.width / native.width;
        BackgroundFit {
            scale: Vec2::splat(scale),
            offset: Vec2::new(0.0, (viewport.height - native.height * scale) / 2.0),
            native,
        }
    }
}

/// Position an element at a relative point of the displayed background.
pub fn place_relative_to_background(placement: RelativePlacement, fit: &BackgroundFit) -> Placement {
    let display = fit.display_size();
    Placement {
        pos: Vec2::new(
            fit.offset.x + display.x * placement.rx,
            fit.offset.y + display.y * placement.ry,
        ),
        scale: fit.reference_scale() * placement.initial_scale,
    }
}

/// Position an element at a relative point of the viewport.
pub fn place_relative_to_viewport(anchor: ViewportAnchor, viewport: Size, reference_scale: f32) -> Placement {
    Placement {
        pos: Vec2::new(viewport.width * anchor.rel_x, viewport.height * anchor.rel_y),
        scale: reference_scale * anchor.scale_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_ratio_fits_exactly() {
        let fit = fit_background(Size::new(2400.0, 1350.0), Size::new(1920.0, 1080.0));
        assert_eq!(fit.scale, Vec2::splat(0.8));
        assert_eq!(fit.offset, Vec2::ZERO);
    }

    #[test]
    fn square_viewport_letterboxes_wide_image() {
        // viewport ratio 1.0 is not wider than image ratio 2.0 -> match width
        let fit = fit_background(Size::new(2000.0, 1000.0), Size::new(1000.0, 1000.0));
        assert_eq!(fit.scale, Vec2::splat(0.5));
        assert_eq!(fit.offset, Vec2::new(0.0, 250.0));
        assert_eq!(fit.display_size(), Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn wide_viewport_pillarboxes() {
        let fit = fit_background(Size::new(1000.0, 1000.0), Size::new(1600.0, 800.0));
        assert_eq!(fit.scale, Vec2::splat(0.8));
        assert_eq!(fit.offset, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn cover_overflows_free_axis() {
        let fit = fit_background_with(FitMode::Cover, Size::new(2000.0, 1000.0), Size::new(1000.0, 1000.0));
        assert_eq!(fit.scale, Vec2::splat(1.0));
        assert_eq!(fit.offset, Vec2::new(-500.0, 0.0));
    }

    #[test]
    fn degenerate_native_does_not_panic() {
        let fit = fit_background(Size::new(0.0, 100.0), Size::new(800.0, 600.0));
        assert_eq!(fit.scale, Vec2::ZERO);
        assert_eq!(fit.offset, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn zero_viewport_yields_zero_scale() {
        let fit = fit_background(Size::new(2000.0, 1000.0), Size::new(0.0, 0.0));
        assert_eq!(fit.scale, Vec2::ZERO);
        assert!(fit.offset.is_finite());
    }

    #[test]
    fn origin_placement_is_background_origin() {
        let fit = fit_background(Size::new(2000.0, 1000.0), Size::new(1000.0, 1000.0));
        let p = place_relative_to_background(RelativePlacement::new(0.0, 0.0, 0.4), &fit);
        assert_eq!(p.pos, fit.offset);
        assert_eq!(p.scale, 0.5 * 0.4);
    }

    #[test]
    fn background_placement_uses_display_size() {
        let fit = fit_background(Size::new(2400.0, 1350.0), Size::new(1920.0, 1080.0));
        let p = place_relative_to_background(RelativePlacement::at(0.5, 0.25), &fit);
        assert_eq!(p.pos, Vec2::new(960.0, 270.0));
        assert_eq!(p.scale, 0.8);
    }

    #[test]
    fn viewport_placement() {
        let p = place_relative_to_viewport(ViewportAnchor::new(0.5, 0.9, 0.5), Size::new(800.0, 600.0), 0.8);
        assert_eq!(p.pos, Vec2::new(400.0, 540.0));
        assert_eq!(p.scale, 0.4);
    }

    #[test]
    fn orientation_from_viewport() {
        assert_eq!(Orientation::from_viewport(Size::new(1920.0, 1080.0)), Orientation::Landscape);
        assert_eq!(Orientation::from_viewport(Size::new(500.0, 500.0)), Orientation::Landscape);
        assert_eq!(Orientation::from_viewport(Size::new(390.0, 844.0)), Orientation::Portrait);
    }

    fn assert_keeps_aspect(native: Size, viewport: Size) {
        let fit = fit_background(native, viewport);
        let shown = fit.display_size();
        assert_eq!(fit.scale.x, fit.scale.y);
        assert!(shown.x <= viewport.width + 1e-3 && shown.y <= viewport.height + 1e-3);
        assert!(((shown.x / shown.y) - native.aspect()).abs() <= native.aspect() * 1e-4);
    }

    #[test]
    fn one_pixel_viewport_keeps_aspect() {
        let native = Size::new(2400.0, 1350.0);
        let viewport = Size::new(1.0, 1.0);
        assert_keeps_aspect(native, viewport);
        let fit = fit_background(native, viewport);
        assert!((fit.scale.x - 1.0 / 2400.0).abs() < 1e-9);
        assert_eq!(fit.offset.x, 0.0);
        assert!((fit.offset.y - (1.0 - 1350.0 / 2400.0) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn extreme_tall_viewport_matches_width() {
        let native = Size::new(2400.0, 1350.0);
        let viewport = Size::new(1.0, 8000.0);
        assert_keeps_aspect(native, viewport);
        let fit = fit_background(native, viewport);
        assert_eq!(fit.offset.x, 0.0);
        assert!(fit.offset.y > 3999.0);
    }

    #[test]
    fn extreme_wide_viewport_matches_height() {
        let native = Size::new(2400.0, 1350.0);
        let viewport = Size::new(8000.0, 1.0);
        assert_keeps_aspect(native, viewport);
        let fit = fit_background(native, viewport);
        assert_eq!(fit.offset.y, 0.0);
        assert!((fit.scale.x - 1.0 / 1350.0).abs() < 1e-9);
        assert!(fit.offset.x > 3999.0);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::from_center(Vec2::new(10.0, 10.0), Vec2::new(4.0, 2.0));
        assert!(r.contains(Vec2::new(8.0, 9.0)));
        assert!(r.contains(Vec2::new(12.0, 11.0)));
        assert!(!r.contains(Vec2::new(12.1, 10.0)));
    }

    #[test]
    fn relative_placement_scale_defaults_to_one() {
        let p: RelativePlacement = serde_json::from_str(r#"{ "rx": 0.68, "ry": 0.74 }"#).unwrap();
        assert_eq!(p.initial_scale, 1.0);
    }

    proptest! {
        #[test]
        fn fit_preserves_aspect_ratio(
            nw in 1.0f32..5000.0,
            nh in 1.0f32..5000.0,
            vw in 1.0f32..8000.0,
            vh in 1.0f32..8000.0,
        ) {
            let native = Size::new(nw, nh);
            for mode in [FitMode::Contain, FitMode::Cover] {
                let fit = fit_background_with(mode, native, Size::new(vw, vh));
                let shown = fit.display_size();
                prop_assert_eq!(fit.scale.x, fit.scale.y);
                let ratio = shown.x / shown.y;
                prop_assert!((ratio - native.aspect()).abs() <= native.aspect() * 1e-4);
            }
        }

        #[test]
        fn contain_fits_inside_viewport(
            nw in 1.0f32..5000.0,
            nh in 1.0f32..5000.0,
            vw in 1.0f32..8000.0,
            vh in 1.0f32..8000.0,
        ) {
            let fit = fit_background(Size::new(nw, nh), Size::new(vw, vh));
            let shown = fit.display_size();
            prop_assert!(shown.x <= vw * (1.0 + 1e-4));
            prop_assert!(shown.y <= vh * (1.0 + 1e-4));
            prop_assert!(fit.offset.x >= -vw * 1e-4 && fit.offset.y >= -vh * 1e-4);
        }

        #[test]
        fn layout_is_deterministic(
            vw in 1.0f32..4000.0,
            vh in 1.0f32..4000.0,
            rx in 0.0f32..1.0,
            ry in 0.0f32..1.0,
        ) {
            let native = Size::new(2400.0, 1350.0);
            let a = place_relative_to_background(RelativePlacement::at(rx, ry), &fit_background(native, Size::new(vw, vh)));
            let b = place_relative_to_background(RelativePlacement::at(rx, ry), &fit_background(native, Size::new(vw, vh)));
            prop_assert_eq!(a.pos.x.to_bits(), b.pos.x.to_bits());
            prop_assert_eq!(a.pos.y.to_bits(), b.pos.y.to_bits());
            prop_assert_eq!(a.scale.to_bits(), b.scale.to_bits());
        }
    }
}
