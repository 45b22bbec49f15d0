//! Pointer hit-testing against hotspot bounds.

use glam::Vec2;

use crate::api::error::GameError;
use crate::api::types::HotspotId;
use crate::core::layout::{place_relative_to_background, BackgroundFit, Rect, RelativePlacement, Size};
use crate::core::session::{Discovery, GamePhase, GameSession};

/// What a pointer-down turned into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchResult {
    /// A hotspot was found by this tap.
    HotspotDiscovered(HotspotId),
    /// Playing, but the tap found nothing new.
    Miss(Vec2),
    /// Not playing; the tap has no effect on the session.
    Ignored(Vec2),
}

impl DispatchResult {
    /// Point to draw a cosmetic miss effect at, if any.
    pub fn miss_point(&self) -> Option<Vec2> {
        match *self {
            DispatchResult::HotspotDiscovered(_) => None,
            DispatchResult::Miss(p) | DispatchResult::Ignored(p) => Some(p),
        }
    }
}

/// Screen-space bounds of every hotspot, in index order: a box of the
/// hotspot image's native size times its placement scale, centered on its
/// placement.
pub fn hotspot_bounds(placements: &[RelativePlacement], fit: &BackgroundFit, native: Size) -> Vec<Rect> {
    placements
        .iter()
        .map(|&p| {
            let placed = place_relative_to_background(p, fit);
            Rect::from_center(placed.pos, native.as_vec2() * placed.scale)
        })
        .collect()
}

/// First hotspot (lowest index) whose bounds contain `point`.
pub fn hit_test(bounds: &[Rect], point: Vec2) -> Option<HotspotId> {
    bounds.iter().position(|r| r.contains(point)).map(HotspotId)
}

/// Resolve a pointer-down against the session.
///
/// The first hotspot containing the point wins even when it is already
/// found, so a found hotspot shields anything it overlaps.
pub fn dispatch_pointer(session: &mut GameSession, bounds: &[Rect], point: Vec2) -> Result<DispatchResult, GameError> {
    if session.phase() != GamePhase::Playing {
        return Ok(DispatchResult::Ignored(point));
    }

    let Some(id) = hit_test(bounds, point) else {
        return Ok(DispatchResult::Miss(point));
    };

    Ok(match session.discover(id)? {
        Discovery::Discovered | Discovery::Completed => DispatchResult::HotspotDiscovered(id),
        Discovery::AlreadyDiscovered => DispatchResult::Miss(point),
        Discovery::Ignored => DispatchResult::Ignored(point),
    })
}
