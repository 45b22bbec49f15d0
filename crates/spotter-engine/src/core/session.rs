//! Game phases and hotspot discovery.
//!
//! The session is plain data. It owns the discovered flags and the phase,
//! enforces the Start → Playing → Finished order, and queues the events the
//! host sees. It knows nothing about timers or drawing.

use serde::Serialize;

use crate::api::error::GameError;
use crate::api::types::{GameEvent, HotspotId};

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Intro screen; taps are ignored.
    Start,
    /// Hotspots can be found.
    Playing,
    /// End screen; taps are ignored.
    Finished,
}

/// Result of a [`GameSession::discover`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// Newly found; more remain.
    Discovered,
    /// Newly found and it was the last one.
    Completed,
    /// Found earlier; nothing changed.
    AlreadyDiscovered,
    /// Not playing; nothing changed.
    Ignored,
}

impl Discovery {
    pub fn is_new(self) -> bool {
        matches!(self, Discovery::Discovered | Discovery::Completed)
    }
}

/// A single play-through of the scene.
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: GamePhase,
    discovered: Vec<bool>,
    discovered_count: usize,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Fresh session in the `Start` phase with `hotspot_count` hidden objects.
    pub fn new(hotspot_count: usize) -> Self {
        Self {
            phase: GamePhase::Start,
            discovered: vec![false; hotspot_count],
            discovered_count: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn hotspot_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered_count
    }

    pub fn all_discovered(&self) -> bool {
        self.discovered_count == self.discovered.len()
    }

    pub fn is_discovered(&self, id: HotspotId) -> Result<bool, GameError> {
        self.check(id).map(|i| self.discovered[i])
    }

    /// Start → Playing. Returns false (and does nothing) in any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Start {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::GameStarted);
        log::info!("session: playing, {} hotspots hidden", self.hotspot_count());
        true
    }

    /// Mark a hotspot as found.
    ///
    /// Out-of-range ids are an error. Outside `Playing`, or for a hotspot
    /// already found, this is a no-op that reports why.
    pub fn discover(&mut self, id: HotspotId) -> Result<Discovery, GameError> {
        let index = self.check(id)?;
        if self.phase != GamePhase::Playing {
            return Ok(Discovery::Ignored);
        }
        if self.discovered[index] {
            return Ok(Discovery::AlreadyDiscovered);
        }

        self.discovered[index] = true;
        self.discovered_count += 1;
        self.events.push(GameEvent::HotspotDiscovered { id });
        log::debug!(
            "session: found {} ({}/{})",
            id,
            self.discovered_count,
            self.hotspot_count()
        );

        if self.all_discovered() {
            Ok(Discovery::Completed)
        } else {
            Ok(Discovery::Discovered)
        }
    }

    /// Playing → Finished, once every hotspot is found. Returns whether the
    /// transition happened; `GameFinished` is queued only then.
    pub fn finish(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.all_discovered() {
            return false;
        }
        self.phase = GamePhase::Finished;
        self.events.push(GameEvent::GameFinished);
        log::info!("session: finished");
        true
    }

    /// Queue an event raised outside the state machine (misses, button taps).
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn check(&self, id: HotspotId) -> Result<usize, GameError> {
        if id.0 < self.discovered.len() {
            Ok(id.0)
        } else {
            Err(GameError::InvalidHotspot {
                id: id.0,
                count: self.discovered.len(),
            })
        }
    }
}
