use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use spotter_engine::{ElementHandle, InputEvent};

pub mod runner;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls before `game_init` (or after
/// `game_shutdown`) are logged and dropped.
fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("spotter: not initialized, call game_init() first");
                None
            }
        }
    })
}

/// Build the scene. Returns false if the config or manifest is rejected.
#[wasm_bindgen]
pub fn game_init(config_json: &str, manifest_json: &str, width: f32, height: f32) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match GameRunner::new(config_json, manifest_json, width, height) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("spotter: initialized");
            true
        }
        Err(err) => {
            log::error!("spotter: init failed: {}", err);
            false
        }
    }
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn game_animation_complete(handle: u32) {
    with_runner(|r| r.push_input(InputEvent::AnimationComplete { handle: ElementHandle(handle) }));
}

/// Render commands recorded since the last call, as a JSON array.
#[wasm_bindgen]
pub fn game_drain_commands() -> String {
    with_runner(|r| r.drain_commands_json()).unwrap_or_else(|| String::from("[]"))
}

/// Game events queued since the last call, as a JSON array.
#[wasm_bindgen]
pub fn game_drain_events() -> String {
    with_runner(|r| r.drain_events_json()).unwrap_or_else(|| String::from("[]"))
}

/// Destroy the scene and return the final command batch.
#[wasm_bindgen]
pub fn game_shutdown() -> String {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    match runner {
        Some(runner) => {
            log::info!("spotter: shut down");
            runner.shutdown()
        }
        None => String::from("[]"),
    }
}
