//! Ballroom Engine - elastic bouncing-ball physics in WASM
//!
//! A bounded rectangular room of rigid discs that fall under uniform
//! acceleration, collide elastically with each other and bounce off the
//! walls, conserving mechanical energy to numerical tolerance.
//!
//! Layering (leaves first):
//! - math/       - immutable 2D vector algebra
//! - dynamics/   - the Ball value: integration and collision resolution
//! - simulation/ - the WorldCore scene, plus the wasm facade for the shell
//!
//! The browser shell owns a facade `World`, calls `step(dt)` once per
//! animation frame and reads back a flat ball snapshot for rendering. The
//! core is purely functional: every operation maps immutable values to new
//! immutable values, so there is no shared mutable state anywhere below the
//! facade.

pub mod dynamics;
pub mod math;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Ballroom WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use dynamics::Ball;
pub use math::Vec2;
pub use simulation::{scene, World, WorldCore};
