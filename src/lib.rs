//! Door Walk core crate.
//!
//! A character walks around a page with the arrow keys (or on-screen buttons),
//! is stopped by walls, and can press F at a door to open its link or at a
//! sign to read it in a popup. The movement / collision loop lives in
//! [`session`] and is plain Rust; [`web`] wires it to the DOM.

use wasm_bindgen::prelude::*;

// Browser console logging; only reachable from the wasm glue.
macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*))))
}
macro_rules! console_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!($($t)*))))
}

pub mod config;
pub mod geometry;
pub mod input;
pub mod session;
pub mod world;
mod web;

pub use config::{Config, DEFAULT_SIGN_TEXT};
pub use geometry::{Rect, Viewport};
pub use input::{Command, Direction};
pub use session::{Collision, Effect, LoopState, Messages, Session, Tick};
pub use world::{Region, RegionKind, World};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Start the demo on the current page with default settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(Config::default())
}

/// Start the demo with a JSON config, e.g. `{"move_amount": 6}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = Config::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?;
    web::start(config)
}
