//! Browser host shell
//!
//! The page owns the canvas, the key/pointer listeners and the
//! requestAnimationFrame loop. It feeds normalized input in through
//! `set_input`, calls `frame` from its rAF callback, and draws whatever JSON
//! comes back.

use wasm_bindgen::prelude::*;

use crate::schedule::FixedCadence;
use crate::sim::{GameState, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Runner Core starting...");
}

/// One game session exposed to JavaScript
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    cadence: FixedCadence,
    input: TickInput,
}

#[wasm_bindgen]
impl WasmGame {
    /// Build a session. `tuning_json` overrides any subset of the defaults;
    /// malformed tuning throws here rather than mid-game.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> Result<WasmGame, JsValue> {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json),
            None => Ok(Tuning::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let state = GameState::new(seed, tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Runner session created (seed {})", seed);
        Ok(Self {
            cadence: FixedCadence::new(state.tuning().tick_rate),
            state,
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.cadence.reset();
        self.input = TickInput::default();
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    /// Current key/pointer state, already mapped from A/D/arrows/Space/W/Up/click
    pub fn set_input(&mut self, move_left: bool, move_right: bool, jump: bool) {
        self.input = TickInput {
            move_left,
            move_right,
            jump,
        };
    }

    /// Whether the host should keep its rAF loop alive
    pub fn is_closed(&self) -> bool {
        self.state.phase == crate::sim::GamePhase::Closed
    }

    /// Run at most one tick for this animation frame.
    ///
    /// Returns the frame as JSON when a tick ran, `undefined` when the frame
    /// was skipped or the session is closed.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<String> {
        if self.is_closed() || !self.cadence.due(timestamp_ms / 1000.0) {
            return None;
        }
        let frame = tick(&mut self.state, &self.input);
        match serde_json::to_string(&frame) {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("Failed to serialize frame: {}", e);
                None
            }
        }
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }
}
