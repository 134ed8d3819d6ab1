//! Host-driven game loop
//!
//! The host calls [`GameLoop::frame`] from its own frame callback
//! (requestAnimationFrame, a native event loop, a test harness) with a
//! monotonic timestamp. At most one tick runs per call. A host that falls
//! behind drops ticks instead of catching up, so a long stall slows the game
//! down rather than fast-forwarding it.

use crate::sim::{Frame, GamePhase, GameState, TickInput, tick};

/// A tick may start this fraction of an interval early (absorbs vsync jitter)
const EARLY_SLACK: f64 = 0.25;

/// Source of the per-tick input snapshot
pub trait InputSource {
    /// Sample the current key/pointer state. Called once at the start of a tick.
    fn sample(&mut self, state: &GameState) -> TickInput;
}

impl InputSource for TickInput {
    fn sample(&mut self, _state: &GameState) -> TickInput {
        *self
    }
}

impl<F: FnMut(&GameState) -> TickInput> InputSource for F {
    fn sample(&mut self, state: &GameState) -> TickInput {
        self(state)
    }
}

/// Decides which host frames get a simulation tick
#[derive(Debug, Clone)]
pub struct FixedCadence {
    interval: f64,
    next_due: Option<f64>,
}

impl FixedCadence {
    pub fn new(tick_rate: f32) -> Self {
        Self {
            interval: 1.0 / tick_rate as f64,
            next_due: None,
        }
    }

    /// Whether a tick should run at `now` (seconds). Consumes the slot if so.
    pub fn due(&mut self, now: f64) -> bool {
        let Some(next_due) = self.next_due else {
            self.next_due = Some(now + self.interval);
            return true;
        };

        if now < next_due - self.interval * EARLY_SLACK {
            return false;
        }

        // More than a full interval late: drop the missed ticks
        let next = next_due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Forget timing history; the next call ticks immediately
    pub fn reset(&mut self) {
        self.next_due = None;
    }
}

/// What happened on a host frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// A tick ran and the render callback was invoked
    Ticked,
    /// Too early for the next tick
    Skipped,
    /// Session closed; stop scheduling
    Closed,
}

/// Couples a session, its cadence and an input source
pub struct GameLoop<I: InputSource> {
    state: GameState,
    cadence: FixedCadence,
    input: I,
}

impl<I: InputSource> GameLoop<I> {
    pub fn new(state: GameState, input: I) -> Self {
        let cadence = FixedCadence::new(state.tuning().tick_rate);
        Self {
            state,
            cadence,
            input,
        }
    }

    /// Called once per host frame with a monotonic time in seconds
    pub fn frame<F: FnMut(&Frame)>(&mut self, now: f64, mut render: F) -> FrameOutcome {
        if self.state.phase == GamePhase::Closed {
            return FrameOutcome::Closed;
        }
        if !self.cadence.due(now) {
            return FrameOutcome::Skipped;
        }

        let input = self.input.sample(&self.state);
        let frame = tick(&mut self.state, &input);
        render(&frame);
        FrameOutcome::Ticked
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.cadence.reset();
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
