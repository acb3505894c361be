//! Time management utilities
//!
//! Two clocks drive the sample: a wall clock behind the [`Clock`] trait, which
//! the spawner polls for its interval check, and the [`FrameClock`], the
//! per-tick ambient clock the mover accumulates. [`ManualClock`] makes both
//! paths deterministic in tests.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of the current instant.
///
/// Modules that poll real time take this as an injected dependency so tests
/// can substitute [`ManualClock`].
pub trait Clock {
    /// The current instant according to this clock.
    fn now(&self) -> Instant;
}

/// Wall-clock time, the production [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A [`Clock`] advanced by hand, for deterministic tests.
///
/// Reports a fixed base instant plus an offset that only moves when the test
/// says so. Interior mutability lets the clock be shared as `Rc<ManualClock>`
/// while the test keeps advancing it.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.offset.set(self.offset.get() + delta);
    }

    /// Set the total elapsed time since the clock was created.
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.offset.set(elapsed);
    }

    /// Total elapsed time since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Per-tick ambient clock.
///
/// The orchestrator calls [`FrameClock::begin_frame`] once per tick with the
/// frame delta; modules that follow ambient time (the mover) read
/// [`FrameClock::delta`] during their update instead of the delta parameter
/// they were handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    delta: f32,
    total: f32,
    frame: u64,
}

impl FrameClock {
    /// Create a clock with no frames recorded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a new frame with the given delta in seconds.
    pub fn begin_frame(&mut self, delta: f32) {
        self.delta = delta;
        self.total += delta;
        self.frame += 1;
    }

    /// Delta of the current frame in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Total time recorded across all frames.
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Number of frames recorded so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// High-precision timer for real-time frame loops
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
