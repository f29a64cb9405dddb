/// Fixed timestep stepper
///
/// Accumulates frame time and reports how many fixed simulation steps to run
/// for each rendered frame. Simulation stays at a constant rate while
/// rendering runs at whatever cadence the host provides.
use std::time::{Duration, Instant};

use log::{debug, info};

/// Target simulation rate (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
pub const MAX_STEPS_PER_FRAME: u32 = 5;

/// Stepper timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,

    /// Time of last frame, for `begin_frame`
    last_frame_time: Instant,

    /// Whether stepping is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total steps handed out
    update_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Begin a new frame using wall-clock time, returns the number of fixed
    /// steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of elapsed time, returns the number of fixed
    /// steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop time we could not catch up on
        if self.accumulator >= FIXED_TIMESTEP_DURATION {
            debug!(
                "Stepper fell behind, dropping {:.1}ms",
                self.accumulator.as_secs_f32() * 1000.0
            );
            self.accumulator = Duration::ZERO;
        }

        self.update_count += steps as u64;
        steps
    }

    /// Get the fixed timestep for simulation steps (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation alpha between the last two simulated states, in [0, 1).
    /// Renderers may blend with it; it never feeds back into the simulation.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f32() / FIXED_TIMESTEP).min(1.0)
    }

    /// Get total number of frames seen
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of steps handed out
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if stepping is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause stepping
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("Game paused");
        }
    }

    /// Resume stepping
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
