// game/clock.rs

use bevy::prelude::*;

/// Stopwatch for a play-through
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct EscapeClock {
    /// Seconds spent playing (pauses excluded)
    elapsed: f32,
    running: bool,
    /// Set once the player walks out; the clock no longer moves
    finished: bool,
}

impl EscapeClock {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by a frame's delta (only while running)
    pub fn tick(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt.max(0.0);
        }
    }

    pub fn start(&mut self) {
        if !self.finished {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.start();
    }

    /// Freeze the final time
    pub fn stop(&mut self) -> f32 {
        self.running = false;
        self.finished = true;
        self.elapsed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Format seconds as `MM:SS.t`
pub fn format_time(secs: f32) -> String {
    let tenths = (secs.max(0.0) * 10.0).floor() as u64;
    let minutes = tenths / 600;
    let seconds = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", minutes, seconds, tenths % 10)
}
