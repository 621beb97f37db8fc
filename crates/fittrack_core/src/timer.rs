//! Rest timer between sets.
//!
//! The timer does not own a clock. Whoever drives it calls [`RestTimer::tick`]
//! with the elapsed seconds; the timer reports when the rest period is over and
//! rearms itself to its configured length.

use serde::Serialize;

use crate::FitTrackError;

pub const DEFAULT_REST_SECS: u32 = 90;
pub const MIN_CUSTOM_SECS: u32 = 10;
pub const MAX_CUSTOM_SECS: u32 = 600;
/// Quick-pick lengths offered next to the custom input.
pub const PRESETS: [u32; 4] = [30, 60, 90, 120];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerEvent {
    Idle,
    Running { remaining: u32 },
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestTimer {
    length: u32,
    remaining: u32,
    running: bool,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECS)
    }
}

impl RestTimer {
    pub fn new(length: u32) -> Self {
        Self {
            length,
            remaining: length,
            running: false,
        }
    }

    /// Validate a user-entered length.
    pub fn check_custom(secs: u32) -> Result<u32, FitTrackError> {
        if (MIN_CUSTOM_SECS..=MAX_CUSTOM_SECS).contains(&secs) {
            Ok(secs)
        } else {
            Err(FitTrackError::InvalidTimer(format!(
                "rest length must be between {MIN_CUSTOM_SECS} and {MAX_CUSTOM_SECS} seconds, got {secs}"
            )))
        }
    }

    /// Set a new length. A running timer restarts with it.
    pub fn set(&mut self, secs: u32) {
        self.length = secs;
        self.remaining = secs;
    }

    pub fn start(&mut self) -> bool {
        if self.running || self.remaining == 0 {
            return false;
        }
        self.running = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.length;
    }

    pub fn tick(&mut self, elapsed_secs: u32) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        self.remaining = self.remaining.saturating_sub(elapsed_secs);
        if self.remaining == 0 {
            self.reset();
            return TimerEvent::Finished;
        }
        TimerEvent::Running {
            remaining: self.remaining,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// "MM:SS".
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
