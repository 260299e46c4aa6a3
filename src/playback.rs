//! Navigation over a finished trace, independent of any renderer.
//!
//! The controller owns the only mutable state in the pipeline: a cursor and
//! a play/pause flag. Timing belongs to whoever drives it; a scheduler calls
//! [`PlaybackController::tick`] every [`PlaybackController::interval`].

use std::str::FromStr;
use std::time::Duration;

use log::debug;

use crate::config::DEFAULT_SECONDS_PER_STEP;
use crate::error::TraceError;
use crate::step::Step;
use crate::trace::Trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// User intent, forwarded verbatim to the matching controller operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackCommand {
    SeekTo(usize),
    StepForward,
    StepBackward,
    TogglePlay,
    SetRate(f64),
}

impl FromStr for PlaybackCommand {
    type Err = TraceError;

    /// `n`/`next`, `b`/`back`, `p`/`play`/`pause`, `seek <i>`, `rate <seconds>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || TraceError::UnknownCommand {
            input: s.to_string(),
        };
        let mut words = s.split_whitespace();
        let command = match (words.next(), words.next()) {
            (Some("n" | "next"), None) => PlaybackCommand::StepForward,
            (Some("b" | "back"), None) => PlaybackCommand::StepBackward,
            (Some("p" | "play" | "pause"), None) => PlaybackCommand::TogglePlay,
            (Some("s" | "seek"), Some(index)) => {
                PlaybackCommand::SeekTo(index.parse().map_err(|_| unknown())?)
            }
            (Some("r" | "rate"), Some(rate)) => {
                PlaybackCommand::SetRate(rate.parse().map_err(|_| unknown())?)
            }
            _ => return Err(unknown()),
        };
        if words.next().is_some() {
            return Err(unknown());
        }
        Ok(command)
    }
}

#[derive(Debug)]
pub struct PlaybackController {
    trace: Trace,
    position: usize,
    state: PlaybackState,
    interval: Duration,
}

impl PlaybackController {
    pub fn new(trace: Trace) -> Self {
        PlaybackController {
            trace,
            position: 0,
            state: PlaybackState::Paused,
            interval: Duration::from_secs_f64(DEFAULT_SECONDS_PER_STEP),
        }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Swap in a new trace; the cursor goes back to the start and playback pauses.
    pub fn replace_trace(&mut self, trace: Trace) {
        self.trace = trace;
        self.position = 0;
        self.state = PlaybackState::Paused;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn seconds_per_step(&self) -> f64 {
        self.interval.as_secs_f64()
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.trace.len()
    }

    pub fn current(&self) -> Option<&Step> {
        self.trace.steps().get(self.position)
    }

    /// Advance one step. At the last step this is a no-op; reaching it while
    /// playing pauses playback.
    pub fn step_forward(&mut self) -> bool {
        let moved = !self.is_at_end();
        if moved {
            self.position += 1;
        }
        if self.is_at_end() && self.is_playing() {
            debug!("playback reached step {}, pausing", self.position);
            self.state = PlaybackState::Paused;
        }
        moved
    }

    pub fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn seek(&mut self, index: usize) -> Result<(), TraceError> {
        if index >= self.trace.len() {
            return Err(TraceError::IndexOutOfRange {
                index,
                len: self.trace.len(),
            });
        }
        self.position = index;
        Ok(())
    }

    pub fn set_playback_rate(&mut self, seconds_per_step: f64) -> Result<(), TraceError> {
        if seconds_per_step.is_nan() || seconds_per_step <= 0.0 {
            return Err(TraceError::InvalidRate {
                rate: seconds_per_step,
            });
        }
        let invalid = || TraceError::InvalidRate {
            rate: seconds_per_step,
        };
        let interval = Duration::try_from_secs_f64(seconds_per_step).map_err(|_| invalid())?;
        // sub-nanosecond rates round down to zero
        if interval.is_zero() {
            return Err(invalid());
        }
        self.interval = interval;
        Ok(())
    }

    /// Start playing. Returns `false` when already at the last step.
    pub fn play(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.state = PlaybackState::Playing;
        true
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    pub fn toggle_play(&mut self) -> PlaybackState {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
        self.state
    }

    /// One scheduler beat: advance if playing.
    pub fn tick(&mut self) -> bool {
        self.is_playing() && self.step_forward()
    }

    pub fn apply(&mut self, command: PlaybackCommand) -> Result<(), TraceError> {
        match command {
            PlaybackCommand::SeekTo(index) => self.seek(index)?,
            PlaybackCommand::StepForward => {
                self.step_forward();
            }
            PlaybackCommand::StepBackward => {
                self.step_backward();
            }
            PlaybackCommand::TogglePlay => {
                self.toggle_play();
            }
            PlaybackCommand::SetRate(rate) => self.set_playback_rate(rate)?,
        }
        Ok(())
    }
}
