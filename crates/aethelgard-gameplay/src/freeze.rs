//! Simulation freeze handling.
//!
//! While the host reports the game as paused, mid zone transition or over,
//! the world is fully frozen: no AI, no combat, no movement. Frames still
//! render the unchanged state.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Host flags sampled at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FreezeFlags {
    /// Pause menu is open
    pub paused: bool,
    /// A zone transition is in progress
    pub transitioning: bool,
    /// The player has died
    pub game_over: bool,
}

impl FreezeFlags {
    /// Returns true if any flag is set.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.paused || self.transitioning || self.game_over
    }
}

/// Why the world is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FreezeReason {
    /// Pause menu
    Paused,
    /// Zone transition
    Transitioning,
    /// Player death
    GameOver,
}

impl FreezeReason {
    /// Picks the dominant reason from a flag set.
    ///
    /// Game over outranks a transition, which outranks a pause.
    #[must_use]
    pub const fn from_flags(flags: FreezeFlags) -> Option<Self> {
        if flags.game_over {
            Some(Self::GameOver)
        } else if flags.transitioning {
            Some(Self::Transitioning)
        } else if flags.paused {
            Some(Self::Paused)
        } else {
            None
        }
    }
}

/// Tracks freeze state across frames.
#[derive(Debug, Default)]
pub struct FreezeGate {
    reason: Option<FreezeReason>,
    frozen_frames: u64,
    total_frozen_time: f64,
}

impl FreezeGate {
    /// Creates a gate in the running state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples this frame's flags. Returns true if the world must not update.
    pub fn sample(&mut self, flags: FreezeFlags, delta: f32) -> bool {
        let reason = FreezeReason::from_flags(flags);
        if reason != self.reason {
            match reason {
                Some(reason) => info!(?reason, "Simulation frozen"),
                None => info!(frozen_for = self.total_frozen_time, "Simulation resumed"),
            }
            self.reason = reason;
        }

        if self.reason.is_some() {
            self.frozen_frames += 1;
            self.total_frozen_time += f64::from(delta);
            true
        } else {
            false
        }
    }

    /// Current freeze reason.
    #[must_use]
    pub const fn reason(&self) -> Option<FreezeReason> {
        self.reason
    }

    /// Returns true if the last sampled frame was frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.reason.is_some()
    }

    /// Number of frames skipped while frozen.
    #[must_use]
    pub const fn frozen_frames(&self) -> u64 {
        self.frozen_frames
    }

    /// Total seconds spent frozen.
    #[must_use]
    pub const fn total_frozen_time(&self) -> f64 {
        self.total_frozen_time
    }
}
