//! Session lifecycle events.
//!
//! Every observable state change produces an `Event`. Consumers (the CLI, or
//! any other front end) poll the session and print or react to events; the
//! core itself never subscribes to anything.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::ClockState;
use crate::timeline::Cue;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        workout_id: i64,
        title: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// Program end crossed while looping; playback wrapped to the start.
    SessionLooped {
        lap: u64,
        at: DateTime<Utc>,
    },
    /// Program end crossed under the halt policy; the clock stopped.
    SessionFinished {
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: ClockState,
        cue: Cue,
        remaining_secs: u64,
        phase: f64,
        elapsed_ms: u64,
        rep: u64,
        total_reps: u64,
        lap: u64,
        finished: bool,
        at: DateTime<Utc>,
    },
}
