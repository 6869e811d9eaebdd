//! Session playback: elapsed-time clock plus the per-tick player.

mod clock;
mod player;

pub use clock::{ClockState, CompletionPolicy, SessionClock, TickOutcome};
pub use player::{Session, SessionSnapshot};
