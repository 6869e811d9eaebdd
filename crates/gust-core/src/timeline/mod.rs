//! Workout timeline: continuous phase track plus discrete cue track.
//!
//! Both tracks are derived from the same stage/rep/sub-phase expansion and
//! are pure functions of the workout -- rebuilt whenever it changes, never
//! mutated in place.

mod breakpoints;
mod cue;

pub use breakpoints::{Breakpoint, Timeline, NEUTRAL_PHASE, PHASE_EMPTY, PHASE_FULL};
pub use cue::{cue_at, cue_windows, lead_in_ms, window_at, Cue, CueWindow};
