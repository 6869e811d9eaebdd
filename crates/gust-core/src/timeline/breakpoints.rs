//! Phase timeline: workout expansion and continuous sampling.
//!
//! The builder flattens a workout into a time-ordered list of breakpoints,
//! one per sub-phase start. The sampler interpolates linearly between
//! breakpoints to produce the wave position for any elapsed time.
//!
//! Phase convention: 1.0 is lungs full (wave crest), 0.0 is empty (trough).
//! Per repetition the breakpoint values run [0, 1, 1, 0] -- breathe-in starts
//! empty, hold and breathe-out start full, regenerate starts empty -- so
//! interpolation ramps up across breathe-in, holds the crest, ramps down
//! across breathe-out, and rests at the trough through regenerate.

use serde::{Deserialize, Serialize};

use crate::workout::Workout;

/// Wave position when there is nothing to sample.
pub const NEUTRAL_PHASE: f64 = 0.5;

/// Phase value at a lungs-empty sub-phase start.
pub const PHASE_EMPTY: f64 = 0.0;

/// Phase value at a lungs-full sub-phase start.
pub const PHASE_FULL: f64 = 1.0;

/// One (time, target) pair in a flattened workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Start of the sub-phase, milliseconds from workout start.
    pub at_ms: u64,
    /// Wave position the animation must occupy at this instant.
    pub phase: f64,
}

/// Flattened, time-ordered phase track for one workout.
///
/// Rebuilt whenever the workout changes; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    points: Vec<Breakpoint>,
    total_ms: u64,
}

impl Timeline {
    /// Expand a workout into its phase track.
    ///
    /// Walks stages in order, repetitions within each stage, and emits one
    /// breakpoint at the start of each of the four sub-phases. The cursor
    /// advances by each sub-phase's duration after its breakpoint is emitted,
    /// so the final cursor equals the workout duration in milliseconds.
    ///
    /// A workout with no stages yields an empty timeline; sampling it
    /// returns [`NEUTRAL_PHASE`].
    pub fn build(workout: &Workout) -> Self {
        let mut points = Vec::with_capacity(workout.total_reps() as usize * 4);
        let mut cursor: u64 = 0;
        for stage in &workout.stages {
            for _ in 0..stage.reps {
                points.push(Breakpoint {
                    at_ms: cursor,
                    phase: PHASE_EMPTY,
                });
                cursor += stage.breath_in_secs as u64 * 1000;
                points.push(Breakpoint {
                    at_ms: cursor,
                    phase: PHASE_FULL,
                });
                cursor += stage.hold_secs as u64 * 1000;
                points.push(Breakpoint {
                    at_ms: cursor,
                    phase: PHASE_FULL,
                });
                cursor += stage.breath_out_secs as u64 * 1000;
                points.push(Breakpoint {
                    at_ms: cursor,
                    phase: PHASE_EMPTY,
                });
                cursor += stage.regenerate_secs as u64 * 1000;
            }
        }
        Self {
            points,
            total_ms: cursor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.points
    }

    /// Final builder cursor: the workout duration in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Sample the wave position at `elapsed_ms`.
    ///
    /// Clamps outside `[first.at_ms, last.at_ms]` rather than extrapolating.
    /// Between breakpoints the value is linearly interpolated over the
    /// containing segment. Always in `[0, 1]`.
    pub fn phase_at(&self, elapsed_ms: u64) -> f64 {
        let Some(first) = self.points.first() else {
            return NEUTRAL_PHASE;
        };
        let last = self.points.last().unwrap_or(first);
        if elapsed_ms <= first.at_ms {
            return first.phase;
        }
        if elapsed_ms >= last.at_ms {
            return last.phase;
        }
        // First breakpoint strictly after elapsed_ms. Because elapsed_ms lies
        // strictly inside [first, last], both neighbours exist and any run of
        // equal-time breakpoints sits entirely on one side, so t1 > t0 and
        // the division below is safe even with zero-duration sub-phases.
        let idx = self.points.partition_point(|b| b.at_ms <= elapsed_ms);
        let lo = self.points[idx - 1];
        let hi = self.points[idx];
        let span = (hi.at_ms - lo.at_ms) as f64;
        let frac = (elapsed_ms - lo.at_ms) as f64 / span;
        lo.phase + frac * (hi.phase - lo.phase)
    }
}
