//! Discrete cue track: action labels and countdowns.
//!
//! The cue track covers the whole session program: a GetReady pre-roll whose
//! length is the first stage's regenerate duration, then the same
//! stage/rep/sub-phase walk the phase builder performs, as labeled half-open
//! windows. A session shows the containing window's label plus a per-second
//! countdown to its end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::workout::Workout;

/// What the user should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    GetReady,
    BreatheIn,
    Hold,
    BreatheOut,
    Relax,
    Finished,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Cue::GetReady => "Get ready",
            Cue::BreatheIn => "Breathe in",
            Cue::Hold => "Hold",
            Cue::BreatheOut => "Breathe out",
            Cue::Relax => "Relax",
            Cue::Finished => "Finished",
        };
        f.write_str(label)
    }
}

/// One labeled span of the session program, `[start_ms, end_ms)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueWindow {
    pub cue: Cue,
    pub start_ms: u64,
    pub end_ms: u64,
    /// 1-based cumulative repetition ordinal; 0 for the pre-roll.
    pub rep: u64,
}

/// Length of the GetReady pre-roll: the first stage's regenerate duration.
pub fn lead_in_ms(workout: &Workout) -> u64 {
    workout
        .stages
        .first()
        .map(|s| s.regenerate_secs as u64 * 1000)
        .unwrap_or(0)
}

/// Expand a workout into its cue windows.
///
/// Windows are contiguous and non-overlapping, covering
/// `[0, lead_in + duration)`. Zero-length sub-phases produce no window.
/// A stage-less workout has no windows at all.
pub fn cue_windows(workout: &Workout) -> Vec<CueWindow> {
    let mut windows = Vec::new();
    let mut cursor: u64 = 0;
    let mut push = |cue, start: u64, len_ms: u64, rep: u64| -> u64 {
        if len_ms > 0 {
            windows.push(CueWindow {
                cue,
                start_ms: start,
                end_ms: start + len_ms,
                rep,
            });
        }
        start + len_ms
    };

    cursor = push(Cue::GetReady, cursor, lead_in_ms(workout), 0);

    let mut rep_ordinal: u64 = 0;
    for stage in &workout.stages {
        for _ in 0..stage.reps {
            rep_ordinal += 1;
            cursor = push(
                Cue::BreatheIn,
                cursor,
                stage.breath_in_secs as u64 * 1000,
                rep_ordinal,
            );
            cursor = push(Cue::Hold, cursor, stage.hold_secs as u64 * 1000, rep_ordinal);
            cursor = push(
                Cue::BreatheOut,
                cursor,
                stage.breath_out_secs as u64 * 1000,
                rep_ordinal,
            );
            cursor = push(
                Cue::Relax,
                cursor,
                stage.regenerate_secs as u64 * 1000,
                rep_ordinal,
            );
        }
    }
    windows
}

/// The window containing `elapsed_ms`, if any.
pub fn window_at(windows: &[CueWindow], elapsed_ms: u64) -> Option<&CueWindow> {
    windows
        .iter()
        .find(|w| elapsed_ms >= w.start_ms && elapsed_ms < w.end_ms)
}

/// The cue and remaining whole seconds at `elapsed_ms` into the program.
///
/// Remaining seconds is `ceil((end - elapsed) / 1000)`: an L-second window
/// counts L, L-1, ..., 1 and switches label at the boundary. Past the last
/// window the result is `(Finished, 0)`.
pub fn cue_at(windows: &[CueWindow], elapsed_ms: u64) -> (Cue, u64) {
    match window_at(windows, elapsed_ms) {
        Some(w) => (w.cue, (w.end_ms - elapsed_ms).div_ceil(1000)),
        None => (Cue::Finished, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Stage;

    fn box_workout(reps: u32) -> Workout {
        Workout::new(1, "Box", 0, vec![Stage::new(4, 4, 4, 4, reps).unwrap()]).unwrap()
    }

    #[test]
    fn lead_in_is_first_stage_regenerate() {
        assert_eq!(lead_in_ms(&box_workout(2)), 4_000);
        assert_eq!(lead_in_ms(&Workout::add_card()), 0);
    }

    #[test]
    fn windows_partition_the_program_contiguously() {
        let w = box_workout(2);
        let windows = cue_windows(&w);
        assert_eq!(windows.first().unwrap().cue, Cue::GetReady);
        assert_eq!(
            windows.last().unwrap().end_ms,
            lead_in_ms(&w) + w.duration_ms()
        );
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end_ms, pair[1].start_ms);
        }
    }

    #[test]
    fn zero_length_subphases_are_skipped() {
        let w = Workout::new(1, "4-7-8", 0, vec![Stage::new(4, 7, 8, 0, 2).unwrap()]).unwrap();
        let windows = cue_windows(&w);
        // No pre-roll (regenerate = 0) and no Relax windows.
        assert!(windows.iter().all(|w| w.cue != Cue::Relax));
        assert!(windows.iter().all(|w| w.cue != Cue::GetReady));
        assert_eq!(windows.len(), 6);
    }

    #[test]
    fn countdown_ticks_down_to_one_then_switches() {
        let windows = cue_windows(&box_workout(1));
        // GetReady pre-roll: 4 seconds.
        assert_eq!(cue_at(&windows, 0), (Cue::GetReady, 4));
        assert_eq!(cue_at(&windows, 3_001), (Cue::GetReady, 1));
        assert_eq!(cue_at(&windows, 3_999), (Cue::GetReady, 1));
        // Boundary: first breathe-in begins.
        assert_eq!(cue_at(&windows, 4_000), (Cue::BreatheIn, 4));
        assert_eq!(cue_at(&windows, 5_000), (Cue::BreatheIn, 3));
        assert_eq!(cue_at(&windows, 8_000), (Cue::Hold, 4));
    }

    #[test]
    fn remaining_counts_strictly_decrease_within_a_window() {
        let windows = cue_windows(&box_workout(1));
        let (_, mut prev) = cue_at(&windows, 4_000);
        for t in (5_000..8_000).step_by(1_000) {
            let (cue, remaining) = cue_at(&windows, t);
            assert_eq!(cue, Cue::BreatheIn);
            assert!(remaining < prev);
            prev = remaining;
        }
        assert_eq!(prev, 1);
    }

    #[test]
    fn past_the_end_is_finished() {
        let w = box_workout(1);
        let windows = cue_windows(&w);
        let program = lead_in_ms(&w) + w.duration_ms();
        assert_eq!(cue_at(&windows, program), (Cue::Finished, 0));
        assert_eq!(cue_at(&windows, program + 10_000), (Cue::Finished, 0));
    }

    #[test]
    fn stage_less_workout_is_always_finished() {
        let windows = cue_windows(&Workout::add_card());
        assert!(windows.is_empty());
        assert_eq!(cue_at(&windows, 0), (Cue::Finished, 0));
    }

    #[test]
    fn rep_ordinal_is_cumulative_across_stages() {
        let w = Workout::new(
            1,
            "Mixed",
            0,
            vec![
                Stage::new(2, 0, 2, 0, 2).unwrap(),
                Stage::new(4, 4, 4, 4, 1).unwrap(),
            ],
        )
        .unwrap();
        let windows = cue_windows(&w);
        let max_rep = windows.iter().map(|w| w.rep).max().unwrap();
        assert_eq!(max_rep, w.total_reps());
    }
}
