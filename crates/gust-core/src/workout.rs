//! Workout and Stage value objects.
//!
//! A workout is an ordered list of breathing stages. Each stage describes one
//! breathe-in / hold / breathe-out / regenerate cycle and how many times it
//! repeats. Workouts are immutable once constructed; a session never mutates
//! the workout it plays.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Reserved id for the carousel's "add new workout" card.
///
/// The add card has no stages and is never playable; it exists only so list
/// consumers can render the authoring affordance alongside real workouts.
pub const ADD_BUTTON_ID: i64 = -1;

/// One breathing phase group: four sub-phase durations plus a repeat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Breathe-in duration in seconds.
    pub breath_in_secs: u32,
    /// Hold (lungs full) duration in seconds.
    pub hold_secs: u32,
    /// Breathe-out duration in seconds.
    pub breath_out_secs: u32,
    /// Regenerate (rest, lungs empty) duration in seconds.
    pub regenerate_secs: u32,
    /// How many times this stage repeats. Must be at least 1.
    pub reps: u32,
}

impl Stage {
    pub fn new(
        breath_in_secs: u32,
        hold_secs: u32,
        breath_out_secs: u32,
        regenerate_secs: u32,
        reps: u32,
    ) -> Result<Self, ValidationError> {
        if reps < 1 {
            return Err(ValidationError::InvalidStage { reps });
        }
        Ok(Self {
            breath_in_secs,
            hold_secs,
            breath_out_secs,
            regenerate_secs,
            reps,
        })
    }

    /// Duration of a single repetition in seconds.
    pub fn cycle_secs(&self) -> u64 {
        self.breath_in_secs as u64
            + self.hold_secs as u64
            + self.breath_out_secs as u64
            + self.regenerate_secs as u64
    }

    /// Duration of all repetitions in seconds.
    pub fn duration_secs(&self) -> u64 {
        self.cycle_secs().saturating_mul(self.reps as u64)
    }
}

/// An ordered sequence of stages plus display metadata.
///
/// `color` is a packed ARGB value; the core treats it as opaque and only
/// carries it for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub title: String,
    pub color: u32,
    pub stages: Vec<Stage>,
}

impl Workout {
    /// Construct a validated workout.
    ///
    /// Rejects any stage with `reps < 1` and an empty title on anything that
    /// is not the reserved add card.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        color: u32,
        stages: Vec<Stage>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if let Some(stage) = stages.iter().find(|s| s.reps < 1) {
            return Err(ValidationError::InvalidStage { reps: stage.reps });
        }
        if title.trim().is_empty() && id != ADD_BUTTON_ID {
            return Err(ValidationError::InvalidWorkout {
                reason: "title must not be empty".into(),
            });
        }
        Ok(Self {
            id,
            title,
            color,
            stages,
        })
    }

    /// The "add new workout" carousel card. Empty stage list, never playable.
    pub fn add_card() -> Self {
        Self {
            id: ADD_BUTTON_ID,
            title: String::new(),
            color: 0,
            stages: Vec::new(),
        }
    }

    pub fn is_add_card(&self) -> bool {
        self.id == ADD_BUTTON_ID
    }

    /// A workout is playable if it has at least one stage.
    ///
    /// Validation already guarantees `reps >= 1` on every stage, so any
    /// non-empty stage list yields at least one repetition.
    pub fn is_playable(&self) -> bool {
        !self.stages.is_empty()
    }

    /// Total playback duration in seconds.
    pub fn duration_secs(&self) -> u64 {
        self.stages.iter().map(|s| s.duration_secs()).sum()
    }

    /// Total playback duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_secs().saturating_mul(1000)
    }

    /// Sum of repetitions across all stages.
    pub fn total_reps(&self) -> u64 {
        self.stages.iter().map(|s| s.reps as u64).sum()
    }

    /// Built-in catalogue used to seed an empty store.
    ///
    /// Ids are 0 here; the store assigns real ids on insert.
    pub fn presets() -> Vec<Workout> {
        let stage = |i, h, o, r, reps| Stage {
            breath_in_secs: i,
            hold_secs: h,
            breath_out_secs: o,
            regenerate_secs: r,
            reps,
        };
        vec![
            Workout {
                id: 0,
                title: "Box Breathing".into(),
                color: 0xFF3B82F6,
                stages: vec![stage(4, 4, 4, 4, 6)],
            },
            Workout {
                id: 0,
                title: "4-7-8 Tranquility".into(),
                color: 0xFF8B5CF6,
                stages: vec![stage(4, 7, 8, 0, 4)],
            },
            Workout {
                id: 0,
                title: "Coherence".into(),
                color: 0xFF10B981,
                stages: vec![stage(5, 0, 5, 0, 12)],
            },
            Workout {
                id: 0,
                title: "Deep Recovery".into(),
                color: 0xFFF59E0B,
                stages: vec![stage(2, 0, 2, 0, 30), stage(4, 30, 8, 10, 3)],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_rejects_zero_reps() {
        assert!(matches!(
            Stage::new(4, 4, 4, 4, 0),
            Err(ValidationError::InvalidStage { reps: 0 })
        ));
        assert!(Stage::new(4, 4, 4, 4, 1).is_ok());
    }

    #[test]
    fn workout_rejects_empty_title() {
        let stages = vec![Stage::new(4, 4, 4, 4, 2).unwrap()];
        assert!(matches!(
            Workout::new(1, "  ", 0xFF000000, stages),
            Err(ValidationError::InvalidWorkout { .. })
        ));
    }

    #[test]
    fn add_card_is_exempt_from_title_validation() {
        let card = Workout::add_card();
        assert!(card.is_add_card());
        assert!(!card.is_playable());
        assert_eq!(card.duration_secs(), 0);
    }

    #[test]
    fn derived_totals() {
        let w = Workout::new(
            1,
            "Box",
            0xFF3B82F6,
            vec![Stage::new(4, 4, 4, 4, 2).unwrap()],
        )
        .unwrap();
        assert_eq!(w.duration_secs(), 32);
        assert_eq!(w.duration_ms(), 32_000);
        assert_eq!(w.total_reps(), 2);
    }

    #[test]
    fn multi_stage_totals_sum_in_order() {
        let w = Workout::new(
            1,
            "Mixed",
            0,
            vec![
                Stage::new(2, 0, 2, 0, 3).unwrap(),
                Stage::new(4, 7, 8, 0, 2).unwrap(),
            ],
        )
        .unwrap();
        assert_eq!(w.duration_secs(), 4 * 3 + 19 * 2);
        assert_eq!(w.total_reps(), 5);
    }

    #[test]
    fn presets_are_all_playable_and_valid() {
        for p in Workout::presets() {
            assert!(p.is_playable());
            assert!(!p.title.is_empty());
            assert!(p.stages.iter().all(|s| s.reps >= 1));
        }
    }
}
