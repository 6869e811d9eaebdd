//! Session player: one playback instance of a workout.
//!
//! Owns the validated workout, its derived phase timeline and cue windows,
//! and a [`SessionClock`] sized to the whole program (GetReady pre-roll plus
//! workout duration). Per tick it produces a [`SessionSnapshot`] for the
//! renderer -- the session pushes nothing; front ends poll.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::{ClockState, CompletionPolicy, SessionClock, TickOutcome};
use crate::error::ValidationError;
use crate::events::Event;
use crate::timeline::{cue_windows, lead_in_ms, window_at, Cue, CueWindow, Timeline};
use crate::workout::Workout;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: ClockState,
    pub cue: Cue,
    /// Whole seconds left in the current cue window.
    pub remaining_secs: u64,
    /// Wave position in [0, 1]; 1.0 is lungs full.
    pub phase: f64,
    pub elapsed_ms: u64,
    /// 1-based repetition ordinal, 0 during the pre-roll or when finished.
    pub rep: u64,
    pub total_reps: u64,
    pub lap: u64,
    pub finished: bool,
}

/// One playback instance of a workout.
#[derive(Debug, Clone)]
pub struct Session {
    workout: Workout,
    timeline: Timeline,
    windows: Vec<CueWindow>,
    lead_in_ms: u64,
    clock: SessionClock,
}

impl Session {
    /// Build a session for a playable workout.
    ///
    /// The add card and any stage-less workout are rejected: there is
    /// nothing to play.
    pub fn new(workout: Workout, policy: CompletionPolicy) -> Result<Self, ValidationError> {
        if !workout.is_playable() {
            return Err(ValidationError::NotPlayable { id: workout.id });
        }
        let timeline = Timeline::build(&workout);
        let windows = cue_windows(&workout);
        let lead_in = lead_in_ms(&workout);
        let clock = SessionClock::new(lead_in + timeline.total_ms(), policy);
        Ok(Self {
            workout,
            timeline,
            windows,
            lead_in_ms: lead_in,
            clock,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// GetReady pre-roll length in milliseconds.
    pub fn lead_in_ms(&self) -> u64 {
        self.lead_in_ms
    }

    /// Whole program length: pre-roll plus workout duration.
    pub fn program_ms(&self) -> u64 {
        self.clock.total_ms()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Current renderer-facing state.
    ///
    /// The phase track is sampled at `elapsed - lead_in`, so the wave holds
    /// the trough during GetReady and runs aligned with the cue labels from
    /// the first breathe-in onward.
    pub fn snapshot(&self) -> SessionSnapshot {
        let elapsed = self.clock.elapsed_ms();
        let window = window_at(&self.windows, elapsed);
        let (cue, remaining_secs) = match window {
            Some(w) => (w.cue, (w.end_ms - elapsed).div_ceil(1000)),
            None => (Cue::Finished, 0),
        };
        SessionSnapshot {
            state: self.clock.state(),
            cue,
            remaining_secs,
            phase: self.timeline.phase_at(elapsed.saturating_sub(self.lead_in_ms)),
            elapsed_ms: elapsed,
            rep: window.map(|w| w.rep).unwrap_or(0),
            total_reps: self.workout.total_reps(),
            lap: self.clock.lap(),
            finished: self.clock.finished(),
        }
    }

    /// The snapshot as a pollable event.
    pub fn snapshot_event(&self) -> Event {
        let s = self.snapshot();
        Event::StateSnapshot {
            state: s.state,
            cue: s.cue,
            remaining_secs: s.remaining_secs,
            phase: s.phase,
            elapsed_ms: s.elapsed_ms,
            rep: s.rep,
            total_reps: s.total_reps,
            lap: s.lap,
            finished: s.finished,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flip between running and stopped.
    pub fn toggle(&mut self, now_ms: u64) -> Event {
        match self.clock.toggle(now_ms) {
            ClockState::Running => Event::SessionStarted {
                workout_id: self.workout.id,
                title: self.workout.title.clone(),
                duration_secs: self.workout.duration_secs(),
                at: Utc::now(),
            },
            ClockState::Stopped => Event::SessionStopped {
                elapsed_ms: self.clock.elapsed_ms(),
                at: Utc::now(),
            },
        }
    }

    /// Advance the clock. Returns an event when the program end is crossed.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        match self.clock.tick(now_ms) {
            TickOutcome::Looped => Some(Event::SessionLooped {
                lap: self.clock.lap(),
                at: Utc::now(),
            }),
            TickOutcome::Finished => Some(Event::SessionFinished { at: Utc::now() }),
            TickOutcome::Progress | TickOutcome::Idle => None,
        }
    }

    pub fn reset(&mut self) -> Event {
        self.clock.reset();
        Event::SessionReset { at: Utc::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::PHASE_EMPTY;
    use crate::workout::Stage;

    fn box_workout(reps: u32) -> Workout {
        Workout::new(1, "Box", 0, vec![Stage::new(4, 4, 4, 4, reps).unwrap()]).unwrap()
    }

    #[test]
    fn rejects_unplayable_workouts() {
        assert!(matches!(
            Session::new(Workout::add_card(), CompletionPolicy::Loop),
            Err(ValidationError::NotPlayable { .. })
        ));
    }

    #[test]
    fn program_spans_lead_in_plus_duration() {
        let session = Session::new(box_workout(2), CompletionPolicy::Loop).unwrap();
        assert_eq!(session.lead_in_ms(), 4_000);
        assert_eq!(session.program_ms(), 4_000 + 32_000);
    }

    #[test]
    fn wave_holds_trough_during_get_ready() {
        let mut session = Session::new(box_workout(1), CompletionPolicy::Halt).unwrap();
        session.toggle(0);
        session.tick(2_000);
        let snap = session.snapshot();
        assert_eq!(snap.cue, Cue::GetReady);
        assert_eq!(snap.rep, 0);
        assert_eq!(snap.phase, PHASE_EMPTY);
    }

    #[test]
    fn phase_and_cue_are_aligned_after_lead_in() {
        let mut session = Session::new(box_workout(1), CompletionPolicy::Halt).unwrap();
        session.toggle(0);
        // 2 s into the first breathe-in (lead-in is 4 s).
        session.tick(6_000);
        let snap = session.snapshot();
        assert_eq!(snap.cue, Cue::BreatheIn);
        assert_eq!(snap.rep, 1);
        assert!(snap.phase > 0.0 && snap.phase < 1.0);
    }

    #[test]
    fn looping_session_never_reports_finished() {
        let mut session = Session::new(box_workout(1), CompletionPolicy::Loop).unwrap();
        session.toggle(0);
        let event = session.tick(session.program_ms() + 100);
        assert!(matches!(event, Some(Event::SessionLooped { lap: 1, .. })));
        let snap = session.snapshot();
        assert!(!snap.finished);
        assert_eq!(snap.lap, 1);
        assert!(snap.elapsed_ms < 100);
    }

    #[test]
    fn halting_session_finishes_and_stops() {
        let mut session = Session::new(box_workout(1), CompletionPolicy::Halt).unwrap();
        session.toggle(0);
        let event = session.tick(session.program_ms() + 100);
        assert!(matches!(event, Some(Event::SessionFinished { .. })));
        let snap = session.snapshot();
        assert!(snap.finished);
        assert!(!session.is_running());
        assert_eq!(snap.cue, Cue::Finished);
        assert_eq!(snap.remaining_secs, 0);
    }

    #[test]
    fn rep_ordinal_climbs_across_the_program() {
        let mut session = Session::new(box_workout(2), CompletionPolicy::Halt).unwrap();
        session.toggle(0);
        session.tick(5_000); // first rep, breathe-in
        assert_eq!(session.snapshot().rep, 1);
        session.tick(4_000 + 16_000 + 1_000); // second rep
        assert_eq!(session.snapshot().rep, 2);
        assert_eq!(session.snapshot().total_reps, 2);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut session = Session::new(box_workout(1), CompletionPolicy::Loop).unwrap();
        session.toggle(0);
        session.tick(9_000);
        session.reset();
        let snap = session.snapshot();
        assert_eq!(snap.elapsed_ms, 0);
        assert_eq!(snap.cue, Cue::GetReady);
        assert_eq!(snap.state, ClockState::Stopped);
    }
}
