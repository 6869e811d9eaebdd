//! Session clock: wall-clock driven elapsed-time state machine.
//!
//! The clock has no internal thread and never reads the system time itself.
//! The caller feeds monotonic milliseconds into `toggle()` and `tick()`; the
//! clock turns them into elapsed time within the session program and applies
//! the completion policy when the program end is crossed.
//!
//! ## State transitions
//!
//! ```text
//! Stopped -> Running -> Stopped
//! ```
//!
//! Stopping preserves elapsed time (pause semantics); only `reset()` zeroes it.

use serde::{Deserialize, Serialize};

/// What happens when elapsed time crosses the end of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// Wrap elapsed back to zero and keep running, counting laps.
    Loop,
    /// Pin elapsed at the program end, stop the clock, mark finished.
    Halt,
}

/// State of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Stopped,
    Running,
}

/// What a tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock is stopped; nothing moved.
    Idle,
    /// Elapsed advanced within the program.
    Progress,
    /// Program end crossed under [`CompletionPolicy::Loop`]; elapsed wrapped.
    Looped,
    /// Program end crossed under [`CompletionPolicy::Halt`]; clock stopped.
    Finished,
}

/// Elapsed-time state machine for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    total_ms: u64,
    policy: CompletionPolicy,
    state: ClockState,
    elapsed_ms: u64,
    /// Reference instant subtracted from incoming ticks while running.
    start_ref_ms: Option<u64>,
    lap: u64,
    finished: bool,
}

impl SessionClock {
    pub fn new(total_ms: u64, policy: CompletionPolicy) -> Self {
        Self {
            total_ms,
            policy,
            state: ClockState::Stopped,
            elapsed_ms: 0,
            start_ref_ms: None,
            lap: 0,
            finished: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Completed passes of the program while looping.
    pub fn lap(&self) -> u64 {
        self.lap
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Flip between Stopped and Running. Returns the new state.
    ///
    /// Starting after a halt-finish restarts from zero; starting after a
    /// plain stop resumes from the preserved elapsed time.
    pub fn toggle(&mut self, now_ms: u64) -> ClockState {
        match self.state {
            ClockState::Stopped => {
                if self.finished {
                    self.elapsed_ms = 0;
                    self.finished = false;
                }
                self.start_ref_ms = Some(now_ms.saturating_sub(self.elapsed_ms));
                self.state = ClockState::Running;
            }
            ClockState::Running => {
                self.flush(now_ms);
                self.start_ref_ms = None;
                self.state = ClockState::Stopped;
            }
        }
        self.state
    }

    /// Advance elapsed time to `now_ms` and apply the completion policy.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.state != ClockState::Running {
            return TickOutcome::Idle;
        }
        self.flush(now_ms);
        if self.elapsed_ms < self.total_ms {
            return TickOutcome::Progress;
        }
        match self.policy {
            CompletionPolicy::Loop => {
                // Wrap to zero from the detection instant, matching the
                // restart-the-start-reference behavior rather than a modulo.
                self.lap += 1;
                self.elapsed_ms = 0;
                self.start_ref_ms = Some(now_ms);
                TickOutcome::Looped
            }
            CompletionPolicy::Halt => {
                self.elapsed_ms = self.total_ms;
                self.state = ClockState::Stopped;
                self.start_ref_ms = None;
                self.finished = true;
                TickOutcome::Finished
            }
        }
    }

    /// Zero elapsed time and lap count; stop the clock.
    pub fn reset(&mut self) {
        self.state = ClockState::Stopped;
        self.elapsed_ms = 0;
        self.start_ref_ms = None;
        self.lap = 0;
        self.finished = false;
    }

    fn flush(&mut self, now_ms: u64) {
        if let Some(start) = self.start_ref_ms {
            self.elapsed_ms = now_ms.saturating_sub(start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut clock = SessionClock::new(10_000, CompletionPolicy::Loop);
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.toggle(1_000), ClockState::Running);
        assert_eq!(clock.toggle(2_000), ClockState::Stopped);
        assert_eq!(clock.elapsed_ms(), 1_000);
    }

    #[test]
    fn stop_preserves_elapsed_and_resume_continues() {
        let mut clock = SessionClock::new(10_000, CompletionPolicy::Loop);
        clock.toggle(0);
        clock.tick(3_000);
        clock.toggle(3_000); // stop
        assert_eq!(clock.elapsed_ms(), 3_000);
        clock.toggle(50_000); // resume much later
        clock.tick(51_000);
        assert_eq!(clock.elapsed_ms(), 4_000);
    }

    #[test]
    fn loop_policy_wraps_instead_of_pinning() {
        let mut clock = SessionClock::new(32_000, CompletionPolicy::Loop);
        clock.toggle(0);
        assert_eq!(clock.tick(32_500), TickOutcome::Looped);
        assert!(clock.elapsed_ms() < 500);
        assert_eq!(clock.lap(), 1);
        assert!(clock.is_running());
        assert_eq!(clock.tick(32_700), TickOutcome::Progress);
        assert_eq!(clock.elapsed_ms(), 200);
    }

    #[test]
    fn halt_policy_pins_and_stops() {
        let mut clock = SessionClock::new(32_000, CompletionPolicy::Halt);
        clock.toggle(0);
        assert_eq!(clock.tick(33_000), TickOutcome::Finished);
        assert_eq!(clock.elapsed_ms(), 32_000);
        assert!(!clock.is_running());
        assert!(clock.finished());
        // Further ticks are inert.
        assert_eq!(clock.tick(40_000), TickOutcome::Idle);
    }

    #[test]
    fn restart_after_finish_starts_from_zero() {
        let mut clock = SessionClock::new(5_000, CompletionPolicy::Halt);
        clock.toggle(0);
        clock.tick(6_000);
        assert!(clock.finished());
        clock.toggle(10_000);
        clock.tick(11_000);
        assert_eq!(clock.elapsed_ms(), 1_000);
        assert!(!clock.finished());
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut clock = SessionClock::new(10_000, CompletionPolicy::Loop);
        clock.toggle(0);
        clock.tick(25_000);
        clock.reset();
        assert_eq!(clock.elapsed_ms(), 0);
        assert_eq!(clock.lap(), 0);
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[test]
    fn zero_length_program_under_loop_stays_at_zero() {
        let mut clock = SessionClock::new(0, CompletionPolicy::Loop);
        clock.toggle(0);
        assert_eq!(clock.tick(100), TickOutcome::Looped);
        assert_eq!(clock.elapsed_ms(), 0);
    }

    #[test]
    fn ticks_while_stopped_are_idle() {
        let mut clock = SessionClock::new(10_000, CompletionPolicy::Loop);
        assert_eq!(clock.tick(5_000), TickOutcome::Idle);
        assert_eq!(clock.elapsed_ms(), 0);
    }
}
