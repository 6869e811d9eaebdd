//! # Gust Core Library
//!
//! Core business logic for Gust, a breathing-exercise trainer. The library
//! follows a CLI-first philosophy: everything is available to a standalone
//! binary, and any GUI would be a thin layer over the same crate.
//!
//! ## Architecture
//!
//! - **Workout model**: validated Stage/Workout value objects with derived
//!   duration and repetition totals
//! - **Timeline**: pure expansion of a workout into a phase breakpoint track
//!   (for the wave animation) and a cue window track (for the countdown)
//! - **Session**: a wall-clock driven clock plus a player that turns elapsed
//!   time into per-tick snapshots; the caller supplies the tick signal
//! - **Storage**: SQLite workout store and TOML configuration
//!
//! ## Key Components
//!
//! - [`Workout`] / [`Stage`]: the workout definition
//! - [`Timeline`]: phase sampling for the wave renderer
//! - [`Session`]: one playback instance, polled for [`SessionSnapshot`]s
//! - [`WorkoutDb`]: workout persistence
//! - [`Config`]: application configuration

pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timeline;
pub mod workout;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use session::{ClockState, CompletionPolicy, Session, SessionClock, SessionSnapshot};
pub use storage::{Config, WorkoutDb};
pub use timeline::{Breakpoint, Cue, CueWindow, Timeline};
pub use workout::{Stage, Workout, ADD_BUTTON_ID};
