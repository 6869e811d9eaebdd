pub mod config;
pub mod start;
pub mod workout;
