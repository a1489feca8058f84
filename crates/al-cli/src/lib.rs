//! Attendance journal CLI library.
//!
//! This crate provides the CLI interface for the attendance journal.

mod cli;
pub mod commands;
mod config;
pub mod export;

pub use cli::{Cli, Commands};
pub use config::Config;
