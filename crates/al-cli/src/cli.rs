//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{attendance, contacts, journals, locations, record};

/// Attendance journal.
///
/// Records check-ins and check-outs at venues in per-day journals and derives
/// attendance lists and contacts from them.
#[derive(Debug, Parser)]
#[command(name = "al", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a check-in and print its session token.
    Login(record::LoginArgs),

    /// Record a check-out for a session token.
    Logout(record::LogoutArgs),

    /// List the locations a person visited on a day.
    Locations(locations::LocationsArgs),

    /// Export the attendance list of a location as CSV.
    Attendance(attendance::AttendanceArgs),

    /// List everyone who shared a location with a person.
    Contacts(contacts::ContactsArgs),

    /// List the days that have a journal.
    Journals,
}
