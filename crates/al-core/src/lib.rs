//! Core domain logic for the attendance journal.
//!
//! This crate contains the fundamental types and logic for:
//! - Dates and timestamps used to partition and order journal entries
//! - People, locations and the Login/Logout entries recorded for them
//! - Attendance: pairing Login/Logout entries into visits per location
//! - Contact tracing: overlapping visits at shared locations

mod action;
mod attendance;
mod contact;
mod journal;
mod person;
mod time;
mod types;

#[cfg(test)]
mod fixtures;

pub use action::Action;
pub use attendance::{AttendanceEntry, AttendanceList, HEADER};
pub use contact::Contact;
pub use journal::{Journal, JournalEntry};
pub use person::{Address, Person};
pub use time::{Date, Timestamp, format_clock};
pub use types::{Location, SessionToken, ValidationError};
