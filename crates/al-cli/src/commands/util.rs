//! Shared utilities for CLI commands.

use al_core::{Date, Person};
use chrono::Duration;
use clap::Args;

/// Identifies a visitor by name and address.
#[derive(Debug, Clone, Args)]
pub struct PersonArgs {
    /// First name.
    #[arg(long)]
    pub first: String,

    /// Last name.
    #[arg(long)]
    pub last: String,

    /// Street name.
    #[arg(long)]
    pub street: String,

    /// House number.
    #[arg(long)]
    pub number: String,

    /// Postal code.
    #[arg(long)]
    pub zip: String,

    /// City.
    #[arg(long)]
    pub city: String,
}

impl PersonArgs {
    pub fn to_person(&self) -> Person {
        Person::new(
            &self.first,
            &self.last,
            &self.street,
            &self.number,
            &self.zip,
            &self.city,
        )
    }
}

/// The requested day, defaulting to today.
pub fn date_or_today(date: Option<Date>) -> Date {
    date.unwrap_or_else(Date::today)
}

/// Formats a duration as `HH:MM:SS`. Negative durations are shown as zero.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}
