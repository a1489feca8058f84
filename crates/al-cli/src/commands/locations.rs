//! Locations command: where a person checked in on a day.

use std::io::Write;

use al_core::Date;
use anyhow::Result;
use clap::Args;

use super::util::{PersonArgs, date_or_today};
use crate::Config;

#[derive(Debug, Args)]
pub struct LocationsArgs {
    /// Day to look at as YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<Date>,

    #[command(flatten)]
    pub person: PersonArgs,
}

/// Writes one visited location per line, in first-visit order.
pub fn run<W: Write>(writer: &mut W, args: &LocationsArgs, config: &Config) -> Result<()> {
    let journal = config.store().read_or_empty(date_or_today(args.date))?;
    for location in journal.visited_locations(&args.person.to_person()) {
        writeln!(writer, "{location}")?;
    }
    Ok(())
}
