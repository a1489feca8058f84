//! Attendance command: CSV attendance list of one location.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use al_core::{Date, Location};
use anyhow::{Context, Result};
use clap::Args;

use super::util::date_or_today;
use crate::Config;
use crate::export::write_csv;

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    /// Day to export as YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<Date>,

    /// Venue to export.
    #[arg(long)]
    pub location: String,

    /// Write the CSV to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, args: &AttendanceArgs, config: &Config) -> Result<()> {
    let location = Location::new(args.location.as_str()).context("invalid --location")?;
    let journal = config.store().read_or_empty(date_or_today(args.date))?;
    let list = journal.attendance_list_for_location(&location);
    tracing::debug!(date = %journal.date(), %location, visits = list.len(), "built attendance list");

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(BufWriter::new(file), &list)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => write_csv(writer, &list).context("failed to write attendance list")?,
    }
    Ok(())
}
