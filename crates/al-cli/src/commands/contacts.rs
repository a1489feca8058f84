//! Contacts command: who shared a location with a person.

use std::io::Write;

use al_core::Date;
use anyhow::Result;
use clap::Args;

use super::util::{PersonArgs, date_or_today, format_duration};
use crate::Config;

#[derive(Debug, Args)]
pub struct ContactsArgs {
    /// Day to look at as YYYY-MM-DD (default: today).
    #[arg(long)]
    pub date: Option<Date>,

    #[command(flatten)]
    pub person: PersonArgs,
}

/// Writes `name<TAB>location<TAB>HH:MM:SS` per contact.
pub fn run<W: Write>(writer: &mut W, args: &ContactsArgs, config: &Config) -> Result<()> {
    let journal = config.store().read_or_empty(date_or_today(args.date))?;
    for contact in journal.contacts_for_person(&args.person.to_person()) {
        writeln!(
            writer,
            "{}\t{}\t{}",
            contact.person,
            contact.location,
            format_duration(contact.duration)
        )?;
    }
    Ok(())
}
