//! Login and logout commands.
//!
//! These stand in for the check-in frontend: they build a journal entry and
//! append it to the day's journal.

use std::io::Write;

use al_core::{Action, JournalEntry, Location, SessionToken, Timestamp};
use anyhow::{Context, Result};
use clap::Args;
use uuid::Uuid;

use super::util::PersonArgs;
use crate::Config;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Venue being entered.
    #[arg(long)]
    pub location: String,

    /// Session token; a new one is generated if omitted.
    #[arg(long)]
    pub token: Option<String>,

    /// Event time as YYYY-MM-DDTHH:MM:SS (default: now).
    #[arg(long)]
    pub at: Option<Timestamp>,

    #[command(flatten)]
    pub person: PersonArgs,
}

#[derive(Debug, Args)]
pub struct LogoutArgs {
    /// Venue being left.
    #[arg(long)]
    pub location: String,

    /// Session token printed by the matching login.
    #[arg(long)]
    pub token: String,

    /// Event time as YYYY-MM-DDTHH:MM:SS (default: now).
    #[arg(long)]
    pub at: Option<Timestamp>,

    #[command(flatten)]
    pub person: PersonArgs,
}

/// Records a check-in and writes its session token to `writer`.
pub fn login<W: Write>(writer: &mut W, args: &LoginArgs, config: &Config) -> Result<()> {
    let session = match &args.token {
        Some(token) => SessionToken::new(token.as_str()).context("invalid --token")?,
        None => SessionToken::new(Uuid::new_v4().simple().to_string())?,
    };
    let session = append(config, Action::Login, session, &args.location, args.at, &args.person)?;
    writeln!(writer, "{session}")?;
    Ok(())
}

/// Records a check-out.
pub fn logout<W: Write>(writer: &mut W, args: &LogoutArgs, config: &Config) -> Result<()> {
    let session = SessionToken::new(args.token.as_str()).context("invalid --token")?;
    let session = append(config, Action::Logout, session, &args.location, args.at, &args.person)?;
    writeln!(writer, "{session}")?;
    Ok(())
}

fn append(
    config: &Config,
    action: Action,
    session: SessionToken,
    location: &str,
    at: Option<Timestamp>,
    person: &PersonArgs,
) -> Result<SessionToken> {
    let location = Location::new(location).context("invalid --location")?;
    let entry = JournalEntry::new(
        at.unwrap_or_else(Timestamp::now),
        session,
        action,
        location,
        person.to_person(),
    );

    let store = config.store();
    store.append(&entry).with_context(|| {
        format!(
            "failed to append to {}",
            store.partition_path(entry.date()).display()
        )
    })?;

    tracing::info!(
        action = %entry.action,
        location = %entry.location,
        person = %entry.person,
        "recorded"
    );
    Ok(entry.session)
}
