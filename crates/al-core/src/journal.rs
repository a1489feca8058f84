//! Journal entries and the per-day journal.

use crate::action::Action;
use crate::person::Person;
use crate::time::{Date, Timestamp};
use crate::types::{Location, SessionToken};

/// One recorded check-in or check-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// When the event happened.
    pub timestamp: Timestamp,
    /// Token shared by the Login and Logout of one visit.
    pub session: SessionToken,
    pub action: Action,
    pub location: Location,
    pub person: Person,
}

impl JournalEntry {
    pub fn new(
        timestamp: Timestamp,
        session: SessionToken,
        action: Action,
        location: Location,
        person: Person,
    ) -> Self {
        Self {
            timestamp,
            session,
            action,
            location,
            person,
        }
    }

    /// The day whose journal this entry belongs to.
    #[must_use]
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }
}

/// All entries recorded on one day, in the order they were appended.
///
/// A journal is a read-only snapshot; new events go through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journal {
    date: Date,
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new(date: Date, entries: Vec<JournalEntry>) -> Self {
        Self { date, entries }
    }

    /// A journal for a day without any recorded events.
    #[must_use]
    pub fn empty(date: Date) -> Self {
        Self::new(date, Vec::new())
    }

    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest event time in the journal, i.e. the end of what was observed.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.entries.iter().map(|entry| entry.timestamp).max()
    }
}
