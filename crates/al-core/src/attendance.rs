//! Attendance queries over a journal.
//!
//! Visits are reconstructed by pairing entries that share a session token at
//! the same location:
//!
//! ```text
//! NoSession --Login--> Open --Logout--> Closed
//! ```
//!
//! A visit still open at the end of the journal is reported without a logout
//! time. Nothing closes an open visit implicitly.

use std::collections::{HashMap, HashSet};

use chrono::Duration;

use crate::action::Action;
use crate::journal::{Journal, JournalEntry};
use crate::person::Person;
use crate::time::{Timestamp, format_clock};
use crate::types::{Location, SessionToken};

/// Column names of an exported attendance list.
pub const HEADER: [&str; 8] = [
    "FirstName",
    "LastName",
    "Street",
    "Number",
    "ZipCode",
    "City",
    "Login",
    "Logout",
];

/// One visit of a person at a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub person: Person,
    pub login: Timestamp,
    /// `None` while the visit is still open.
    pub logout: Option<Timestamp>,
}

impl AttendanceEntry {
    pub fn new(person: Person, login: Timestamp, logout: Option<Timestamp>) -> Self {
        Self {
            person,
            login,
            logout,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.logout.is_none()
    }

    /// Length of a closed visit.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.logout.map(|logout| logout.duration_since(self.login))
    }

    /// The visit as `[login, logout]`, with an open visit ending at `end_of_observation`.
    pub(crate) fn interval(&self, end_of_observation: Timestamp) -> (Timestamp, Timestamp) {
        (self.login, self.logout.unwrap_or(end_of_observation))
    }

    /// Export row in [`HEADER`] column order.
    #[must_use]
    pub fn row(&self) -> [String; 8] {
        let address = &self.person.address;
        [
            self.person.first_name.clone(),
            self.person.last_name.clone(),
            address.street.clone(),
            address.number.clone(),
            address.zip_code.clone(),
            address.city.clone(),
            self.login.clock(),
            format_clock(self.logout.as_ref()),
        ]
    }
}

/// Visits ordered by login time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceList(Vec<AttendanceEntry>);

impl AttendanceList {
    /// Builds a list, ordering the entries by login time.
    ///
    /// The sort is stable, so visits with equal login times keep their order.
    pub fn new(mut entries: Vec<AttendanceEntry>) -> Self {
        entries.sort_by_key(|entry| entry.login);
        Self(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[AttendanceEntry] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn header(&self) -> [&'static str; 8] {
        HEADER
    }

    /// Export rows, one per visit.
    pub fn rows(&self) -> impl Iterator<Item = [String; 8]> + '_ {
        self.0.iter().map(AttendanceEntry::row)
    }
}

impl<'a> IntoIterator for &'a AttendanceList {
    type Item = &'a AttendanceEntry;
    type IntoIter = std::slice::Iter<'a, AttendanceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Entries of one session token at one location.
#[derive(Debug, Default)]
struct Visit<'a> {
    login: Option<&'a JournalEntry>,
    logout: Option<&'a JournalEntry>,
}

impl Journal {
    /// Locations the person checked in or out at, in first-seen order, without repeats.
    #[must_use]
    pub fn visited_locations(&self, person: &Person) -> Vec<Location> {
        let mut seen = HashSet::new();
        let mut locations = Vec::new();
        for entry in self.entries().iter().filter(|e| &e.person == person) {
            if seen.insert(&entry.location) {
                locations.push(entry.location.clone());
            }
        }
        locations
    }

    /// Visits at `location`, ordered by login time.
    ///
    /// A logout whose token has no earlier login at this location is
    /// skipped; where the login went is unknown, so no visit is invented.
    #[must_use]
    pub fn attendance_list_for_location(&self, location: &Location) -> AttendanceList {
        let mut order: Vec<&SessionToken> = Vec::new();
        let mut visits: HashMap<&SessionToken, Visit<'_>> = HashMap::new();

        for entry in self.entries().iter().filter(|e| &e.location == location) {
            let visit = visits.entry(&entry.session).or_insert_with(|| {
                order.push(&entry.session);
                Visit::default()
            });
            if entry.action == Action::Logout && visit.login.is_none() {
                tracing::warn!(
                    date = %self.date(),
                    session = %entry.session,
                    %location,
                    person = %entry.person,
                    "logout without login, skipping"
                );
                continue;
            }
            let slot = match entry.action {
                Action::Login => &mut visit.login,
                Action::Logout => &mut visit.logout,
            };
            if slot.is_some() {
                tracing::warn!(
                    date = %self.date(),
                    session = %entry.session,
                    %location,
                    action = %entry.action,
                    "repeated action for session, keeping the first"
                );
                continue;
            }
            *slot = Some(entry);
        }

        let mut entries = Vec::with_capacity(order.len());
        for token in order {
            let Some(Visit {
                login: Some(login),
                logout,
            }) = visits.remove(token)
            else {
                continue;
            };
            entries.push(AttendanceEntry::new(
                login.person.clone(),
                login.timestamp,
                logout.map(|e| e.timestamp),
            ));
        }

        AttendanceList::new(entries)
    }
}
