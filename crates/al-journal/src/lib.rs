//! Storage layer for the attendance journal.
//!
//! Persists journal entries as one JSON Lines file per calendar day.
//!
//! # Concurrency
//!
//! A partition file is the unit of contention. [`JournalStore::append`] holds
//! an exclusive advisory lock on the partition while it writes a complete
//! record with a single `write_all`; [`JournalStore::read`] holds a shared
//! lock while loading the file. Concurrent appends therefore never interleave,
//! and a reader never observes a half-written record.
//!
//! The locks are advisory (`flock`/`LockFileEx` via `fs2`); writers that bypass
//! this crate are not coordinated.
//!
//! # Format
//!
//! Partitions are named `YYYY-MM-DD.jsonl`. Each line is one entry:
//!
//! ```text
//! {"timestamp":"2021-10-15T13:40:11","session":"5faacdf0e6e7b44a","action":"login","location":"Alte Mälzerei","first_name":"Hans","last_name":"Müller","street":"Feldweg","number":"12","zip_code":"74722","city":"Buchen"}
//! ```
//!
//! Reads are all-or-nothing: if any line fails to parse, the whole read fails
//! with [`JournalError::MalformedData`] and no entries are returned.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use al_core::{Action, Date, Journal, JournalEntry, Location, Person, SessionToken, Timestamp};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File extension of a journal partition.
pub const PARTITION_EXTENSION: &str = "jsonl";

/// Journal storage errors.
#[derive(Debug, Error)]
pub enum JournalError {
    /// No partition exists for the date.
    #[error("no journal for {date}")]
    NotFound { date: Date },
    /// A record in the partition could not be parsed.
    #[error("malformed journal {date}, line {line}: {reason}")]
    MalformedData {
        date: Date,
        line: usize,
        reason: String,
    },
    /// Reading or writing the partition failed.
    #[error("journal i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse classification of [`JournalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MalformedData,
    IoFailure,
}

impl JournalError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::MalformedData { .. } => ErrorKind::MalformedData,
            Self::Io(_) => ErrorKind::IoFailure,
        }
    }
}

/// On-disk form of a [`JournalEntry`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Record {
    timestamp: Timestamp,
    session: SessionToken,
    action: Action,
    location: Location,
    first_name: String,
    last_name: String,
    street: String,
    number: String,
    zip_code: String,
    city: String,
}

impl From<&JournalEntry> for Record {
    fn from(entry: &JournalEntry) -> Self {
        let person = &entry.person;
        Self {
            timestamp: entry.timestamp,
            session: entry.session.clone(),
            action: entry.action,
            location: entry.location.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            street: person.address.street.clone(),
            number: person.address.number.clone(),
            zip_code: person.address.zip_code.clone(),
            city: person.address.city.clone(),
        }
    }
}

impl From<Record> for JournalEntry {
    fn from(record: Record) -> Self {
        Self::new(
            record.timestamp,
            record.session,
            record.action,
            record.location,
            Person::new(
                record.first_name,
                record.last_name,
                record.street,
                record.number,
                record.zip_code,
                record.city,
            ),
        )
    }
}

/// Per-day journal files below a directory.
#[derive(Debug, Clone)]
pub struct JournalStore {
    dir: PathBuf,
}

impl JournalStore {
    /// Creates a store rooted at `dir`. The directory is created on first append.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the partition holding entries for `date`.
    #[must_use]
    pub fn partition_path(&self, date: Date) -> PathBuf {
        self.dir.join(format!("{date}.{PARTITION_EXTENSION}"))
    }

    /// Loads the journal for `date`.
    ///
    /// Fails with [`JournalError::NotFound`] if nothing was recorded that day
    /// and with [`JournalError::MalformedData`] if any record is unreadable.
    pub fn read(&self, date: Date) -> Result<Journal, JournalError> {
        let path = self.partition_path(date);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(JournalError::NotFound { date });
            }
            Err(e) => return Err(e.into()),
        };

        let mut content = Vec::new();
        file.lock_shared()?;
        let loaded = file.read_to_end(&mut content);
        file.unlock()?;
        loaded?;

        let entries = parse_partition(date, &content)?;
        tracing::debug!(%date, entries = entries.len(), "read journal");
        Ok(Journal::new(date, entries))
    }

    /// Like [`read`](Self::read), but a day without a partition yields an empty journal.
    pub fn read_or_empty(&self, date: Date) -> Result<Journal, JournalError> {
        match self.read(date) {
            Err(JournalError::NotFound { date }) => {
                tracing::info!(%date, "no journal recorded, treating as empty");
                Ok(Journal::empty(date))
            }
            other => other,
        }
    }

    /// Appends `entry` to the partition of its date, creating it if needed.
    pub fn append(&self, entry: &JournalEntry) -> Result<(), JournalError> {
        let date = entry.date();
        let mut line = serde_json::to_string(&Record::from(entry))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        line.push('\n');

        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.partition_path(date))?;

        file.lock_exclusive()?;
        let written = file.write_all(line.as_bytes()).and_then(|()| file.flush());
        file.unlock()?;
        written?;

        tracing::debug!(
            %date,
            session = %entry.session,
            action = %entry.action,
            location = %entry.location,
            "appended journal entry"
        );
        Ok(())
    }

    /// Dates that have a partition, ascending.
    ///
    /// A missing store directory has no dates. Files that are not named like
    /// a partition are ignored.
    pub fn dates(&self) -> Result<Vec<Date>, JournalError> {
        let dir = match fs::read_dir(&self.dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut dates = Vec::new();
        for item in dir {
            let path = item?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PARTITION_EXTENSION) {
                continue;
            }
            if let Some(date) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<Date>().ok())
            {
                dates.push(date);
            }
        }
        dates.sort();
        Ok(dates)
    }
}

/// Parses every record of a partition, failing on the first bad one.
fn parse_partition(date: Date, content: &[u8]) -> Result<Vec<JournalEntry>, JournalError> {
    let mut entries = Vec::new();
    for (idx, line) in content.split(|&b| b == b'\n').enumerate() {
        let malformed = |reason: String| JournalError::MalformedData {
            date,
            line: idx + 1,
            reason,
        };

        let trimmed = std::str::from_utf8(line)
            .map_err(|e| malformed(e.to_string()))?
            .trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(trimmed).map_err(|e| malformed(e.to_string()))?;
        if record.timestamp.date() != date {
            return Err(malformed(format!(
                "timestamp {} does not belong to this day",
                record.timestamp
            )));
        }
        entries.push(record.into());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::thread;

    use tempfile::TempDir;

    fn testdata() -> JournalStore {
        JournalStore::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata"))
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn mustermann() -> Person {
        Person::new("Max", "Mustermann", "Musterstraße", "20", "74821", "Mosbach")
    }

    fn entry(timestamp: &str, token: &str, action: Action, location: &str) -> JournalEntry {
        JournalEntry::new(
            timestamp.parse().unwrap(),
            SessionToken::new(token).unwrap(),
            action,
            Location::new(location).unwrap(),
            mustermann(),
        )
    }

    #[test]
    fn read_sample_day() {
        let journal = testdata().read(date(2021, 10, 15)).unwrap();

        assert_eq!(journal.date(), date(2021, 10, 15));
        assert_eq!(journal.len(), 13);

        let first = &journal.entries()[0];
        assert_eq!(first.timestamp.to_string(), "2021-10-15T06:20:13");
        assert_eq!(first.session.as_str(), "d61ec70b78628e15");
        assert_eq!(first.action, Action::Login);
        assert_eq!(first.location.as_str(), "DHBW Mosbach");
        assert_eq!(
            first.person,
            Person::new("Hans", "Müller", "Feldweg", "12", "74722", "Buchen")
        );

        let last = &journal.entries()[12];
        assert_eq!(last.timestamp.to_string(), "2021-10-15T19:15:12");
        assert_eq!(last.action, Action::Logout);
        assert_eq!(last.location.as_str(), "Alte Mälzerei");
    }

    #[test]
    fn sample_day_attendance_at_alte_malzerei() {
        let journal = testdata().read(date(2021, 10, 15)).unwrap();
        let list = journal.attendance_list_for_location(&Location::new("Alte Mälzerei").unwrap());

        let rows: Vec<_> = list.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][..2], ["Hans", "Müller"]);
        assert_eq!(rows[0][6..], ["13:40:11", ""]);
        assert_eq!(rows[1][..2], ["Otto", "Normalverbraucher"]);
        assert_eq!(rows[1][6..], ["17:32:45", "19:15:12"]);

        let nowhere = journal.attendance_list_for_location(&Location::new("Night Club").unwrap());
        assert!(nowhere.is_empty());
    }

    #[test]
    fn missing_partition_is_not_found() {
        let err = testdata().read(date(2020, 9, 4)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "no journal for 2020-09-04");
    }

    #[test]
    fn read_or_empty_treats_missing_as_empty() {
        let journal = testdata().read_or_empty(date(2020, 9, 4)).unwrap();
        assert_eq!(journal, Journal::empty(date(2020, 9, 4)));
    }

    #[test]
    fn read_or_empty_still_fails_on_malformed() {
        let err = testdata().read_or_empty(date(2020, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn malformed_partitions_fail_closed() {
        // 2020-01-01: unknown action tag after a valid record.
        // 2020-01-02: missing person field in the last record.
        for day in [date(2020, 1, 1), date(2020, 1, 2)] {
            let err = testdata().read(day).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedData, "{day}: {err}");
        }
    }

    #[test]
    fn malformed_error_names_the_line() {
        let err = testdata().read(date(2020, 1, 1)).unwrap_err();
        let JournalError::MalformedData { line, .. } = &err else {
            panic!("expected malformed data, got {err:?}");
        };
        assert_eq!(*line, 2);
    }

    #[test]
    fn parse_rejects_bad_records() {
        let day = date(2021, 10, 16);
        let valid = r#"{"timestamp":"2021-10-16T15:30:00","session":"t","action":"login","location":"DH","first_name":"Max","last_name":"Mustermann","street":"Musterstraße","number":"20","zip_code":"74821","city":"Mosbach"}"#;
        assert_eq!(parse_partition(day, valid.as_bytes()).unwrap().len(), 1);

        let bad = [
            // unparsable timestamp
            valid.replace("2021-10-16T15:30:00", "2021-10-16 15:30"),
            // timestamp from another day
            valid.replace("2021-10-16T15:30:00", "2021-10-17T15:30:00"),
            // empty location
            valid.replace(r#""location":"DH""#, r#""location":"""#),
            // extra field
            valid.replace(r#""city":"Mosbach""#, r#""city":"Mosbach","note":"x""#),
            // not a record at all
            "Hans,Müller".to_string(),
        ];
        for record in bad {
            let content = format!("{valid}\n{record}\n");
            let err = parse_partition(day, content.as_bytes()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedData, "accepted: {record}");
        }
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path());
        let day = date(2021, 10, 16);
        let valid = r#"{"timestamp":"2021-10-16T15:30:00","session":"t","action":"login","location":"DH","first_name":"Max","last_name":"Mustermann","street":"Musterstraße","number":"20","zip_code":"74821","city":"Mosbach"}"#;

        let mut content = format!("{valid}\n").into_bytes();
        content.extend_from_slice(b"\xff\xfe garbage\n");
        fs::write(store.partition_path(day), content).unwrap();

        let err = store.read(day).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData, "{err}");
        let JournalError::MalformedData { line, .. } = &err else {
            panic!("expected malformed data, got {err:?}");
        };
        assert_eq!(*line, 2);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let day = date(2021, 10, 16);
        let valid = r#"{"timestamp":"2021-10-16T15:30:00","session":"t","action":"logout","location":"DH","first_name":"Max","last_name":"Mustermann","street":"Musterstraße","number":"20","zip_code":"74821","city":"Mosbach"}"#;
        let entries = parse_partition(day, format!("\n{valid}\n\n").as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, Action::Logout);
    }

    #[test]
    fn append_then_read_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path().join("journal"));
        let written = entry("2021-10-16T15:30:00", "aabbccddeeff", Action::Login, "DHBW Mosbach");

        store.append(&written).unwrap();

        let journal = store.read(written.date()).unwrap();
        assert_eq!(journal.entries(), [written]);
    }

    #[test]
    fn appends_keep_call_order() {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path());
        let written = vec![
            entry("2021-10-16T17:20:00", "b", Action::Login, "Alte Mälzerei"),
            entry("2021-10-16T15:30:00", "a", Action::Login, "DHBW Mosbach"),
            entry("2021-10-16T18:00:00", "a", Action::Logout, "DHBW Mosbach"),
        ];

        for e in &written {
            store.append(e).unwrap();
        }

        let journal = store.read(date(2021, 10, 16)).unwrap();
        assert_eq!(journal.entries(), written.as_slice());
    }

    #[test]
    fn appends_are_partitioned_by_day() {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path());

        store
            .append(&entry("2021-10-16T23:59:59", "a", Action::Login, "DH"))
            .unwrap();
        store
            .append(&entry("2021-10-17T00:00:01", "a", Action::Logout, "DH"))
            .unwrap();

        assert_eq!(store.read(date(2021, 10, 16)).unwrap().len(), 1);
        assert_eq!(store.read(date(2021, 10, 17)).unwrap().len(), 1);
        assert!(store.partition_path(date(2021, 10, 16)).ends_with("2021-10-16.jsonl"));
    }

    #[test]
    fn concurrent_appends_do_not_interleave() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(JournalStore::new(temp.path()));

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        let e = entry(
                            &format!("2021-10-16T10:{worker:02}:{i:02}"),
                            &format!("w{worker}-{i}"),
                            Action::Login,
                            &format!("Venue {worker}"),
                        );
                        store.append(&e).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let journal = store.read(date(2021, 10, 16)).unwrap();
        assert_eq!(journal.len(), 200);
        for worker in 0..8 {
            let venue = Location::new(format!("Venue {worker}")).unwrap();
            let tokens: Vec<_> = journal
                .entries()
                .iter()
                .filter(|e| e.location == venue)
                .map(|e| e.session.to_string())
                .collect();
            let expected: Vec<_> = (0..25).map(|i| format!("w{worker}-{i}")).collect();
            assert_eq!(tokens, expected);
        }
    }

    #[test]
    fn reads_during_appends_see_whole_records() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(JournalStore::new(temp.path()));
        let day = date(2021, 10, 16);
        store
            .append(&entry("2021-10-16T09:00:00", "first", Action::Login, "DH"))
            .unwrap();

        let writers: Vec<_> = (0..4)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        let e = entry(
                            &format!("2021-10-16T11:{worker:02}:{i:02}"),
                            &format!("w{worker}-{i}"),
                            Action::Login,
                            "Alte Mälzerei",
                        );
                        store.append(&e).unwrap();
                    }
                })
            })
            .collect();

        let mut seen = 0;
        loop {
            let done = writers.iter().all(thread::JoinHandle::is_finished);
            let journal = store.read(day).unwrap();
            assert!(journal.len() >= seen, "shrank from {seen} to {}", journal.len());
            seen = journal.len();
            if done {
                break;
            }
        }
        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(store.read(day).unwrap().len(), 101);
    }

    #[cfg(unix)]
    #[test]
    fn store_dir_that_is_a_file_is_io_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("journal");
        fs::write(&blocker, "not a directory").unwrap();
        let store = JournalStore::new(&blocker);

        let err = store
            .append(&entry("2021-10-16T15:30:00", "a", Action::Login, "DH"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure, "{err}");

        let err = store.read(date(2021, 10, 16)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure, "{err}");
    }

    #[test]
    fn dates_lists_partitions() {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path());
        assert!(store.dates().unwrap().is_empty());

        store
            .append(&entry("2021-10-17T08:00:00", "a", Action::Login, "DH"))
            .unwrap();
        store
            .append(&entry("2021-10-16T08:00:00", "b", Action::Login, "DH"))
            .unwrap();
        fs::write(temp.path().join("notes.txt"), "not a journal").unwrap();
        fs::write(temp.path().join("backup.jsonl"), "").unwrap();

        assert_eq!(store.dates().unwrap(), [date(2021, 10, 16), date(2021, 10, 17)]);
    }

    #[test]
    fn missing_store_dir_has_no_dates() {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path().join("absent"));
        assert!(store.dates().unwrap().is_empty());
    }
}
