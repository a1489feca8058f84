//! Sample people, venues and a recorded day shared by unit tests.

use crate::action::Action;
use crate::journal::{Journal, JournalEntry};
use crate::person::Person;
use crate::time::Date;
use crate::types::{Location, SessionToken};

pub fn person(key: &str) -> Person {
    match key {
        "HM" => Person::new("Hans", "Müller", "Feldweg", "12", "74722", "Buchen"),
        "GM" => Person::new("Gisela", "Musterfrau", "Musterstraße", "10", "74821", "Mosbach"),
        "MM" => Person::new("Max", "Mustermann", "Musterstraße", "20", "74821", "Mosbach"),
        "AM" => Person::new("Anne", "Meier", "Hauptstraße", "18", "74821", "Mosbach"),
        "LM" => Person::new("Lieschen", "Müller", "Lindenstraße", "15", "10115", "Berlin"),
        "ON" => Person::new("Otto", "Normalverbraucher", "Dieselstraße", "52", "70376", "Stuttgart"),
        other => panic!("no sample person {other}"),
    }
}

pub fn location(key: &str) -> Location {
    match key {
        "DH" => Location::new("DHBW Mosbach").unwrap(),
        "AM" => Location::new("Alte Mälzerei").unwrap(),
        other => Location::new(other).unwrap(),
    }
}

pub fn entry(timestamp: &str, token: &str, action: Action, loc: &str, who: &str) -> JournalEntry {
    JournalEntry::new(
        timestamp.parse().unwrap(),
        SessionToken::new(token).unwrap(),
        action,
        location(loc),
        person(who),
    )
}

/// Thirteen events across two venues on 2021-10-15.
pub fn sample_day() -> Journal {
    use Action::{Login, Logout};

    Journal::new(
        Date::from_ymd(2021, 10, 15).unwrap(),
        vec![
            entry("2021-10-15T06:20:13", "d61ec70b78628e15", Login, "DH", "HM"),
            entry("2021-10-15T09:15:20", "989ce491d5df53c9", Login, "DH", "GM"),
            entry("2021-10-15T12:15:30", "f797f342aebab436", Login, "DH", "MM"),
            entry("2021-10-15T12:17:20", "1ce7549a51133e9f", Login, "DH", "AM"),
            entry("2021-10-15T13:30:00", "68e7faee906ffd4c", Login, "DH", "LM"),
            entry("2021-10-15T13:40:10", "d61ec70b78628e15", Logout, "DH", "HM"),
            entry("2021-10-15T13:40:11", "5faacdf0e6e7b44a", Login, "AM", "HM"),
            entry("2021-10-15T15:42:23", "68e7faee906ffd4c", Logout, "DH", "LM"),
            entry("2021-10-15T16:48:21", "f797f342aebab436", Logout, "DH", "MM"),
            entry("2021-10-15T16:52:00", "989ce491d5df53c9", Logout, "DH", "GM"),
            entry("2021-10-15T17:15:22", "1ce7549a51133e9f", Logout, "DH", "AM"),
            entry("2021-10-15T17:32:45", "848dc86c0b5e62a0", Login, "AM", "ON"),
            entry("2021-10-15T19:15:12", "848dc86c0b5e62a0", Logout, "AM", "ON"),
        ],
    )
}
