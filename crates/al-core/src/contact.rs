//! Contact tracing: who shared a location with a person, and for how long.

use std::collections::HashMap;

use chrono::Duration;

use crate::journal::Journal;
use crate::person::Person;
use crate::time::Timestamp;
use crate::types::Location;

/// Time another person spent at the same location as the traced person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub person: Person,
    pub location: Location,
    /// Summed overlap of all visits at this location.
    pub duration: Duration,
}

impl Journal {
    /// Everyone whose visits overlapped with a visit of `person`.
    ///
    /// Visits without a logout count as lasting until the latest event in
    /// the journal. One contact is reported per other person and location,
    /// ordered by the start of their first overlap.
    #[must_use]
    pub fn contacts_for_person(&self, person: &Person) -> Vec<Contact> {
        let Some(end_of_observation) = self.last_timestamp() else {
            return Vec::new();
        };

        let mut contacts: Vec<(Timestamp, Contact)> = Vec::new();
        let mut index: HashMap<(Person, Location), usize> = HashMap::new();

        for location in self.visited_locations(person) {
            let list = self.attendance_list_for_location(&location);
            let (own, others): (Vec<_>, Vec<_>) =
                list.into_iter().partition(|visit| &visit.person == person);

            for visit in &own {
                let (start, end) = visit.interval(end_of_observation);
                for other in &others {
                    let (other_start, other_end) = other.interval(end_of_observation);
                    let overlap_start = start.max(other_start);
                    let overlap_end = end.min(other_end);
                    if overlap_end <= overlap_start {
                        continue;
                    }
                    let overlap = overlap_end.duration_since(overlap_start);

                    let key = (other.person.clone(), location.clone());
                    if let Some(&i) = index.get(&key) {
                        let (first_start, contact) = &mut contacts[i];
                        *first_start = (*first_start).min(overlap_start);
                        contact.duration += overlap;
                    } else {
                        index.insert(key, contacts.len());
                        contacts.push((
                            overlap_start,
                            Contact {
                                person: other.person.clone(),
                                location: location.clone(),
                                duration: overlap,
                            },
                        ));
                    }
                }
            }
        }

        tracing::debug!(
            date = %self.date(),
            %person,
            contacts = contacts.len(),
            "traced contacts"
        );

        contacts.sort_by_key(|(first_start, _)| *first_start);
        contacts.into_iter().map(|(_, contact)| contact).collect()
    }
}
