use std::collections::HashMap;
use chrono::NaiveDate;
use tracing::warn;
use super::types::{DuplicateIdentity, Person};

/// People not yet placed on a date
///
/// Entries are addressed by their position in the roster and moved out with
/// [`PersonPool::take`], so a person can leave the pool only once and two rows
/// sharing an email never remove each other.
#[derive(Debug, Default)]
pub struct PersonPool {
    entries: Vec<Option<Person>>,
    remaining: usize,
}

impl PersonPool {
    pub fn new(people: Vec<Person>) -> Self {
        let remaining = people.len();
        Self {
            entries: people.into_iter().map(Some).collect(),
            remaining,
        }
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Positions of everyone still in the pool who listed `date`, in roster order
    pub fn candidates_for(&self, date: NaiveDate) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Some(person) if person.is_available_on(date) => Some(index),
                _ => None,
            })
            .collect()
    }

    /// Moves the person at `index` out of the pool
    pub fn take(&mut self, index: usize) -> Option<Person> {
        let person = self.entries.get_mut(index)?.take()?;
        self.remaining -= 1;
        Some(person)
    }

    /// Consumes the pool, returning whoever is left in roster order
    pub fn into_remaining(self) -> Vec<Person> {
        self.entries.into_iter().flatten().collect()
    }
}

/// Finds emails used by more than one roster row and logs a warning for each
pub fn find_duplicate_identities(people: &[Person]) -> Vec<DuplicateIdentity> {
    let mut rows_by_email: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for (index, person) in people.iter().enumerate() {
        let rows = rows_by_email.entry(person.email.as_str()).or_default();
        if rows.is_empty() {
            first_seen.push(person.email.as_str());
        }
        rows.push(index + 1);
    }

    first_seen
        .into_iter()
        .filter_map(|email| {
            let rows = rows_by_email.remove(email)?;
            if rows.len() < 2 {
                return None;
            }
            warn!(
                email,
                rows = ?rows,
                "email appears on more than one row; each row is scheduled as a separate person"
            );
            Some(DuplicateIdentity {
                email: email.to_string(),
                rows,
            })
        })
        .collect()
}
