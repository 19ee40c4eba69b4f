use chrono::NaiveDate;
use serde::{Serialize, Deserialize};
use crate::config::Capacity;
use super::date_utils::{format_date, same_date};

/// One signup row: who they are and which dates they can make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub email: String, // identity key within a run
    pub available_dates: Vec<NaiveDate>, // as listed, duplicates kept
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        available_dates: Vec<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            available_dates,
        }
    }

    /// True if any listed date falls on `date`
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.available_dates.iter().any(|d| same_date(*d, date))
    }

    /// "name email", the way a schedule cell shows a person
    pub fn label(&self) -> String {
        if self.email.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.email)
        }
    }

    /// Availability rendered as "M/D, M/D" for the waitlist
    pub fn formatted_dates(&self) -> String {
        self.available_dates
            .iter()
            .map(|d| format_date(*d))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A single calendar date and the people assigned to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSlot {
    pub date: NaiveDate,
    pub signup_count: u32, // raw tally from indexing, never recomputed
    pub assigned_volunteers: Vec<Person>,
}

impl DateSlot {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            signup_count: 0,
            assigned_volunteers: Vec::new(),
        }
    }
}

/// Two or more roster rows sharing one email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateIdentity {
    pub email: String,
    pub rows: Vec<usize>, // 1-based positions in the input pool
}

/// Final allocation, slots in calendar order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub capacity: Capacity,
    pub slots: Vec<DateSlot>,
    pub waitlist: Vec<Person>,
    pub duplicate_identities: Vec<DuplicateIdentity>,
}

impl Schedule {
    /// Number of people placed on some date
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().map(|s| s.assigned_volunteers.len()).sum()
    }
}
