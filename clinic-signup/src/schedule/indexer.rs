use std::collections::HashMap;
use chrono::NaiveDate;
use super::types::{DateSlot, Person};

/// Builds one slot per distinct date and returns them in scarcity order
///
/// Every listed date counts once, so a person who lists a date twice adds two
/// signups to it. The sort is stable: slots with equal counts keep the order in
/// which their dates were first seen.
pub fn index_availability(people: &[Person]) -> Vec<DateSlot> {
    let mut slots: Vec<DateSlot> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();

    for person in people {
        for &date in &person.available_dates {
            let index = *positions.entry(date).or_insert_with(|| {
                slots.push(DateSlot::new(date));
                slots.len() - 1
            });
            slots[index].signup_count += 1;
        }
    }

    // Fewest signups first
    slots.sort_by_key(|slot| slot.signup_count);
    slots
}
