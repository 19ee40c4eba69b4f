use crate::config::Capacity;
use super::types::{DateSlot, DuplicateIdentity, Person, Schedule};

/// Puts slots back into calendar order and packages them with the waitlist
pub fn assemble_schedule(
    capacity: Capacity,
    mut slots: Vec<DateSlot>,
    waitlist: Vec<Person>,
    duplicate_identities: Vec<DuplicateIdentity>,
) -> Schedule {
    slots.sort_by_key(|slot| slot.date);
    Schedule {
        capacity,
        slots,
        waitlist,
        duplicate_identities,
    }
}
