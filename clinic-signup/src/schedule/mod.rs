pub mod types;
pub mod date_utils;
pub mod indexer;
pub mod pool;
pub mod assignment;
pub mod waitlist;
pub mod assembler;

use rand::Rng;
use tracing::info;
use crate::config::Capacity;

pub use types::{DateSlot, DuplicateIdentity, Person, Schedule};
pub use date_utils::{format_date, format_full_date, parse_date_list};
pub use indexer::index_availability;
pub use pool::{find_duplicate_identities, PersonPool};
pub use assignment::assign_volunteers;
pub use waitlist::compile_waitlist;
pub use assembler::assemble_schedule;

/// Runs one full allocation: index, assign scarcest-first, waitlist, calendar order
///
/// All state lives for this call only. Capacity has already been validated and
/// every date already parsed, so this cannot fail part-way.
pub fn build_schedule<R>(people: Vec<Person>, capacity: Capacity, rng: &mut R) -> Schedule
where
    R: Rng + ?Sized,
{
    let duplicate_identities = find_duplicate_identities(&people);

    let mut slots = index_availability(&people);
    info!(people = people.len(), dates = slots.len(), %capacity, "indexed availability");

    let mut pool = PersonPool::new(people);
    assign_volunteers(&mut pool, &mut slots, capacity, rng);

    let waitlist = compile_waitlist(pool);
    let schedule = assemble_schedule(capacity, slots, waitlist, duplicate_identities);
    info!(
        assigned = schedule.assigned_count(),
        waitlisted = schedule.waitlist.len(),
        "schedule built"
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn person(name: &str, email: &str, dates: &str) -> Person {
        Person::new(name, email, parse_date_list(dates).unwrap())
    }

    fn roster() -> Vec<Person> {
        vec![
            person("Ann", "ann@x", "6/3/16, 6/1/16"),
            person("Ben", "ben@x", "6/1/16"),
            person("Cat", "cat@x", "6/1/16, 6/2/16"),
            person("Dan", "dan@x", "6/1/16"),
            person("Eve", "eve@x", "6/2/16, 6/3/16"),
            person("Fay", "fay@x", "6/1/16"),
        ]
    }

    #[test]
    fn test_build_schedule_end_to_end() {
        let mut rng = StdRng::seed_from_u64(7);
        let schedule = build_schedule(roster(), Capacity::new(1).unwrap(), &mut rng);

        let dates: Vec<String> = schedule.slots.iter().map(|s| format_date(s.date)).collect();
        assert_eq!(dates, vec!["6/1", "6/2", "6/3"]);
        assert!(schedule.slots.iter().all(|s| s.assigned_volunteers.len() == 1));
        assert_eq!(schedule.assigned_count() + schedule.waitlist.len(), 6);
        assert_eq!(schedule.waitlist.len(), 3);
        assert!(schedule.duplicate_identities.is_empty());
    }

    #[test]
    fn test_build_schedule_is_reproducible() {
        let capacity = Capacity::new(2).unwrap();
        let first = build_schedule(roster(), capacity, &mut StdRng::seed_from_u64(3));
        let second = build_schedule(roster(), capacity, &mut StdRng::seed_from_u64(3));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_duplicate_emails_are_reported_not_merged() {
        let people = vec![
            person("Ann", "same@x", "6/1/16"),
            person("Ann twin", "same@x", "6/1/16"),
        ];
        let schedule =
            build_schedule(people, Capacity::new(1).unwrap(), &mut StdRng::seed_from_u64(0));
        assert_eq!(schedule.duplicate_identities.len(), 1);
        assert_eq!(schedule.duplicate_identities[0].rows, vec![1, 2]);
        // Both rows are still accounted for
        assert_eq!(schedule.assigned_count(), 1);
        assert_eq!(schedule.waitlist.len(), 1);
    }

    #[test]
    fn test_empty_roster() {
        let schedule =
            build_schedule(Vec::new(), Capacity::new(3).unwrap(), &mut StdRng::seed_from_u64(0));
        assert!(schedule.slots.is_empty());
        assert!(schedule.waitlist.is_empty());
    }
}
