use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;
use crate::config::Capacity;
use super::pool::PersonPool;
use super::types::DateSlot;

/// Fills each slot, scarcest first, with a random pick of the people still in the pool
///
/// `slots` must already be in scarcity order (see `index_availability`). For each
/// slot the candidates are shuffled (Fisher-Yates) and the first `capacity` of
/// them are moved out of the pool into the slot, in shuffled order. People who
/// are not picked stay in the pool for later dates.
///
/// Because a picked person never returns to the pool, someone who only listed
/// popular dates is less likely to be placed than someone with a scarce date.
/// That is the intended trade-off: scarce dates get first pick.
pub fn assign_volunteers<R>(
    pool: &mut PersonPool,
    slots: &mut [DateSlot],
    capacity: Capacity,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    for slot in slots.iter_mut() {
        if pool.is_empty() {
            debug!(date = %slot.date, "pool exhausted, slot left empty");
            continue;
        }

        let mut candidates = pool.candidates_for(slot.date);
        let candidate_count = candidates.len();
        let take = capacity.get().min(candidate_count);

        // Shuffle only as far as needed; the chosen prefix is itself uniformly ordered
        let (selected, _) = candidates.partial_shuffle(rng, take);

        for &index in selected.iter() {
            if let Some(person) = pool.take(index) {
                slot.assigned_volunteers.push(person);
            }
        }

        debug!(
            date = %slot.date,
            signups = slot.signup_count,
            candidates = candidate_count,
            assigned = slot.assigned_volunteers.len(),
            remaining = pool.len(),
            "slot filled"
        );
    }
}
