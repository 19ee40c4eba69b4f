use super::pool::PersonPool;
use super::types::Person;

/// Everyone left in the pool once every slot has been processed
///
/// Order is the roster order of whoever remains; availability is untouched.
pub fn compile_waitlist(pool: PersonPool) -> Vec<Person> {
    pool.into_remaining()
}
