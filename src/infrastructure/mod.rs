//! File-backed repositories and the snapshot format they persist through.

pub mod account_repository;
pub mod account_roles;
pub mod ledger_repository;
pub mod role_repository;
pub mod snapshot;

/// Next id for a collection keyed by decimal strings.
///
/// Equals `count + 1` for collections this crate built itself; the max of the
/// numeric ids keeps it unique when a snapshot was edited or merged by hand.
pub(crate) fn next_sequential_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let mut count = 0u64;
    let mut highest = 0u64;
    for id in ids {
        count += 1;
        if let Ok(n) = id.parse::<u64>() {
            highest = highest.max(n);
        }
    }
    (count.max(highest) + 1).to_string()
}
