use serde::Serialize;

use crate::models::{PrayerIndex, PRAYERS_PER_CYCLE};

/// Logged total split into whole days and leftover prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub days: u64,
    pub remaining: u64,
}

/// The next `count` prayers, continuing the cycle after `last`.
///
/// `last` is `None` when nothing has been logged yet, which starts the batch at subh.
pub fn next_batch(last: Option<PrayerIndex>, count: usize) -> Vec<PrayerIndex> {
    std::iter::successors(Some(next_single(last)), |p| Some(p.succ()))
        .take(count)
        .collect()
}

/// The single prayer due after `last`.
pub fn next_single(last: Option<PrayerIndex>) -> PrayerIndex {
    match last {
        Some(p) => p.succ(),
        None => PrayerIndex::FIRST,
    }
}

pub fn summarize(total: u64) -> Summary {
    let per_day = u64::from(PRAYERS_PER_CYCLE);
    Summary {
        days: total / per_day,
        remaining: total % per_day,
    }
}
