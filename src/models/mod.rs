pub mod prayer;

pub use prayer::{PrayerEntry, PrayerIndex, PRAYERS_PER_CYCLE};
