use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Number of prayers in one day's rotation.
pub const PRAYERS_PER_CYCLE: u8 = 5;

/// Position of a prayer in the daily rotation, 1 (subh) through 5 (ishaa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrayerIndex(u8);

impl PrayerIndex {
    pub const FIRST: PrayerIndex = PrayerIndex(1);

    pub fn new(value: u8) -> Option<Self> {
        if (1..=PRAYERS_PER_CYCLE).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The prayer after this one, wrapping ishaa back to subh.
    pub fn succ(self) -> Self {
        Self(self.0 % PRAYERS_PER_CYCLE + 1)
    }

    /// Zero-based slot into a list of display names.
    pub fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for PrayerIndex {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| anyhow::anyhow!("Prayer index out of range: {}", value))
    }
}

impl From<PrayerIndex> for u8 {
    fn from(p: PrayerIndex) -> u8 {
        p.0
    }
}

/// One logged make-up prayer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerEntry {
    pub id: i64,
    pub prayer: PrayerIndex,
    /// UTC, set by the store at insertion time.
    pub logged_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(PrayerIndex::new(0).is_none());
        assert!(PrayerIndex::new(6).is_none());
        for v in 1..=5 {
            assert_eq!(PrayerIndex::new(v).map(PrayerIndex::get), Some(v));
        }
    }

    #[test]
    fn succ_wraps_after_ishaa() {
        let ishaa = PrayerIndex::new(5).unwrap();
        assert_eq!(ishaa.succ(), PrayerIndex::FIRST);
        assert_eq!(PrayerIndex::FIRST.succ().get(), 2);
    }

    #[test]
    fn serde_goes_through_range_check() {
        let p: PrayerIndex = serde_json::from_str("3").unwrap();
        assert_eq!(p.get(), 3);
        assert!(serde_json::from_str::<PrayerIndex>("0").is_err());
        assert_eq!(serde_json::to_string(&p).unwrap(), "3");
    }
}
