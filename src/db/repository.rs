use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{PrayerEntry, PrayerIndex};

/// Text form of `prayer.date`, shared with databases from earlier releases.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const DATE_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

fn parse_logged_at(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_PARSE_FORMAT)
        .map_err(|e| anyhow!("Bad timestamp '{}': {}", s, e))
}

fn to_entry(id: i64, prayer: i64, date: Option<String>) -> Result<PrayerEntry> {
    let prayer = u8::try_from(prayer)
        .ok()
        .and_then(PrayerIndex::new)
        .ok_or_else(|| anyhow!("Row {} has invalid prayer index {}", id, prayer))?;
    let date = date.ok_or_else(|| anyhow!("Row {} has no timestamp", id))?;
    Ok(PrayerEntry {
        id,
        prayer,
        logged_at: parse_logged_at(&date)?,
    })
}

// ─── Prayer log ──────────────────────────────────────────────────────────────

pub struct PrayerLogRepo;

impl PrayerLogRepo {
    /// Append one row per prayer in a single transaction.
    ///
    /// Every row of the batch shares the same timestamp; ids keep their order.
    pub fn append(conn: &Connection, prayers: &[PrayerIndex]) -> Result<Vec<PrayerEntry>> {
        let logged_at = Utc::now().naive_utc();
        let date = logged_at.format(DATE_FORMAT).to_string();

        let tx = conn.unchecked_transaction()?;
        let mut entries = Vec::with_capacity(prayers.len());
        {
            let mut stmt = tx.prepare("INSERT INTO prayer (prayer, date) VALUES (?1, ?2)")?;
            for p in prayers {
                stmt.execute(params![p.get(), date])?;
                entries.push(PrayerEntry {
                    id: tx.last_insert_rowid(),
                    prayer: *p,
                    logged_at,
                });
            }
        }
        tx.commit().context("Committing prayer batch")?;

        debug!("appended {} prayers at {}", entries.len(), date);
        Ok(entries)
    }

    /// The most recently logged entry; later inserts win timestamp ties.
    pub fn last_logged(conn: &Connection) -> Result<Option<PrayerEntry>> {
        let row = conn
            .query_row(
                "SELECT id, prayer, date FROM prayer ORDER BY date DESC, id DESC LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, prayer, date)| to_entry(id, prayer, date))
            .transpose()
    }

    pub fn total_count(conn: &Connection) -> Result<u64> {
        let n: i64 = conn.query_row("SELECT COUNT(id) FROM prayer", [], |row| row.get(0))?;
        Ok(u64::try_from(n).unwrap_or(0))
    }

    /// Newest first.
    pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<PrayerEntry>> {
        let mut stmt = conn.prepare(
            "SELECT id, prayer, date FROM prayer ORDER BY date DESC, id DESC LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, prayer, date) = r?;
            result.push(to_entry(id, prayer, date)?);
        }
        Ok(result)
    }
}
