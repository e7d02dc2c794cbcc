use anyhow::{bail, Context, Result};
use log::debug;
use rusqlite::Connection;
use serde::Serialize;
use std::io::{self, BufRead, Write};

use crate::cli::args::MAX_BATCH;
use crate::config::AppConfig;
use crate::db::repository::PrayerLogRepo;
use crate::models::{PrayerEntry, PrayerIndex};
use crate::rotation::{next_batch, next_single, summarize, Summary};
use crate::utils::format::{made_up_sentence, name_list};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";

// ─── Add ─────────────────────────────────────────────────────────────────────

/// The batch `add` would log right now.
pub fn plan_batch(conn: &Connection, count: usize) -> Result<Vec<PrayerIndex>> {
    let last = PrayerLogRepo::last_logged(conn)?.map(|e| e.prayer);
    Ok(next_batch(last, count))
}

/// Propose the next batch, ask `confirm`, and append it if accepted.
///
/// Returns the number of prayers written; a declined batch writes nothing.
pub fn handle_add<F>(
    conn: &Connection,
    config: &AppConfig,
    count: Option<usize>,
    yes: bool,
    confirm: F,
) -> Result<usize>
where
    F: FnOnce(&str) -> Result<bool>,
{
    let count = count.unwrap_or(config.prayers_per_day);
    if count > MAX_BATCH {
        bail!("Cannot log {} prayers at once (at most {})", count, MAX_BATCH);
    }
    if count == 0 {
        println!("Nothing to insert.");
        return Ok(0);
    }

    let batch = plan_batch(conn, count)?;
    let names = name_list(batch.iter().map(|p| config.prayer_name(*p)));
    println!("Will insert {}.", names);

    if !yes && !confirm("Is this correct?")? {
        println_colored!(DIM, "Nothing logged.");
        return Ok(0);
    }

    let entries = PrayerLogRepo::append(conn, &batch).context("Logging prayers")?;
    println_colored!(GREEN, "✓ Logged {} prayers", entries.len());
    Ok(entries.len())
}

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Report {
    total: u64,
    #[serde(flatten)]
    summary: Summary,
}

pub fn report_output(conn: &Connection, json: bool) -> Result<String> {
    let total = PrayerLogRepo::total_count(conn)?;
    let summary = summarize(total);
    debug!("report: total={} summary={:?}", total, summary);
    if json {
        serde_json::to_string(&Report { total, summary }).context("Serializing report")
    } else {
        Ok(made_up_sentence(summary))
    }
}

pub fn handle_report(conn: &Connection, json: bool) -> Result<()> {
    println!("{}", report_output(conn, json)?);
    Ok(())
}

// ─── Next ────────────────────────────────────────────────────────────────────

pub fn next_name(conn: &Connection, config: &AppConfig) -> Result<String> {
    let last = PrayerLogRepo::last_logged(conn)?.map(|e| e.prayer);
    Ok(config.prayer_name(next_single(last)).to_string())
}

pub fn handle_next(conn: &Connection, config: &AppConfig) -> Result<()> {
    println!("{}", next_name(conn, config)?);
    Ok(())
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_history(
    conn: &Connection,
    config: &AppConfig,
    limit: usize,
    json: bool,
) -> Result<()> {
    let entries = PrayerLogRepo::list_recent(conn, limit)?;
    if json {
        println!("{}", history_json(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println_colored!(AMBER, "No prayers logged yet");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "{}  {}",
            entry.logged_at.format("%Y-%m-%d %H:%M"),
            config.prayer_name(entry.prayer)
        );
    }
    Ok(())
}

pub fn history_json(entries: &[PrayerEntry]) -> Result<String> {
    serde_json::to_string(entries).context("Serializing history")
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Ask a yes/no question on stdin; only "y" or "yes" count as agreement.
pub fn confirm_prompt(message: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N]: ", message))?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn mem_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn seed(conn: &Connection, values: &[u8]) {
        let batch: Vec<PrayerIndex> = values.iter().map(|v| PrayerIndex::new(*v).unwrap()).collect();
        PrayerLogRepo::append(conn, &batch).unwrap();
    }

    #[test]
    fn add_on_empty_store_logs_from_subh() {
        let conn = mem_conn();
        let config = AppConfig::default();
        let mut asked = None;
        let written = handle_add(&conn, &config, Some(3), false, |q| {
            asked = Some(q.to_string());
            Ok(true)
        })
        .unwrap();

        assert_eq!(written, 3);
        assert_eq!(asked.as_deref(), Some("Is this correct?"));
        let recent: Vec<u8> = PrayerLogRepo::list_recent(&conn, 10)
            .unwrap()
            .iter()
            .rev()
            .map(|e| e.prayer.get())
            .collect();
        assert_eq!(recent, vec![1, 2, 3]);
        assert_eq!(report_output(&conn, false).unwrap(), "You have made up: 3 prayers.");
    }

    #[test]
    fn declined_add_writes_nothing() {
        let conn = mem_conn();
        seed(&conn, &[1, 2]);
        let config = AppConfig::default();
        let written = handle_add(&conn, &config, None, false, |_| Ok(false)).unwrap();
        assert_eq!(written, 0);
        assert_eq!(PrayerLogRepo::total_count(&conn).unwrap(), 2);
    }

    #[test]
    fn yes_flag_skips_confirmation() {
        let conn = mem_conn();
        let config = AppConfig::default();
        let written = handle_add(&conn, &config, None, true, |_| {
            panic!("confirmation should not be asked")
        })
        .unwrap();
        assert_eq!(written, config.prayers_per_day);
    }

    #[test]
    fn default_count_comes_from_config() {
        let conn = mem_conn();
        let config = AppConfig {
            prayers_per_day: 4,
            ..AppConfig::default()
        };
        handle_add(&conn, &config, None, false, |_| Ok(true)).unwrap();
        assert_eq!(PrayerLogRepo::total_count(&conn).unwrap(), 4);
    }

    #[test]
    fn oversized_count_is_an_error_not_a_panic() {
        let conn = mem_conn();
        let config = AppConfig::default();
        let res = handle_add(&conn, &config, Some(usize::MAX), true, |_| Ok(true));
        assert!(res.is_err());
        assert_eq!(PrayerLogRepo::total_count(&conn).unwrap(), 0);

        let config = AppConfig {
            prayers_per_day: MAX_BATCH + 1,
            ..AppConfig::default()
        };
        assert!(handle_add(&conn, &config, None, true, |_| Ok(true)).is_err());
    }

    #[test]
    fn zero_count_never_prompts() {
        let conn = mem_conn();
        let config = AppConfig::default();
        let written = handle_add(&conn, &config, Some(0), false, |_| {
            panic!("confirmation should not be asked")
        })
        .unwrap();
        assert_eq!(written, 0);
    }

    #[test]
    fn add_continues_rotation_from_last_logged() {
        let conn = mem_conn();
        seed(&conn, &[3, 4]);
        let batch: Vec<u8> = plan_batch(&conn, 3).unwrap().into_iter().map(PrayerIndex::get).collect();
        assert_eq!(batch, vec![5, 1, 2]);
    }

    #[test]
    fn seven_entries_ending_at_dhuhr() {
        let conn = mem_conn();
        seed(&conn, &[1, 2, 3, 4, 5, 1, 2]);
        let config = AppConfig::default();
        assert_eq!(
            report_output(&conn, false).unwrap(),
            "You have made up: 1 days, 2 prayers."
        );
        assert_eq!(next_name(&conn, &config).unwrap(), "`asr");
    }

    #[test]
    fn ten_entries_report_whole_days_only() {
        let conn = mem_conn();
        seed(&conn, &[1, 2, 3, 4, 5, 1, 2, 3, 4, 5]);
        assert_eq!(report_output(&conn, false).unwrap(), "You have made up: 2 days.");
    }

    #[test]
    fn report_json_carries_totals() {
        let conn = mem_conn();
        seed(&conn, &[1, 2, 3, 4, 5, 1, 2]);
        let out = report_output(&conn, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 7);
        assert_eq!(value["days"], 1);
        assert_eq!(value["remaining"], 2);
    }

    #[test]
    fn history_json_lists_newest_first() {
        let conn = mem_conn();
        seed(&conn, &[4, 5]);
        let entries = PrayerLogRepo::list_recent(&conn, 10).unwrap();
        let value: serde_json::Value = serde_json::from_str(&history_json(&entries).unwrap()).unwrap();
        assert_eq!(value[0]["prayer"], 5);
        assert_eq!(value[1]["prayer"], 4);
        assert!(value[0]["logged_at"].is_string());
    }

    #[test]
    fn empty_report_is_bare_header() {
        let conn = mem_conn();
        assert_eq!(report_output(&conn, false).unwrap(), "You have made up:");
    }

    #[test]
    fn next_on_empty_store_is_subh() {
        let conn = mem_conn();
        assert_eq!(next_name(&conn, &AppConfig::default()).unwrap(), "subh");
    }

    #[test]
    fn only_y_and_yes_confirm() {
        for answer in ["y", "Y", "yes", " YES "] {
            assert!(is_affirmative(answer), "{:?}", answer);
        }
        for answer in ["", "n", "no", "yep"] {
            assert!(!is_affirmative(answer), "{:?}", answer);
        }
    }
}
