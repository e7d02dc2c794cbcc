use anyhow::Result;
use rusqlite::Connection;

/// Create the prayer log table if it is missing.
///
/// The column layout matches databases written by earlier releases, so an
/// existing file is picked up unchanged.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS prayer (
            id      INTEGER NOT NULL,
            prayer  INTEGER,
            date    TIMESTAMP,
            PRIMARY KEY (id),
            CHECK (prayer<=5)
        );
    ",
    )?;
    Ok(())
}
