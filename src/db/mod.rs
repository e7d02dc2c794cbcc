pub mod migrations;
pub mod repository;

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::path::Path;

use migrations::run_migrations;

/// Open the prayer log at `path`, creating the file and schema on first use.
pub fn open(path: &Path) -> Result<Connection> {
    let fresh = !path.exists();
    if fresh {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating directory {:?}", parent))?;
        }
        info!("no prayer log at {:?}, creating one", path);
    }

    let conn =
        Connection::open(path).with_context(|| format!("Opening database at {:?}", path))?;
    run_migrations(&conn).with_context(|| format!("Initialising schema in {:?}", path))?;
    debug!("prayer log ready at {:?}", path);
    Ok(conn)
}
