//! Database helper
//!
//! Owns the lifecycle of the SQLite file backing the product store. The
//! connection is opened lazily on first acquisition; a fresh file gets the
//! products table, an older one is handed to `on_upgrade`.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::Config;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::schema::{get_schema_version, init_schema, set_schema_version, SCHEMA_VERSION};

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Lazily opened handle to the product database
pub struct DbHelper {
    location: Location,
    conn: OnceCell<Connection>,
}

impl DbHelper {
    /// Helper for a database file; nothing is opened until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Helper for the database file named by the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.sqlite_path())
    }

    /// Helper for a private in-memory database (for testing)
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: OnceCell::new(),
        }
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    /// Whether the connection has been opened yet
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Connection for reads
    pub fn readable_database(&self) -> StorageResult<&Connection> {
        self.connection()
    }

    /// Connection for writes
    ///
    /// Currently the same handle as `readable_database`.
    pub fn writable_database(&self) -> StorageResult<&Connection> {
        self.connection()
    }

    /// Close the connection; the next acquisition reopens it
    pub fn close(&mut self) {
        self.conn.take();
    }

    fn connection(&self) -> StorageResult<&Connection> {
        self.conn.get_or_try_init(|| self.open())
    }

    fn open(&self) -> StorageResult<Connection> {
        let conn = match &self.location {
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)
                            .map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
                    }
                }
                debug!("Opening database at {:?}", path);
                Connection::open(path).map_err(|source| StorageError::Open {
                    path: path.clone(),
                    source,
                })?
            }
            Location::Memory => Connection::open_in_memory()?,
        };

        configure(&conn)?;
        Ok(conn)
    }

    /// Called once for a store that has never been initialised
    pub fn on_create(conn: &Connection) -> StorageResult<()> {
        init_schema(conn)?;
        Ok(())
    }

    /// Called when the recorded version is older than `SCHEMA_VERSION`
    ///
    /// There has only ever been one schema, so there is nothing to migrate.
    pub fn on_upgrade(_conn: &Connection, old_version: i32, new_version: i32) -> StorageResult<()> {
        debug!("No migration from version {} to {}", old_version, new_version);
        Ok(())
    }
}

fn configure(conn: &Connection) -> StorageResult<()> {
    match get_schema_version(conn)? {
        None => {
            DbHelper::on_create(conn)?;
            info!("Created product store at schema version {}", SCHEMA_VERSION);
        }
        Some(found) if found < SCHEMA_VERSION => {
            DbHelper::on_upgrade(conn, found, SCHEMA_VERSION)?;
            set_schema_version(conn, SCHEMA_VERSION)?;
        }
        Some(found) if found > SCHEMA_VERSION => {
            return Err(StorageError::VersionTooNew {
                found,
                supported: SCHEMA_VERSION,
            });
        }
        Some(_) => {}
    }
    Ok(())
}
