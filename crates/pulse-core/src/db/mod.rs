//! Settings store
//!
//! The only thing Pulse persists is a small key-value settings blob (the
//! selected business unit, time period, and comparison flag). It lives in a
//! SQLite database behind an r2d2 pool so the CLI and server share one code
//! path.

use std::path::{Path, PathBuf};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod settings;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
}

impl Database {
    /// Open (or create) the settings database at the given path
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.display().to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Default location under the platform data directory,
    /// e.g. ~/.local/share/pulse/settings.db
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("pulse").join("settings.db"))
            .unwrap_or_else(|| PathBuf::from("pulse-settings.db"))
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database for testing
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("pulse_test_{}_{}.db", std::process::id(), id));

        let _ = std::fs::remove_file(&path);
        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Key-value settings blob
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        info!(path = %self.db_path, "Settings database ready");
        Ok(())
    }
}
