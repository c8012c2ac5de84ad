use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

pub type DbPool = Pool<SqliteConnectionManager>;

fn enable_foreign_keys(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    // Remove query parameters (e.g., ?mode=rwc)
    let path = path.split('?').next().unwrap_or(path);

    // Every in-memory connection is its own database, so keep a single one.
    if path == ":memory:" {
        return create_memory_pool();
    }

    let manager = SqliteConnectionManager::file(Path::new(path)).with_init(enable_foreign_keys);

    Pool::builder().max_size(5).build(manager)
}

pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory().with_init(enable_foreign_keys);
    Pool::builder().max_size(1).build(manager)
}
