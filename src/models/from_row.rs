use rusqlite::Row;

/// Build a model from a `SELECT *` row, addressing columns by name.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
