use crate::config::{DbConfig, DbLocation};
use crate::errors::AppError;
use rusqlite::Connection;

pub fn init_db(config: &DbConfig) -> Result<Connection, AppError> {
    let conn = match config.location()? {
        DbLocation::Memory => Connection::open_in_memory()?,
        DbLocation::File(path) => Connection::open(path)?,
    };

    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
               id         INTEGER PRIMARY KEY AUTOINCREMENT,
               name       TEXT NOT NULL,
               email      TEXT NOT NULL UNIQUE,
               password   TEXT NOT NULL,
               role       TEXT NOT NULL DEFAULT 'user',
               created_at TEXT NOT NULL
           )",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_init_is_repeatable() {
        let conn = init_db(&DbConfig::new(":memory:")).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn missing_directory_fails_to_open() {
        let err = init_db(&DbConfig::new("sqlite:///nonexistent-dir/nested/users.db"))
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
