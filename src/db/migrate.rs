use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `seizures` table exists.
fn seizures_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='seizures'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `seizures` table has the given column.
fn seizures_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('seizures')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `seizures` table with the modern schema.
fn create_seizures_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS seizures (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            date_time     TEXT NOT NULL,
            duration_min  INTEGER NOT NULL DEFAULT 0 CHECK(duration_min >= 0),
            duration_sec  INTEGER NOT NULL DEFAULT 0 CHECK(duration_sec BETWEEN 0 AND 59),
            trigger       TEXT NOT NULL DEFAULT 'Unknown',
            description   TEXT NOT NULL DEFAULT '',
            source        TEXT NOT NULL DEFAULT 'cli' CHECK(source IN ('cli','import')),
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_seizures_date_time ON seizures(date_time);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Databases created before imports existed have no `source` column.
fn migrate_add_source_column(conn: &Connection) -> Result<()> {
    let version = "20250612_0002_add_source_to_seizures";

    if migration_applied(conn, version)? || seizures_has_column(conn, "source")? {
        return Ok(());
    }

    warning("Adding 'source' column to seizures table...");

    conn.execute(
        "ALTER TABLE seizures ADD COLUMN source TEXT NOT NULL DEFAULT 'cli';",
        [],
    )?;

    mark_applied(conn, version, "Added source column to seizures")?;

    success(format!(
        "Migration applied: {} → added 'source' to seizures table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !seizures_table_exists(conn)? {
        create_seizures_table(conn)?;
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_seizures_date_time ON seizures(date_time);",
    )?;
    migrate_add_source_column(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_gets_full_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(seizures_table_exists(&conn).unwrap());
        assert!(seizures_has_column(&conn, "source").unwrap());
        // idempotent
        run_pending_migrations(&conn).unwrap();
    }

    #[test]
    fn legacy_table_gains_source_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE seizures (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                date_time     TEXT NOT NULL,
                duration_min  INTEGER NOT NULL DEFAULT 0,
                duration_sec  INTEGER NOT NULL DEFAULT 0,
                trigger       TEXT NOT NULL DEFAULT 'Unknown',
                description   TEXT NOT NULL DEFAULT '',
                created_at    TEXT NOT NULL
            );
            INSERT INTO seizures (date_time, created_at) VALUES ('2024-06-16 21:00', 'x');
            "#,
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        assert!(seizures_has_column(&conn, "source").unwrap());
        assert!(migration_applied(&conn, "20250612_0002_add_source_to_seizures").unwrap());

        let source: String = conn
            .query_row("SELECT source FROM seizures", [], |r| r.get(0))
            .unwrap();
        assert_eq!(source, "cli");
    }
}
