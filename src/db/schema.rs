use rusqlite::Connection;

use crate::error::RolodexResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// The UNIQUE constraint on `contacts.email` is the authoritative uniqueness
/// guard; the pre-check in the ops layer only shapes the failure message.
pub fn initialize(conn: &Connection) -> RolodexResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY NOT NULL,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS phones (
            id TEXT PRIMARY KEY NOT NULL,
            contact_id TEXT NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
            phone TEXT NOT NULL,
            phone_type TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_contacts_lastname
            ON contacts(lastname, firstname);
        CREATE INDEX IF NOT EXISTS idx_phones_contact
            ON phones(contact_id);

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
