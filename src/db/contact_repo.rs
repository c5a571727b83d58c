use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{RolodexError, RolodexResult};
use crate::model::{Contact, Id, Phone};

const CONTACT_COLUMNS: &str = "id, firstname, lastname, email, created_at, updated_at";

pub fn insert(conn: &Connection, contact: &Contact) -> RolodexResult<()> {
    conn.execute(
        "INSERT INTO contacts (id, firstname, lastname, email, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            contact.id.to_string(),
            contact.firstname,
            contact.lastname,
            contact.email,
            contact.created_at.to_rfc3339(),
            contact.updated_at.to_rfc3339(),
        ],
    )?;
    save_phones(conn, contact.id, &contact.phones)?;
    Ok(())
}

pub fn update(conn: &Connection, contact: &Contact) -> RolodexResult<()> {
    conn.execute(
        "UPDATE contacts SET firstname = ?1, lastname = ?2, email = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            contact.firstname,
            contact.lastname,
            contact.email,
            contact.updated_at.to_rfc3339(),
            contact.id.to_string(),
        ],
    )?;
    save_phones(conn, contact.id, &contact.phones)?;
    Ok(())
}

/// Diffs the in-memory phone set against the stored rows by id: rows that
/// already exist are updated, the rest are inserted. Positions follow the
/// vec order so display order survives a reload.
fn save_phones(conn: &Connection, contact_id: Id<Contact>, phones: &[Phone]) -> RolodexResult<()> {
    let mut stmt = conn.prepare("SELECT id FROM phones WHERE contact_id = ?1")?;
    let existing = stmt
        .query_map(params![contact_id.to_string()], |row| {
            row.get::<_, String>(0)
        })?
        .collect::<Result<HashSet<_>, _>>()?;

    for (position, phone) in phones.iter().enumerate() {
        if existing.contains(&phone.id.to_string()) {
            conn.execute(
                "UPDATE phones SET phone = ?1, phone_type = ?2, position = ?3 WHERE id = ?4",
                params![
                    phone.phone,
                    phone.phone_type,
                    position as i64,
                    phone.id.to_string(),
                ],
            )?;
        } else {
            conn.execute(
                "INSERT INTO phones (id, contact_id, phone, phone_type, position)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    phone.id.to_string(),
                    contact_id.to_string(),
                    phone.phone,
                    phone.phone_type,
                    position as i64,
                ],
            )?;
        }
    }
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Contact>) -> RolodexResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"
    ))?;

    let result = stmt.query_row(params![id.to_string()], |row| Ok(row_to_contact(row)));

    match result {
        Ok(contact) => {
            let mut contact = contact?;
            contact.phones = find_phones(conn, contact.id)?;
            Ok(Some(contact))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All contacts ascending by (lastname, firstname), case-sensitive as stored.
pub fn find_all(conn: &Connection) -> RolodexResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY lastname, firstname"
    ))?;

    let mut contacts = stmt
        .query_map([], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for contact in &mut contacts {
        contact.phones = find_phones(conn, contact.id)?;
    }
    Ok(contacts)
}

/// Contacts whose lastname starts with `letter`, matched case-insensitively
/// (SQLite LIKE). Wildcard characters in the input are escaped so the prefix
/// matches literally. Ties on lastname break by firstname, then id.
pub fn find_by_letter(conn: &Connection, letter: &str) -> RolodexResult<Vec<Contact>> {
    let pattern = format!("{}%", escape_like(letter));
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts
         WHERE lastname LIKE ?1 ESCAPE '\\'
         ORDER BY lastname, firstname, id"
    ))?;

    let mut contacts = stmt
        .query_map(params![pattern], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    for contact in &mut contacts {
        contact.phones = find_phones(conn, contact.id)?;
    }
    Ok(contacts)
}

/// Deletes the contact and its phones. Returns the number of contact rows
/// removed, so the caller can distinguish a missing id.
pub fn delete(conn: &Connection, id: Id<Contact>) -> RolodexResult<usize> {
    conn.execute(
        "DELETE FROM phones WHERE contact_id = ?1",
        params![id.to_string()],
    )?;
    let deleted = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id.to_string()])?;
    Ok(deleted)
}

/// Whether another contact already holds this email. `exclude` leaves a
/// contact's own row out of the check so updates don't collide with
/// themselves.
pub fn email_taken(
    conn: &Connection,
    email: &str,
    exclude: Option<Id<Contact>>,
) -> RolodexResult<bool> {
    let taken: bool = match exclude {
        Some(id) => conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM contacts WHERE email = ?1 AND id <> ?2)",
            params![email, id.to_string()],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM contacts WHERE email = ?1)",
            params![email],
            |row| row.get(0),
        )?,
    };
    Ok(taken)
}

pub fn count(conn: &Connection) -> RolodexResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_phones(conn: &Connection) -> RolodexResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM phones", [], |row| row.get(0))?;
    Ok(count)
}

pub fn find_phones(conn: &Connection, contact_id: Id<Contact>) -> RolodexResult<Vec<Phone>> {
    let mut stmt = conn.prepare(
        "SELECT id, phone, phone_type FROM phones WHERE contact_id = ?1 ORDER BY position",
    )?;

    let phones = stmt
        .query_map(params![contact_id.to_string()], |row| {
            Ok(row_to_phone(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(phones)
}

fn row_to_contact(row: &rusqlite::Row) -> RolodexResult<Contact> {
    let id_str: String = row.get(0)?;
    let created_str: String = row.get(4)?;
    let updated_str: String = row.get(5)?;

    Ok(Contact {
        id: parse_id(&id_str)?,
        firstname: row.get(1)?,
        lastname: row.get(2)?,
        email: row.get(3)?,
        phones: Vec::new(),
        created_at: parse_timestamp(&created_str)?,
        updated_at: parse_timestamp(&updated_str)?,
    })
}

fn row_to_phone(row: &rusqlite::Row) -> RolodexResult<Phone> {
    let id_str: String = row.get(0)?;

    Ok(Phone {
        id: parse_id(&id_str)?,
        phone: row.get(1)?,
        phone_type: row.get(2)?,
    })
}

fn parse_id<T>(s: &str) -> RolodexResult<Id<T>> {
    Id::parse(s).map_err(|e| RolodexError::Other(format!("invalid id in store: {}", e)))
}

fn parse_timestamp(s: &str) -> RolodexResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RolodexError::Other(format!("invalid timestamp in store: {}", e)))
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
