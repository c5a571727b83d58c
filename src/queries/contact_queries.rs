use rusqlite::Connection;

use crate::db::contact_repo;
use crate::error::RolodexResult;
use crate::model::Contact;

/// Every contact, ascending by (lastname, firstname).
pub fn all_contacts(conn: &Connection) -> RolodexResult<Vec<Contact>> {
    contact_repo::find_all(conn)
}

/// Contacts whose lastname begins with `letter` (case-insensitive prefix
/// match), ascending by lastname. Equal lastnames order by firstname, then
/// id, so the result is deterministic. No matches is an empty vec, not an
/// error.
pub fn by_letter(conn: &Connection, letter: &str) -> RolodexResult<Vec<Contact>> {
    contact_repo::find_by_letter(conn, letter)
}
