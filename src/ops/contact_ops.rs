use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::db::contact_repo;
use crate::error::{RolodexError, RolodexResult};
use crate::model::{Contact, ContactParams, Id};
use crate::validation::{Reason, ValidationErrors};

/// Validates and persists a new contact with its phones in one transaction.
/// On validation failure nothing is written and the full failure set comes
/// back as `RolodexError::Invalid`.
pub fn create_contact(conn: &Connection, params: &ContactParams) -> RolodexResult<Contact> {
    let contact = Contact::build(params);
    validate(conn, &contact, None)?;

    let tx = conn.unchecked_transaction()?;
    let committed =
        contact_repo::insert(&tx, &contact).and_then(|()| tx.commit().map_err(RolodexError::from));
    if let Err(e) = committed {
        return Err(remap_email_conflict(e));
    }

    info!(contact_id = %contact.id, "created contact");
    Ok(contact)
}

/// Loads the target, applies the submitted attributes in memory, revalidates
/// (the uniqueness check skips the contact's own row), and persists the
/// contact row plus the phone diff atomically. On validation failure the
/// stored state is untouched.
pub fn update_contact(
    conn: &Connection,
    id: Id<Contact>,
    params: &ContactParams,
) -> RolodexResult<Contact> {
    let mut contact = find_contact(conn, id)?;
    contact.apply(params)?;
    validate(conn, &contact, Some(id))?;
    contact.updated_at = Utc::now();

    let tx = conn.unchecked_transaction()?;
    let committed =
        contact_repo::update(&tx, &contact).and_then(|()| tx.commit().map_err(RolodexError::from));
    if let Err(e) = committed {
        return Err(remap_email_conflict(e));
    }

    info!(contact_id = %contact.id, "updated contact");
    Ok(contact)
}

/// Deletes the contact and every phone it owns, in one transaction.
/// Destroying an id that does not exist is `NotFound`, not a silent success.
pub fn destroy_contact(conn: &Connection, id: Id<Contact>) -> RolodexResult<()> {
    let tx = conn.unchecked_transaction()?;
    let deleted = contact_repo::delete(&tx, id)?;
    if deleted == 0 {
        return Err(not_found(id));
    }
    tx.commit()?;

    info!(contact_id = %id, "destroyed contact");
    Ok(())
}

pub fn find_contact(conn: &Connection, id: Id<Contact>) -> RolodexResult<Contact> {
    contact_repo::find_by_id(conn, id)?.ok_or_else(|| not_found(id))
}

/// Presence and uniqueness rules, evaluated together so the caller gets
/// every failing field at once.
fn validate(conn: &Connection, contact: &Contact, exclude: Option<Id<Contact>>) -> RolodexResult<()> {
    let mut errors = ValidationErrors::new();
    errors.require_present("firstname", &contact.firstname);
    errors.require_present("lastname", &contact.lastname);
    errors.require_present("email", &contact.email);
    if !contact.email.trim().is_empty() && contact_repo::email_taken(conn, &contact.email, exclude)? {
        errors.add("email", Reason::Taken);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(%errors, "contact failed validation");
        Err(errors.into())
    }
}

/// A commit-time UNIQUE violation on the email column means the pre-check
/// lost a race; surface it as the same `taken` validation failure.
fn remap_email_conflict(err: RolodexError) -> RolodexError {
    if let RolodexError::Database(rusqlite::Error::SqliteFailure(ref e, Some(ref msg))) = err {
        if e.code == rusqlite::ErrorCode::ConstraintViolation && msg.contains("contacts.email") {
            let mut errors = ValidationErrors::new();
            errors.add("email", Reason::Taken);
            return RolodexError::Invalid(errors);
        }
    }
    err
}

fn not_found(id: Id<Contact>) -> RolodexError {
    RolodexError::NotFound {
        entity_type: "Contact".into(),
        id: id.to_string(),
    }
}
