//! Thin request adapter over the contact aggregate. Each handler maps one
//! inbound request to one aggregate operation and classifies the result;
//! no business logic lives here.
//!
//! Access control is an upstream concern: callers are expected to gate
//! `handle_new`, `handle_edit`, `handle_create`, `handle_update`, and
//! `handle_destroy` behind an authenticated principal. `handle_index` and
//! `handle_show` are public.

use rusqlite::Connection;

use crate::error::{RolodexError, RolodexResult};
use crate::model::{Contact, ContactParams, Id, Phone, DEFAULT_PHONE_TYPES};
use crate::ops::contact_ops;
use crate::queries::contact_queries;
use crate::validation::ValidationErrors;

/// How a save attempt ended. `Saved` is the redirect-to-resource case;
/// `Invalid` carries the attempted (unsaved) contact so a form can be
/// re-rendered with the submitted values intact.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Contact),
    Invalid {
        attempted: Contact,
        errors: ValidationErrors,
    },
}

/// The list view: filtered by letter when one is given, everything
/// otherwise. An empty result is a valid result.
pub fn handle_index(conn: &Connection, letter: Option<&str>) -> RolodexResult<Vec<Contact>> {
    match letter {
        Some(letter) => contact_queries::by_letter(conn, letter),
        None => contact_queries::all_contacts(conn),
    }
}

pub fn handle_show(conn: &Connection, id: Id<Contact>) -> RolodexResult<Contact> {
    contact_ops::find_contact(conn, id)
}

/// An unsaved contact for the blank form, pre-populated with one empty
/// phone slot per default type so the form always offers three.
pub fn handle_new() -> Contact {
    let mut contact = Contact::empty();
    for phone_type in DEFAULT_PHONE_TYPES {
        contact.phones.push(Phone::blank(phone_type));
    }
    contact
}

pub fn handle_edit(conn: &Connection, id: Id<Contact>) -> RolodexResult<Contact> {
    contact_ops::find_contact(conn, id)
}

pub fn handle_create(conn: &Connection, params: &ContactParams) -> RolodexResult<SaveOutcome> {
    match contact_ops::create_contact(conn, params) {
        Ok(contact) => Ok(SaveOutcome::Saved(contact)),
        Err(RolodexError::Invalid(errors)) => Ok(SaveOutcome::Invalid {
            attempted: Contact::build(params),
            errors,
        }),
        Err(e) => Err(e),
    }
}

pub fn handle_update(
    conn: &Connection,
    id: Id<Contact>,
    params: &ContactParams,
) -> RolodexResult<SaveOutcome> {
    match contact_ops::update_contact(conn, id, params) {
        Ok(contact) => Ok(SaveOutcome::Saved(contact)),
        Err(RolodexError::Invalid(errors)) => {
            // Rebuild the rejected in-memory state for redisplay; the stored
            // row is unchanged.
            let mut attempted = contact_ops::find_contact(conn, id)?;
            attempted.apply(params)?;
            Ok(SaveOutcome::Invalid { attempted, errors })
        }
        Err(e) => Err(e),
    }
}

/// Empty success maps to "no content / back to the list".
pub fn handle_destroy(conn: &Connection, id: Id<Contact>) -> RolodexResult<()> {
    contact_ops::destroy_contact(conn, id)
}
