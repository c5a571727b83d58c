use rolodex::controller::{self, SaveOutcome};
use rolodex::db::*;
use rolodex::error::RolodexError;
use rolodex::model::*;

fn setup() -> rusqlite::Connection {
    schema::test_connection()
}

fn params(firstname: &str, lastname: &str, email: &str) -> ContactParams {
    ContactParams {
        firstname: Some(firstname.into()),
        lastname: Some(lastname.into()),
        email: Some(email.into()),
        phones: Vec::new(),
    }
}

fn saved(outcome: SaveOutcome) -> Contact {
    match outcome {
        SaveOutcome::Saved(contact) => contact,
        SaveOutcome::Invalid { errors, .. } => panic!("expected a save, got errors: {}", errors),
    }
}

fn rejected(outcome: SaveOutcome) -> Contact {
    match outcome {
        SaveOutcome::Invalid { attempted, .. } => attempted,
        SaveOutcome::Saved(contact) => panic!("expected a rejection, saved {}", contact.name()),
    }
}

// ==========================================================================
// NEW
// ==========================================================================

#[test]
fn new_offers_three_blank_phone_slots_in_order() {
    let contact = controller::handle_new();
    let types: Vec<&str> = contact
        .phones
        .iter()
        .map(|p| p.phone_type.as_str())
        .collect();
    assert_eq!(types, vec!["home", "office", "mobile"]);
    assert!(contact.phones.iter().all(|p| p.phone.is_empty()));
}

#[test]
fn new_does_not_touch_the_store() {
    let conn = setup();
    let _ = controller::handle_new();
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
}

// ==========================================================================
// INDEX
// ==========================================================================

#[test]
fn index_without_letter_lists_everything_sorted() {
    let conn = setup();
    saved(controller::handle_create(&conn, &params("John", "Smith", "jsmith@example.com")).unwrap());
    saved(controller::handle_create(&conn, &params("Tim", "Jones", "tjones@example.com")).unwrap());

    let contacts = controller::handle_index(&conn, None).unwrap();
    let names: Vec<&str> = contacts.iter().map(|c| c.lastname.as_str()).collect();
    assert_eq!(names, vec!["Jones", "Smith"]);
}

#[test]
fn index_with_letter_filters() {
    let conn = setup();
    saved(controller::handle_create(&conn, &params("John", "Smith", "jsmith@example.com")).unwrap());
    saved(controller::handle_create(&conn, &params("Tim", "Jones", "tjones@example.com")).unwrap());

    let contacts = controller::handle_index(&conn, Some("S")).unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].lastname, "Smith");
}

#[test]
fn index_with_unmatched_letter_is_empty_not_an_error() {
    let conn = setup();
    assert!(controller::handle_index(&conn, Some("Q")).unwrap().is_empty());
}

// ==========================================================================
// SHOW / EDIT
// ==========================================================================

#[test]
fn show_returns_the_contact() {
    let conn = setup();
    let jane =
        saved(controller::handle_create(&conn, &params("Jane", "Smith", "jane@example.com")).unwrap());

    let found = controller::handle_show(&conn, jane.id).unwrap();
    assert_eq!(found.name(), "Jane Smith");
}

#[test]
fn show_missing_propagates_not_found() {
    let conn = setup();
    let result = controller::handle_show(&conn, Id::generate());
    assert!(matches!(result, Err(RolodexError::NotFound { .. })));
}

#[test]
fn edit_loads_the_contact_with_phones() {
    let conn = setup();
    let mut input = params("Jane", "Smith", "jane@example.com");
    input.phones = vec![PhoneParams {
        id: None,
        phone: Some("555-1111".into()),
        phone_type: Some("home".into()),
    }];
    let jane = saved(controller::handle_create(&conn, &input).unwrap());

    let found = controller::handle_edit(&conn, jane.id).unwrap();
    assert_eq!(found.phones.len(), 1);
}

// ==========================================================================
// CREATE
// ==========================================================================

#[test]
fn create_valid_is_saved() {
    let conn = setup();
    let outcome =
        controller::handle_create(&conn, &params("Jane", "Smith", "jane@example.com")).unwrap();

    let contact = saved(outcome);
    assert_eq!(contact_repo::count(&conn).unwrap(), 1);
    assert_eq!(contact.email, "jane@example.com");
}

#[test]
fn create_invalid_returns_attempted_input_for_redisplay() {
    let conn = setup();
    let mut input = params("Jane", "Smith", "");
    input.phones = vec![PhoneParams {
        id: None,
        phone: Some("555-1111".into()),
        phone_type: Some("home".into()),
    }];

    let outcome = controller::handle_create(&conn, &input).unwrap();
    match outcome {
        SaveOutcome::Invalid { attempted, errors } => {
            assert_eq!(attempted.firstname, "Jane");
            assert_eq!(attempted.phones.len(), 1);
            assert_eq!(attempted.phones[0].phone, "555-1111");
            assert!(!errors.is_empty());
        }
        SaveOutcome::Saved(_) => panic!("expected a rejection"),
    }
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
}

// ==========================================================================
// UPDATE
// ==========================================================================

#[test]
fn update_valid_is_saved() {
    let conn = setup();
    let jane =
        saved(controller::handle_create(&conn, &params("Jane", "Smith", "jane@example.com")).unwrap());

    let outcome = controller::handle_update(
        &conn,
        jane.id,
        &ContactParams {
            firstname: Some("Janet".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(saved(outcome).firstname, "Janet");
}

#[test]
fn update_invalid_returns_attempted_but_store_is_unchanged() {
    let conn = setup();
    let jane =
        saved(controller::handle_create(&conn, &params("Jane", "Smith", "jane@example.com")).unwrap());

    let outcome = controller::handle_update(
        &conn,
        jane.id,
        &ContactParams {
            lastname: Some("".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let attempted = rejected(outcome);
    assert_eq!(attempted.lastname, "");

    let stored = controller::handle_show(&conn, jane.id).unwrap();
    assert_eq!(stored.lastname, "Smith");
}

#[test]
fn update_missing_propagates_not_found() {
    let conn = setup();
    let result = controller::handle_update(&conn, Id::generate(), &ContactParams::default());
    assert!(matches!(result, Err(RolodexError::NotFound { .. })));
}

// ==========================================================================
// DESTROY
// ==========================================================================

#[test]
fn destroy_empties_the_store() {
    let conn = setup();
    let jane =
        saved(controller::handle_create(&conn, &params("Jane", "Smith", "jane@example.com")).unwrap());

    controller::handle_destroy(&conn, jane.id).unwrap();
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
}

#[test]
fn destroy_missing_propagates_not_found() {
    let conn = setup();
    let result = controller::handle_destroy(&conn, Id::generate());
    assert!(matches!(result, Err(RolodexError::NotFound { .. })));
}
