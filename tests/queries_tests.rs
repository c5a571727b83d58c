use rolodex::db::*;
use rolodex::model::*;
use rolodex::ops::*;
use rolodex::queries::*;

fn setup() -> rusqlite::Connection {
    schema::test_connection()
}

fn create(conn: &rusqlite::Connection, firstname: &str, lastname: &str, email: &str) -> Contact {
    contact_ops::create_contact(
        conn,
        &ContactParams {
            firstname: Some(firstname.into()),
            lastname: Some(lastname.into()),
            email: Some(email.into()),
            phones: Vec::new(),
        },
    )
    .unwrap()
}

fn lastnames(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.lastname.as_str()).collect()
}

// ==========================================================================
// ALL CONTACTS
// ==========================================================================

#[test]
fn all_contacts_sorts_by_lastname() {
    let conn = setup();
    create(&conn, "John", "Smith", "jsmith@example.com");
    create(&conn, "Tim", "Jones", "tjones@example.com");

    let all = contact_queries::all_contacts(&conn).unwrap();
    assert_eq!(lastnames(&all), vec!["Jones", "Smith"]);
}

#[test]
fn all_contacts_breaks_lastname_ties_by_firstname() {
    let conn = setup();
    create(&conn, "Zoe", "Smith", "zsmith@example.com");
    create(&conn, "Adam", "Smith", "asmith@example.com");

    let all = contact_queries::all_contacts(&conn).unwrap();
    assert_eq!(all[0].firstname, "Adam");
    assert_eq!(all[1].firstname, "Zoe");
}

#[test]
fn all_contacts_empty_store_is_empty() {
    let conn = setup();
    assert!(contact_queries::all_contacts(&conn).unwrap().is_empty());
}

#[test]
fn all_contacts_loads_phones() {
    let conn = setup();
    let jane = contact_ops::create_contact(
        &conn,
        &ContactParams {
            firstname: Some("Jane".into()),
            lastname: Some("Smith".into()),
            email: Some("jane@example.com".into()),
            phones: vec![PhoneParams {
                id: None,
                phone: Some("555-1111".into()),
                phone_type: Some("home".into()),
            }],
        },
    )
    .unwrap();

    let all = contact_queries::all_contacts(&conn).unwrap();
    assert_eq!(all[0].id, jane.id);
    assert_eq!(all[0].phones.len(), 1);
}

// ==========================================================================
// BY LETTER
// ==========================================================================

#[test]
fn by_letter_returns_sorted_matches() {
    let conn = setup();
    create(&conn, "John", "Smith", "jsmith@example.com");
    create(&conn, "Tim", "Jones", "tjones@example.com");
    create(&conn, "John", "Johnson", "jjohnson@example.com");

    let matched = contact_queries::by_letter(&conn, "J").unwrap();
    assert_eq!(lastnames(&matched), vec!["Johnson", "Jones"]);
}

#[test]
fn by_letter_omits_non_matches() {
    let conn = setup();
    let smith = create(&conn, "John", "Smith", "jsmith@example.com");
    create(&conn, "Tim", "Jones", "tjones@example.com");

    let matched = contact_queries::by_letter(&conn, "J").unwrap();
    assert!(matched.iter().all(|c| c.id != smith.id));
}

#[test]
fn by_letter_without_matches_is_empty() {
    let conn = setup();
    create(&conn, "John", "Smith", "jsmith@example.com");

    assert!(contact_queries::by_letter(&conn, "Z").unwrap().is_empty());
}

#[test]
fn by_letter_matches_case_insensitively() {
    let conn = setup();
    create(&conn, "John", "Smith", "jsmith@example.com");

    let matched = contact_queries::by_letter(&conn, "s").unwrap();
    assert_eq!(matched.len(), 1);
}

#[test]
fn by_letter_breaks_lastname_ties_by_firstname() {
    let conn = setup();
    create(&conn, "Zoe", "Smith", "zsmith@example.com");
    create(&conn, "Adam", "Smith", "asmith@example.com");

    let matched = contact_queries::by_letter(&conn, "S").unwrap();
    assert_eq!(matched[0].firstname, "Adam");
    assert_eq!(matched[1].firstname, "Zoe");
}

#[test]
fn by_letter_treats_wildcards_literally() {
    let conn = setup();
    create(&conn, "John", "Smith", "jsmith@example.com");

    assert!(contact_queries::by_letter(&conn, "%").unwrap().is_empty());
    assert!(contact_queries::by_letter(&conn, "_").unwrap().is_empty());
}

#[test]
fn by_letter_accepts_longer_prefixes() {
    let conn = setup();
    create(&conn, "Tim", "Jones", "tjones@example.com");
    create(&conn, "John", "Johnson", "jjohnson@example.com");

    let matched = contact_queries::by_letter(&conn, "Jon").unwrap();
    assert_eq!(lastnames(&matched), vec!["Jones"]);
}
