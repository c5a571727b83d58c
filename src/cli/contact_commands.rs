use crate::cli::context::CliContext;
use crate::controller::{self, SaveOutcome};
use crate::model::{Contact, ContactParams, PhoneParams};
use crate::validation::ValidationErrors;

pub fn list(ctx: &CliContext, args: &str) {
    let letter = args.trim();
    let result = if letter.is_empty() {
        controller::handle_index(&ctx.conn, None)
    } else {
        controller::handle_index(&ctx.conn, Some(letter))
    };

    let contacts = match result {
        Ok(contacts) => contacts,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if contacts.is_empty() {
        if letter.is_empty() {
            println!("No contacts yet. Use 'add' to create one.");
        } else {
            println!("No contacts with a lastname starting with '{}'.", letter);
        }
        return;
    }

    println!("Contacts ({}):", contacts.len());
    println!();
    for contact in &contacts {
        println!(
            "  {}, {} <{}>",
            contact.lastname, contact.firstname, contact.email
        );
    }
}

pub fn show(ctx: &CliContext, args: &str) {
    let Some(found) = ctx.find_contact(args) else {
        return;
    };
    match controller::handle_show(&ctx.conn, found.id) {
        Ok(contact) => print_contact(&contact),
        Err(e) => ctx.print_error(&e),
    }
}

/// JSON rendering of a single contact.
pub fn json(ctx: &CliContext, args: &str) {
    let Some(found) = ctx.find_contact(args) else {
        return;
    };
    let rendered = controller::handle_show(&ctx.conn, found.id)
        .and_then(|contact| Ok(serde_json::to_string_pretty(&contact)?));
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn add(ctx: &CliContext) {
    println!("Adding a new contact (press Enter to leave a phone slot empty)");
    println!();

    let template = controller::handle_new();

    let firstname = match ctx.prompt("First name: ") {
        Some(s) => s,
        None => return,
    };
    let lastname = match ctx.prompt("Last name: ") {
        Some(s) => s,
        None => return,
    };
    let email = match ctx.prompt("Email: ") {
        Some(s) => s,
        None => return,
    };

    let mut phones = Vec::new();
    for slot in &template.phones {
        let number = match ctx.prompt(&format!("{} phone: ", slot.phone_type)) {
            Some(s) => s,
            None => return,
        };
        if !number.is_empty() {
            phones.push(PhoneParams {
                id: None,
                phone: Some(number),
                phone_type: Some(slot.phone_type.clone()),
            });
        }
    }

    let params = ContactParams {
        firstname: Some(firstname),
        lastname: Some(lastname),
        email: Some(email),
        phones,
    };

    match controller::handle_create(&ctx.conn, &params) {
        Ok(SaveOutcome::Saved(contact)) => println!("Created {}.", contact.name()),
        Ok(SaveOutcome::Invalid { attempted, errors }) => print_rejected(&attempted, &errors),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CliContext, args: &str) {
    let Some(found) = ctx.find_contact(args) else {
        return;
    };
    let contact = match controller::handle_edit(&ctx.conn, found.id) {
        Ok(contact) => contact,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!("Editing {} (press Enter to keep the current value)", contact.name());
    println!();

    let mut params = ContactParams {
        firstname: prompt_change(ctx, "First name", &contact.firstname),
        lastname: prompt_change(ctx, "Last name", &contact.lastname),
        email: prompt_change(ctx, "Email", &contact.email),
        phones: Vec::new(),
    };

    for phone in &contact.phones {
        let label = format!("{} phone", phone.phone_type);
        if let Some(number) = prompt_change(ctx, &label, &phone.phone) {
            params.phones.push(PhoneParams {
                id: Some(phone.id),
                phone: Some(number),
                phone_type: None,
            });
        }
    }

    if let Some(extra) = ctx.prompt("Add phone as '<type> <number>' (Enter to skip): ") {
        if !extra.is_empty() {
            let (phone_type, number) = match extra.split_once(' ') {
                Some((t, n)) => (t.to_string(), n.trim().to_string()),
                None => ("other".to_string(), extra),
            };
            params.phones.push(PhoneParams {
                id: None,
                phone: Some(number),
                phone_type: Some(phone_type),
            });
        }
    }

    match controller::handle_update(&ctx.conn, contact.id, &params) {
        Ok(SaveOutcome::Saved(updated)) => println!("Updated {}.", updated.name()),
        Ok(SaveOutcome::Invalid { attempted, errors }) => print_rejected(&attempted, &errors),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CliContext, args: &str) {
    let Some(found) = ctx.find_contact(args) else {
        return;
    };
    let confirm = match ctx.prompt(&format!("Delete {}? (y/N): ", found.name())) {
        Some(s) => s,
        None => return,
    };
    if !confirm.eq_ignore_ascii_case("y") {
        println!("Not deleted.");
        return;
    }

    match controller::handle_destroy(&ctx.conn, found.id) {
        Ok(()) => println!("Deleted {}.", found.name()),
        Err(e) => ctx.print_error(&e),
    }
}

fn prompt_change(ctx: &CliContext, label: &str, current: &str) -> Option<String> {
    let display = if current.is_empty() { "-" } else { current };
    match ctx.prompt(&format!("{} [{}]: ", label, display)) {
        Some(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn print_contact(contact: &Contact) {
    println!("{}", contact.name());
    println!("  email: {}", contact.email);
    for phone in &contact.phones {
        let number = if phone.phone.is_empty() { "-" } else { phone.phone.as_str() };
        println!("  {} phone: {}", phone.phone_type, number);
    }
    println!("  added: {}", contact.created_at.format("%Y-%m-%d"));
}

fn print_rejected(attempted: &Contact, errors: &ValidationErrors) {
    println!("Could not save the contact:");
    for message in errors.messages() {
        println!("  - {}", message);
    }
    println!(
        "You entered: firstname '{}', lastname '{}', email '{}'",
        attempted.firstname, attempted.lastname, attempted.email
    );
}
