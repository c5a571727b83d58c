use std::io::{self, Write};

use rusqlite::Connection;

use crate::controller;
use crate::error::RolodexError;
use crate::model::Contact;

pub struct CliContext {
    pub conn: Connection,
}

impl CliContext {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    pub fn print_error(&self, err: &RolodexError) {
        println!("Error: {}", err);
    }

    /// Resolve a contact by case-insensitive name query. Prints an error if
    /// nothing matches or the query is ambiguous.
    pub fn find_contact(&self, args: &str) -> Option<Contact> {
        let query = args.trim();
        if query.is_empty() {
            println!("Give a contact name.");
            return None;
        }

        let contacts = controller::handle_index(&self.conn, None).unwrap_or_default();
        let lower = query.to_lowercase();
        let matches: Vec<&Contact> = contacts
            .iter()
            .filter(|c| c.name().to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => {
                println!("No contact found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                // Check for exact match
                if let Some(exact) = matches.iter().find(|c| c.name().eq_ignore_ascii_case(query)) {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for c in &matches {
                    println!("  {}", c.name());
                }
                println!("Please be more specific.");
                None
            }
        }
    }
}
