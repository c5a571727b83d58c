pub mod context;
pub mod contact_commands;

use std::path::Path;

use rusqlite::Connection;

use crate::db::schema;
use context::CliContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("Rolodex");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }

    let ctx = CliContext::new(conn);
    repl_loop(&ctx);
}

fn repl_loop(ctx: &CliContext) {
    loop {
        let line = match ctx.read_line("> ") {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, args) = match line.split_once(' ') {
            Some((command, args)) => (command, args.trim()),
            None => (line, ""),
        };

        match command {
            "list" | "ls" => contact_commands::list(ctx, args),
            "show" => contact_commands::show(ctx, args),
            "json" => contact_commands::json(ctx, args),
            "add" => contact_commands::add(ctx),
            "edit" => contact_commands::edit(ctx, args),
            "delete" | "rm" => contact_commands::delete(ctx, args),
            "help" => print_help(),
            "exit" | "quit" | "q" => break,
            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
        println!();
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list [letter]    All contacts, or only lastnames starting with letter");
    println!("  show <name>      Contact details");
    println!("  json <name>      Contact details as JSON");
    println!("  add              Add a contact");
    println!("  edit <name>      Edit a contact");
    println!("  delete <name>    Delete a contact and its phones");
    println!("  help             This help");
    println!("  exit             Quit");
}
