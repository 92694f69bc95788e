//! Gradebook CLI
//!
//! Interactive command loop over a journal. All parsing and coercion of
//! raw user input happens here; the journal only ever sees typed
//! arguments and returns typed errors for this layer to render.

use std::io::{self, BufRead, Write};

use clap::Parser;
use gradebook::{Config, GradebookError, Journal, StudentPatch, MAX_MARK, MIN_MARK};
use tracing_subscriber::{fmt, EnvFilter};

const MANAGEMENT_COMMANDS: [&str; 6] =
    ["show list", "get by id", "add", "update", "delete", "add mark"];

/// Gradebook
#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(about = "Single-user student record store with CSV persistence")]
#[command(version)]
struct Args {
    /// Backing CSV file
    #[arg(short, long, default_value = "./students.csv")]
    file: String,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gradebook=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    tracing::info!("Gradebook v{}", gradebook::VERSION);

    let config = Config::builder().data_file(&args.file).build();

    let mut journal = match Journal::open(config) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!("Failed to open journal: {}", e);
            std::process::exit(1);
        }
    };

    let report = journal.load_report();
    if report.rows_skipped > 0 {
        println!(
            "Warning: {} row(s) in {} could not be read and were skipped.",
            report.rows_skipped, args.file
        );
    }

    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(command) = prompt(&mut lines, "Enter command: ") else {
            break;
        };

        match command.as_str() {
            "exit" => {
                println!("See you next time..");
                break;
            }
            "help" => print_help(),
            "" => {}
            cmd if MANAGEMENT_COMMANDS.contains(&cmd) => {
                handle_management_command(&mut journal, cmd, &mut lines)
            }
            cmd => println!("Unknown command: {cmd}"),
        }
    }
}

fn handle_management_command(
    journal: &mut Journal,
    command: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) {
    match command {
        "show list" => show_students(journal),

        "get by id" => {
            let Some(id) = ask_id(lines, "Enter student ID to retrieve data: ") else {
                return;
            };
            match journal.get(id) {
                Ok(student) => println!(
                    "Detailed information: {} - Marks: {:?}, Info: {}",
                    student.name, student.marks, student.info
                ),
                Err(e) => render_error(&e),
            }
        }

        "add" => {
            let Some((name, marks)) = ask_student_payload(lines) else {
                return;
            };
            match journal.create(&name, marks, None) {
                Ok(student) => {
                    println!("Added student '{}' with ID {}.", student.name, student.id)
                }
                Err(e) => render_error(&e),
            }
        }

        "update" => {
            let Some(id) = ask_id(lines, "Enter student ID to update data: ") else {
                return;
            };
            let Some((name, marks)) = ask_student_payload(lines) else {
                return;
            };

            let mut patch = StudentPatch::new().name(name);
            if let Some(marks) = marks {
                patch = patch.marks(marks);
            }

            match journal.update(id, &patch) {
                Ok(student) => println!(
                    "Student data updated: ID {} | {} | Marks: {:?}",
                    student.id, student.name, student.marks
                ),
                Err(e) => render_error(&e),
            }
        }

        "delete" => {
            let Some(id) = ask_id(lines, "Enter student ID to delete: ") else {
                return;
            };
            match journal.delete(id) {
                Ok(student) => println!("Deleted student '{}'.", student.name),
                Err(e) => render_error(&e),
            }
        }

        "add mark" => {
            let Some(id) = ask_id(lines, "Enter student ID to add a mark: ") else {
                return;
            };
            let msg = format!(
                "Enter marks to add (from {MIN_MARK} to {MAX_MARK}), separated by commas: "
            );
            let Some(input) = prompt(lines, &msg) else {
                return;
            };
            let Some(marks) = parse_marks(&input) else {
                println!("'{input}' is not a valid mark list. Marks must be numbers separated by commas.");
                return;
            };
            match journal.append_marks(id, &marks) {
                Ok(student) => {
                    println!("Marks {:?} added for student '{}'.", marks, student.name)
                }
                Err(e) => render_error(&e),
            }
        }

        _ => unreachable!("caller checked the command"),
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn print_help() {
    println!("Welcome to the gradebook.");
    println!("Available commands: exit, help, {}", MANAGEMENT_COMMANDS.join(", "));
}

fn show_students(journal: &Journal) {
    println!("{}", "=".repeat(20));
    println!("List of students:\n");

    if journal.is_empty() {
        println!("No students found.");
    } else {
        for student in journal.list() {
            let marks = student
                .marks
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let info = if student.info.is_empty() {
                "No additional info"
            } else {
                &student.info
            };
            println!(
                "ID: {} | Name: {} | Marks: {} | Info: {}",
                student.id, student.name, marks, info
            );
        }
    }

    println!("{}", "=".repeat(20));
}

fn render_error(e: &GradebookError) {
    match e {
        GradebookError::NotFound(id) => println!("Student with ID '{id}' not found."),
        GradebookError::Validation(msg) => println!("Invalid input: {msg}"),
        GradebookError::SaveFailed(msg) => {
            println!("Warning: change applied in memory but saving to file failed: {msg}")
        }
        other => println!("Error: {other}"),
    }
}

// =============================================================================
// Input Parsing
// =============================================================================

/// Print a prompt and read one trimmed line; `None` on EOF or read error
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok()?;
    match lines.next()? {
        Ok(line) => Some(line.trim().to_string()),
        Err(e) => {
            tracing::warn!("Failed to read input: {}", e);
            None
        }
    }
}

/// Ask for a student id, reporting invalid input
fn ask_id(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Option<u32> {
    let input = prompt(lines, message)?;
    match input.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("ID '{input}' is not a valid value.");
            None
        }
    }
}

/// Ask for "Name", "4,5,3" or "Name;4,5,3" and split it into parts
fn ask_student_payload(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<(String, Option<Vec<u8>>)> {
    let msg = "Enter student data: 'First Last' for the name, 4,5,4 for the marks, \
               or 'First Last;4,5,4' for both: ";
    let input = prompt(lines, msg)?;

    let (name, marks) = match input.split_once(';') {
        Some((name, marks)) => (name.trim().to_string(), Some(marks)),
        None if input.contains(',') => (String::new(), Some(input.as_str())),
        None => (input, None),
    };

    let marks = match marks {
        Some(raw) => match parse_marks(raw) {
            Some(marks) => Some(marks),
            None => {
                println!("Marks are incorrect. Template: 4,5,4,5. Marks must be numbers.");
                return None;
            }
        },
        None => None,
    };

    Some((name, marks))
}

/// Parse a comma-separated mark list; range checking is the journal's job
fn parse_marks(input: &str) -> Option<Vec<u8>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<u8>().ok())
        .collect()
}
