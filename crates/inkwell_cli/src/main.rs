//! Command-line surface over `inkwell_core`.
//!
//! # Responsibility
//! - Provide smoke checks (`version`) for core crate linkage.
//! - Create, look up and delete records against a SQLite file, printing
//!   records as JSON objects.

use clap::{Parser, Subcommand};
use inkwell_core::db::migrations::latest_version;
use inkwell_core::db::{open_db, open_db_in_memory};
use inkwell_core::{
    hash_password, Author, AuthorRepository, EntityId, SqliteAuthorRepository,
    SqliteUserRepository, User, UserRepository,
};
use log::info;
use serde_json::{Map, Value};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// inkwell - author and user record management
#[derive(Parser, Debug)]
#[command(name = "inkwell")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database file; an in-memory database is used when omitted
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core version and schema version
    Version,

    /// Create an author from a plaintext password
    AuthorAdd {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Print one author by id
    AuthorGet { id: String },

    /// List authors whose username contains the term
    AuthorFind { term: String },

    /// Delete one author by id
    AuthorDelete { id: String },

    /// Create a user from a plaintext password
    UserAdd {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
    },

    /// Print one user by id
    UserGet { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| inkwell_core::default_log_level());
        inkwell_core::init_logging(level, log_dir)?;
    }

    let conn = match cli.db.as_ref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    match cli.command {
        Command::Version => {
            println!("inkwell_core version={}", inkwell_core::core_version());
            println!("inkwell_core schema_version={}", latest_version());
        }
        Command::AuthorAdd {
            username,
            email,
            password,
            avatar_url,
        } => {
            let mut author = Author::new(&email, &hash_password(&password)?, &username)?;
            author.set_avatar_url(avatar_url.as_deref())?;
            author.issue_activation_token();
            SqliteAuthorRepository::try_new(&conn)?.insert_author(&author)?;
            info!("event=cli_author_add module=cli status=ok author_id={}", author.id());
            print_record(author.to_json_map())?;
        }
        Command::AuthorGet { id } => {
            let repo = SqliteAuthorRepository::try_new(&conn)?;
            match repo.get_author(EntityId::parse(id.as_str())?)? {
                Some(author) => print_record(author.to_json_map())?,
                None => return Err(format!("author not found: {id}").into()),
            }
        }
        Command::AuthorFind { term } => {
            let repo = SqliteAuthorRepository::try_new(&conn)?;
            let found: Vec<Value> = repo
                .get_authors_by_username(&term)?
                .iter()
                .map(|author| Value::Object(author.to_json_map()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Command::AuthorDelete { id } => {
            SqliteAuthorRepository::try_new(&conn)?.delete_author(EntityId::parse(id.as_str())?)?;
        }
        Command::UserAdd {
            email,
            password,
            location,
            phone_number,
        } => {
            let mut user = User::new(&email, &hash_password(&password)?)?;
            user.set_location(location.as_deref())?;
            user.set_phone_number(phone_number.as_deref())?;
            SqliteUserRepository::try_new(&conn)?.insert_user(&user)?;
            print_record(user.to_json_map())?;
        }
        Command::UserGet { id } => {
            let repo = SqliteUserRepository::try_new(&conn)?;
            match repo.get_user(EntityId::parse(id.as_str())?)? {
                Some(user) => print_record(user.to_json_map())?,
                None => return Err(format!("user not found: {id}").into()),
            }
        }
    }
    Ok(())
}

fn print_record(record: Map<String, Value>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(&Value::Object(record))?);
    Ok(())
}
