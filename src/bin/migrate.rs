//! Maintenance tool for the profile database.
//!
//! Reads only `DATABASE_URL`, so it runs without the bot's Telegram and
//! weather secrets.

use anyhow::{anyhow, Context, Result};
use std::io::{self, Write};
use std::path::Path;
use weather_intake_bot::config::database_url_from_env;
use weather_intake_bot::database::connection::{sqlite_file_path, DatabaseManager};
use weather_intake_bot::database::models::{users_columns, Profile};

const USAGE: &str = "\
Usage: migrate [up|check|reset|help]

  up      Create or update the users table (default)
  check   Show the users table layout and the latest stored profile
  reset   Delete the database file and recreate an empty users table
  help    Print this message

DATABASE_URL selects the database (default: sqlite:./data/profiles.db).";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let database_url = database_url_from_env();

    match command.as_str() {
        "up" | "migrate" => up(&database_url).await,
        "check" => check(&database_url).await,
        "reset" => reset(&database_url).await,
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}\n\n{USAGE}");
            std::process::exit(2);
        }
    }
}

/// Opens the database, creating the file, and applies pending migrations.
async fn open_migrated(database_url: &str) -> Result<DatabaseManager> {
    let db = DatabaseManager::new(database_url)
        .await
        .with_context(|| format!("cannot open {}", display_name(database_url)))?;
    db.run_migrations().await.context("migration failed")?;
    Ok(db)
}

async fn up(database_url: &str) -> Result<()> {
    let db = open_migrated(database_url).await?;
    let stored = Profile::count(&db.pool).await?;
    println!("{}: users table is up to date ({stored} profiles)", display_name(database_url));
    Ok(())
}

async fn check(database_url: &str) -> Result<()> {
    let db = DatabaseManager::new(database_url)
        .await
        .with_context(|| format!("cannot open {}", display_name(database_url)))?;
    println!("Database: {}", display_name(database_url));

    let columns = users_columns(&db.pool).await?;
    if columns.is_empty() {
        println!("No users table yet. Run `migrate up` or let the bot save a profile.");
        return Ok(());
    }

    println!("users:");
    for (name, kind) in &columns {
        println!("  {name:<12} {kind}");
    }

    println!("Profiles stored: {}", Profile::count(&db.pool).await?);
    match Profile::latest(&db.pool).await? {
        Some(p) => println!(
            "Latest: #{} {} ({}), {} at {}",
            p.id, p.name, p.age, p.city, p.created_at
        ),
        None => println!("Latest: none"),
    }
    Ok(())
}

async fn reset(database_url: &str) -> Result<()> {
    let path = sqlite_file_path(database_url)
        .ok_or_else(|| anyhow!("reset needs a file-backed sqlite: URL"))?;

    print!("Delete every stored profile in {path}? Type 'yes' to continue: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    if !answer.trim().eq_ignore_ascii_case("yes") {
        println!("Nothing deleted.");
        return Ok(());
    }

    if Path::new(path).exists() {
        std::fs::remove_file(path).with_context(|| format!("cannot delete {path}"))?;
    }
    let db = open_migrated(database_url).await?;
    println!("Recreated {path} with {} profiles.", Profile::count(&db.pool).await?);
    Ok(())
}

/// File name only, so directory layouts stay out of terminal logs.
fn display_name(database_url: &str) -> String {
    sqlite_file_path(database_url)
        .and_then(|path| Path::new(path).file_name())
        .map(|name| format!("sqlite:.../{}", name.to_string_lossy()))
        .unwrap_or_else(|| database_url.to_string())
}
