use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use projlog::{
    build::{EntryBuilder, Submission},
    config::ProjectConfig,
    init,
    journal::JournalStore,
    model::Status,
};

#[derive(Parser, Debug)]
#[command(
    name = "projlog",
    about = "Track project revisions in a per-folder Markdown journal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scaffold a new project folder with a seeded journal.
    Init {
        /// Project folder to create.
        dir: PathBuf,
        /// Project name for the journal header.
        #[arg(long)]
        name: Option<String>,
        /// Project version for the journal header.
        #[arg(long)]
        version: Option<String>,
        /// One-line summary for the journal header.
        #[arg(long)]
        summary: Option<String>,
        /// Status recorded with the seed entry.
        #[arg(long, default_value = "WIP")]
        status: String,
        /// Location code recorded with the seed entry.
        #[arg(long, default_value = "")]
        location: String,
    },
    /// Append a revision entry to a journal.
    Add {
        /// Journal file, or a project folder containing journal.md.
        path: PathBuf,
        /// New status; blank carries the current status forward.
        #[arg(long, default_value = "")]
        status: String,
        /// Comma-separated list of changes.
        #[arg(long, default_value = "")]
        changes: String,
        /// Location code; blank falls back to the project config, then EARTH.
        #[arg(long, default_value = "")]
        location: String,
        /// Append without asking for confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Print the journal's current status.
    Status {
        /// Journal file, or a project folder containing journal.md.
        path: PathBuf,
    },
    /// Print the journal, optionally as JSON.
    Show {
        /// Journal file, or a project folder containing journal.md.
        path: PathBuf,
        /// Print the parsed journal as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Init {
            dir,
            name,
            version,
            summary,
            status,
            location,
        } => init_project(dir, name, version, summary, &status, &location),
        Command::Add {
            path,
            status,
            changes,
            location,
            yes,
        } => add_entry(path, status, changes, location, yes),
        Command::Status { path } => {
            let store = JournalStore::locate(path)?;
            println!("{}", store.current_status()?);

            Ok(())
        }
        Command::Show { path, json } => show_journal(path, json),
    }
}

fn init_project(
    dir: PathBuf,
    name: Option<String>,
    version: Option<String>,
    summary: Option<String>,
    status: &str,
    location: &str,
) -> Result<()> {
    let mut config = ProjectConfig::load_or_default(&dir)?;
    if let Some(name) = name {
        config.name = name;
    }
    if let Some(version) = version {
        config.version = version;
    }
    if let Some(summary) = summary {
        config.summary = Some(summary);
    }

    let status = status.parse::<Status>()?;
    let path = init::scaffold(&dir, &config, status, location, Local::now())?;
    println!("Created {}", path.display());

    Ok(())
}

fn add_entry(
    path: PathBuf,
    status: String,
    changes: String,
    location: String,
    yes: bool,
) -> Result<()> {
    let store = JournalStore::locate(path)?;
    let location = if location.trim().is_empty() {
        configured_location(&store)?
    } else {
        location
    };

    let builder = EntryBuilder::new()
        .with_status(status)
        .with_changes(changes)
        .with_location(location);

    let submission = if yes {
        builder.submit(&store, |_| true)?
    } else {
        builder.submit(&store, confirm_on_stdin)?
    };

    match submission {
        Submission::Appended(entry) => {
            println!("Appended revision {} ({})", entry.revision, entry.status)
        }
        Submission::Discarded => println!("Discarded; nothing was written"),
    }

    Ok(())
}

fn configured_location(store: &JournalStore) -> Result<String> {
    let Some(dir) = store.path().parent() else {
        return Ok(String::new());
    };
    let config = ProjectConfig::load_or_default(dir)?;

    Ok(config.location.unwrap_or_default())
}

fn confirm_on_stdin(rendered: &str) -> bool {
    println!("{rendered}");
    print!("Append this entry? [y/N] ");

    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn show_journal(path: PathBuf, json: bool) -> Result<()> {
    let store = JournalStore::locate(path)?;
    let journal = store.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&journal)?);

        return Ok(());
    }

    if let Some(title) = &journal.title {
        println!("{title}");
    }
    println!(
        "{} entries, current status {}",
        journal.entries.len(),
        journal.current_status()
    );
    for entry in &journal.entries {
        println!(
            "  {:>3}  {}  {:<4}  {} change(s)",
            entry.revision,
            entry.timestamp,
            entry.status,
            entry.changes.len()
        );
    }

    Ok(())
}
