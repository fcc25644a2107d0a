use chrono::{DateTime, Local};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    build,
    config::ProjectConfig,
    error::{Error, Result},
    journal::JOURNAL_FILE,
    model::{JournalEntry, Status},
};

/// Change list recorded with every seed entry.
pub const SEED_CHANGES: [&str; 2] = ["Project created", "Folder initialized"];

/// Scaffolds a project folder: creates the directory (and parents) if
/// missing and writes a `journal.md` with a header and a seeded revision 1.
/// Refuses to overwrite an existing journal. A blank location falls back to
/// the config's location, then to the builder's default.
pub fn scaffold(
    dir: impl AsRef<Path>,
    config: &ProjectConfig,
    status: Status,
    location: &str,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| Error::io("create", dir, source))?;

    let path = dir.join(JOURNAL_FILE);
    if path.exists() {
        return Err(Error::AlreadyExists { path });
    }

    let location = match location.trim() {
        "" => config.location.as_deref().unwrap_or_default(),
        explicit => explicit,
    };

    let seed = JournalEntry {
        revision: 1,
        timestamp: build::timestamp(now, location),
        status,
        changes: SEED_CHANGES.iter().map(|change| change.to_string()).collect(),
    };

    let mut contents = header(config, now.date_naive());
    contents.push_str(&build::render(&seed));

    fs::write(&path, contents).map_err(|source| Error::io("write", &path, source))?;

    Ok(path)
}

fn header(config: &ProjectConfig, start_date: chrono::NaiveDate) -> String {
    let mut header = format!(
        "# {}\n\nStart date: {}\nVersion: {}\n",
        config.name, start_date, config.version
    );

    if let Some(summary) = &config.summary {
        header.push_str("Summary: ");
        header.push_str(summary);
        header.push('\n');
    }

    header.push_str("\n---\n\n## Change Log\n");

    header
}
