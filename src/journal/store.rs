use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    journal::{Journal, JOURNAL_FILE},
    model::Status,
};

/// Handle to a journal's persisted text.
///
/// The store never rewrites existing content: reads parse the whole file,
/// writes go through [`JournalStore::append`] only. Appends are not
/// transactional; a crash mid-write may leave a truncated last entry.
#[derive(Debug, Clone)]
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    /// Resolves a user-supplied path to a journal file. A directory resolves
    /// to `journal.md` inside it; an existing file is used directly.
    pub fn locate(candidate: impl Into<PathBuf>) -> Result<JournalStore> {
        let candidate = candidate.into();
        let path = if candidate.is_dir() {
            candidate.join(JOURNAL_FILE)
        } else {
            candidate
        };

        if !path.is_file() {
            return Err(Error::NotFound { path });
        }

        Ok(JournalStore { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the journal's raw text.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| Error::io("read", &self.path, source))
    }

    /// Reads and parses the journal.
    pub fn load(&self) -> Result<Journal> {
        self.read()?.parse()
    }

    /// The status of the last recorded entry, `WIP` when none exists.
    pub fn current_status(&self) -> Result<Status> {
        Ok(self.load()?.current_status())
    }

    /// The number of revision entries recorded in the journal.
    pub fn count_entries(&self) -> Result<usize> {
        Ok(self.load()?.entries.len())
    }

    /// Appends pre-rendered entry text at the end of the journal.
    pub fn append(&self, rendered: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::io("open", &self.path, source))?;

        file.write_all(rendered.as_bytes())
            .map_err(|source| Error::io("append to", &self.path, source))
    }
}
