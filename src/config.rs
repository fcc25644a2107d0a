use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr};

use crate::error::{Error, Result};

/// File name of the optional project configuration inside a project folder.
pub const CONFIG_FILE: &str = "projlog.toml";

/// Optional per-project configuration, read from `projlog.toml` next to the
/// journal. Fills header fields at scaffold time and supplies the default
/// location code for new entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProjectConfig {
    /// Project name, used as the journal's H1 title.
    pub name: String,
    /// Project version recorded in the journal header.
    pub version: String,
    /// Optional one-line summary for the journal header.
    pub summary: Option<String>,
    /// Default location code for new entries.
    pub location: Option<String>,
}

impl ProjectConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<ProjectConfig> {
        let path = path.as_ref();
        let buffer =
            fs::read_to_string(path).map_err(|source| Error::io("read", path, source))?;

        buffer.parse()
    }

    /// Loads `projlog.toml` from the given folder, falling back to defaults
    /// when the file does not exist. An unparseable file is an error.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<ProjectConfig> {
        let path = dir.as_ref().join(CONFIG_FILE);

        if path.is_file() {
            ProjectConfig::load(path)
        } else {
            Ok(ProjectConfig::default())
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::from("Untitled Project"),
            version: String::from("0.1.0"),
            summary: None,
            location: None,
        }
    }
}

impl FromStr for ProjectConfig {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_a_full_configuration() {
        let input = r#"
name = "Orbit Tracker"
version = "1.2.0"
summary = "Tracks orbital decay"
location = "MOON"
"#;
        let config: ProjectConfig = input.parse().expect("config failed to parse");

        assert_eq!("Orbit Tracker", config.name);
        assert_eq!("1.2.0", config.version);
        assert_eq!(Some(String::from("Tracks orbital decay")), config.summary);
        assert_eq!(Some(String::from("MOON")), config.location);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ProjectConfig = r#"name = "Minimal""#.parse().expect("config failed to parse");

        assert_eq!("Minimal", config.name);
        assert_eq!("0.1.0", config.version);
        assert_eq!(None, config.summary);
    }

    #[test]
    fn rejects_invalid_toml() {
        let result = "name = ".parse::<ProjectConfig>();

        assert!(matches!(result, Err(Error::Config(_))));
    }
}
