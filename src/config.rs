//! Locations of persisted state and session switches

use std::path::{Path, PathBuf};

/// File holding the schema of every table
pub const DEFAULT_META_FILE: &str = "db_meta.json";
/// Directory holding one data file per table
pub const DEFAULT_DATA_DIR: &str = "data";
/// Extension of every persisted file
pub const JSON_EXT: &str = "json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory the metadata file and the data directory live in
    pub root: PathBuf,
    pub meta_file: String,
    pub data_dir: String,
    pub cache_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Config {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            meta_file: DEFAULT_META_FILE.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            cache_enabled: true,
        }
    }

    pub fn meta_path(&self) -> PathBuf {
        self.root.join(&self.meta_file)
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    /// Path of the data file for `table_name`, e.g. `data/users.json`
    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.data_path()
            .join(format!("{}.{}", table_name, JSON_EXT))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::Config;

    #[test]
    fn test_paths() {
        let config = Config::new("/tmp/db");
        assert_eq!(config.meta_path(), PathBuf::from("/tmp/db/db_meta.json"));
        assert_eq!(config.data_path(), PathBuf::from("/tmp/db/data"));
        assert_eq!(
            config.table_path("users"),
            PathBuf::from("/tmp/db/data/users.json")
        );
        assert!(config.cache_enabled);
    }
}
