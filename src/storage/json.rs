use std::{
    fs,
    io::ErrorKind,
    path::Path,
};

use serde::{de::DeserializeOwned, ser::SerializeMap, Serialize, Serializer};

use crate::{
    config::Config,
    error::{Error, Result},
    sql::{
        schema::{Column, Schema, Table},
        types::{Record, TableData},
    },
    storage::engine::Engine,
};

/// File-backed storage engine
///
/// The schema lives in `config.meta_path()`, each table's rows in
/// `config.table_path(table)`. Files are pretty-printed JSON and rewritten
/// in full on every save.
pub struct JsonEngine {
    config: Config,
}

impl JsonEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{}: {}", path.display(), err))
}

/// Reads a JSON file, a missing file reads as the empty value
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).map_err(|err| storage_error(path, err)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!("{} not found, starting empty", path.display());
            Ok(T::default())
        }
        Err(err) => Err(storage_error(path, err)),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|err| storage_error(dir, err))?;
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|err| storage_error(path, err))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// A record written field by field in column order; fields the table
/// doesn't declare follow in name order
struct RecordRef<'a> {
    columns: &'a [Column],
    record: &'a Record,
}

impl Serialize for RecordRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len()))?;
        for column in self.columns {
            if let Some(value) = self.record.get(&column.name) {
                map.serialize_entry(&column.name, value)?;
            }
        }
        for (name, value) in self.record {
            if !self.columns.iter().any(|c| &c.name == name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

struct RowsRef<'a> {
    table: &'a Table,
    data: &'a TableData,
}

impl Serialize for RowsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.data.len()))?;
        for (id, record) in self.data {
            let record = RecordRef {
                columns: &self.table.columns,
                record,
            };
            map.serialize_entry(id, &record)?;
        }
        map.end()
    }
}

impl Engine for JsonEngine {
    fn load_schema(&mut self) -> Result<Schema> {
        read_json(&self.config.meta_path())
    }

    fn save_schema(&mut self, schema: &Schema) -> Result<()> {
        write_json(&self.config.meta_path(), schema)
    }

    fn load_rows(&mut self, table_name: &str) -> Result<TableData> {
        read_json(&self.config.table_path(table_name))
    }

    fn save_rows(&mut self, table: &Table, data: &TableData) -> Result<()> {
        write_json(&self.config.table_path(&table.name), &RowsRef { table, data })
    }

    fn delete_rows(&mut self, table_name: &str) -> Result<()> {
        let path = self.config.table_path(table_name);
        match fs::remove_file(&path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(storage_error(&path, err)),
            _ => Ok(()),
        }
    }
}
