use std::collections::HashMap;

use crate::{
    error::Result,
    sql::{
        schema::{Schema, Table},
        types::TableData,
    },
    storage::engine::Engine,
};

/// In-memory storage engine
#[derive(Debug, Default)]
pub struct MemoryEngine {
    schema: Schema,
    tables: HashMap<String, TableData>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Engine for MemoryEngine {
    fn load_schema(&mut self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    fn save_schema(&mut self, schema: &Schema) -> Result<()> {
        self.schema = schema.clone();
        Ok(())
    }

    fn load_rows(&mut self, table_name: &str) -> Result<TableData> {
        Ok(self.tables.get(table_name).cloned().unwrap_or_default())
    }

    fn save_rows(&mut self, table: &Table, data: &TableData) -> Result<()> {
        self.tables.insert(table.name.clone(), data.clone());
        Ok(())
    }

    fn delete_rows(&mut self, table_name: &str) -> Result<()> {
        self.tables.remove(table_name);
        Ok(())
    }
}
