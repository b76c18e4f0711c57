use crate::{
    error::Result,
    sql::{
        schema::{Schema, Table},
        types::TableData,
    },
};

/// Abstract storage engine interface
///
/// Every call reads or writes a whole schema or a whole table. State that
/// was never saved loads as empty rather than failing.
pub trait Engine {
    fn load_schema(&mut self) -> Result<Schema>;
    fn save_schema(&mut self, schema: &Schema) -> Result<()>;
    fn load_rows(&mut self, table_name: &str) -> Result<TableData>;
    /// Overwrites the rows of `table`, fields laid out in its column order
    fn save_rows(&mut self, table: &Table, data: &TableData) -> Result<()>;
    /// Removes the table's rows; a table without saved rows is not an error
    fn delete_rows(&mut self, table_name: &str) -> Result<()>;
}
