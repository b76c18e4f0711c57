use std::fmt;

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
    error::{Error, Result, ValidationError},
    sql::types::DataType,
};

/// Name of the primary key column present in every table
pub const ID_COLUMN: &str = "ID";
/// Key given to the first record of a table
pub const ID_INITIAL_VALUE: i64 = 1;

/// Column schema definition
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            datatype,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.name == ID_COLUMN
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.datatype)
    }
}

/// Table schema definition
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// The ID column always comes first
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates a table holding only the ID column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![Column::new(ID_COLUMN, DataType::Integer)],
        }
    }

    /// Validates table schema
    pub fn validate(&self) -> Result<()> {
        match self.columns.first() {
            Some(c) if c.is_primary_key() && c.datatype == DataType::Integer => {}
            _ => {
                return Err(Error::Storage(format!(
                    "table {} must start with column {}:int",
                    self.name, ID_COLUMN
                )))
            }
        }

        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::Storage(format!(
                    "duplicate column {} in table {}",
                    column.name, self.name
                )));
            }
        }

        Ok(())
    }

    pub fn get_column(&self, col_name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == col_name)
    }

    /// Returns the column, or an error naming the table if it doesn't exist
    pub fn must_get_column(&self, col_name: &str) -> Result<&Column> {
        self.get_column(col_name).ok_or_else(|| {
            ValidationError::ColumnNotFound {
                table: self.name.clone(),
                column: col_name.to_string(),
            }
            .into()
        })
    }

    /// Columns other than ID, in declaration order
    pub fn data_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_primary_key())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Registry of all tables, in creation order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.get_table(table_name).is_some()
    }

    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == table_name)
    }

    /// Returns table info, returns error if table doesn't exist
    pub fn must_get_table(&self, table_name: &str) -> Result<&Table> {
        self.get_table(table_name)
            .ok_or_else(|| ValidationError::TableNotFound(table_name.to_string()).into())
    }

    pub fn create_table(&mut self, table: Table) -> Result<()> {
        if self.contains(&table.name) {
            return Err(ValidationError::TableExists(table.name).into());
        }
        table.validate()?;
        self.tables.push(table);
        Ok(())
    }

    pub fn drop_table(&mut self, table_name: &str) -> Result<Table> {
        let pos = self
            .tables
            .iter()
            .position(|t| t.name == table_name)
            .ok_or_else(|| ValidationError::TableNotFound(table_name.to_string()))?;
        Ok(self.tables.remove(pos))
    }
}

// On disk the schema is a JSON object of table name -> {column -> type},
// written and read in declaration order.

struct ColumnsRef<'a>(&'a [Column]);

impl Serialize for ColumnsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for column in self.0 {
            map.serialize_entry(&column.name, &column.datatype)?;
        }
        map.end()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for table in &self.tables {
            map.serialize_entry(&table.name, &ColumnsRef(&table.columns))?;
        }
        map.end()
    }
}

struct Columns(Vec<Column>);

impl<'de> Deserialize<'de> for Columns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ColumnsVisitor;

        impl<'de> Visitor<'de> for ColumnsVisitor {
            type Value = Columns;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column name to type")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Columns, A::Error> {
                let mut columns = Vec::new();
                while let Some((name, datatype)) = access.next_entry::<String, DataType>()? {
                    columns.push(Column { name, datatype });
                }
                Ok(Columns(columns))
            }
        }

        deserializer.deserialize_map(ColumnsVisitor)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of table name to columns")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Schema, A::Error> {
                let mut schema = Schema::new();
                while let Some((name, Columns(columns))) = access.next_entry::<String, Columns>()? {
                    schema
                        .create_table(Table { name, columns })
                        .map_err(de::Error::custom)?;
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, Schema, Table};
    use crate::{
        error::{Error, Result, ValidationError},
        sql::types::DataType,
    };

    fn users() -> Table {
        let mut table = Table::new("users");
        table.columns.push(Column::new("name", DataType::String));
        table.columns.push(Column::new("age", DataType::Integer));
        table.columns.push(Column::new("active", DataType::Boolean));
        table
    }

    #[test]
    fn test_schema_json_keeps_order() -> Result<()> {
        let mut schema = Schema::new();
        schema.create_table(users())?;
        schema.create_table(Table::new("empty"))?;

        let json = serde_json::to_string(&schema)?;
        assert_eq!(
            json,
            r#"{"users":{"ID":"int","name":"str","age":"int","active":"bool"},"empty":{"ID":"int"}}"#
        );

        let decoded: Schema = serde_json::from_str(&json)?;
        assert_eq!(decoded, schema);
        let names: Vec<_> = decoded.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["users", "empty"]);
        Ok(())
    }

    #[test]
    fn test_schema_json_rejects_missing_id() {
        let decoded = serde_json::from_str::<Schema>(r#"{"t":{"name":"str","ID":"int"}}"#);
        assert!(decoded.is_err());

        let decoded = serde_json::from_str::<Schema>(r#"{"t":{"ID":"str"}}"#);
        assert!(decoded.is_err());

        let decoded = serde_json::from_str::<Schema>(r#"{"t":{"ID":"int","a":"float"}}"#);
        assert!(decoded.is_err());
    }

    #[test]
    fn test_table_lookup() -> Result<()> {
        let mut schema = Schema::new();
        schema.create_table(users())?;

        let table = schema.must_get_table("users")?;
        assert_eq!(table.data_columns().count(), 3);
        assert_eq!(table.must_get_column("age")?.datatype, DataType::Integer);
        assert_eq!(
            table.must_get_column("Age"),
            Err(Error::Validation(ValidationError::ColumnNotFound {
                table: "users".to_string(),
                column: "Age".to_string(),
            }))
        );

        assert_eq!(
            schema.create_table(Table::new("users")),
            Err(Error::Validation(ValidationError::TableExists("users".to_string())))
        );
        schema.drop_table("users")?;
        assert!(schema.is_empty());
        assert_eq!(
            schema.drop_table("users").map(|_| ()),
            Err(Error::Validation(ValidationError::TableNotFound("users".to_string())))
        );
        Ok(())
    }
}
