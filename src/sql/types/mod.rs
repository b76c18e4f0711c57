use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// Supported column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "int")]
    Integer,
    #[serde(rename = "str")]
    String,
    #[serde(rename = "bool")]
    Boolean,
}

impl DataType {
    /// Parses a type tag as written in `name:type` column declarations
    pub fn from_tag(tag: &str) -> Option<DataType> {
        Some(match tag {
            "int" => DataType::Integer,
            "str" => DataType::String,
            "bool" => DataType::Boolean,
            _ => return None,
        })
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            DataType::Integer => "int",
            DataType::String => "str",
            DataType::Boolean => "bool",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Runtime value of a column
///
/// Serialized untagged so that data files hold plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl Value {
    /// Returns the data type of the value
    pub fn datatype(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Integer(_) => DataType::Integer,
            Self::String(_) => DataType::String,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

/// Stored values of one record, keyed by column name (the ID column is the
/// record's key in [`TableData`], never a field)
pub type Record = BTreeMap<String, Value>;

/// All records of one table, keyed by primary key
pub type TableData = BTreeMap<i64, Record>;

/// Column equality filter (`where col = value`) or assignment list
/// (`set col = value`)
pub type Predicate = BTreeMap<String, Value>;

/// A result row: the ID value followed by the column values in schema order
pub type Row = Vec<Value>;

#[cfg(test)]
mod tests {
    use super::{DataType, Record, TableData, Value};
    use crate::error::Result;

    #[test]
    fn test_datatype_tags() {
        assert_eq!(DataType::from_tag("int"), Some(DataType::Integer));
        assert_eq!(DataType::from_tag("str"), Some(DataType::String));
        assert_eq!(DataType::from_tag("bool"), Some(DataType::Boolean));
        assert_eq!(DataType::from_tag("float"), None);
        assert_eq!(DataType::from_tag("Int"), None);
    }

    #[test]
    fn test_boolean_is_not_integer() {
        assert_eq!(Value::Boolean(true).datatype(), DataType::Boolean);
        assert_eq!(Value::Integer(1).datatype(), DataType::Integer);
        assert_ne!(Value::Boolean(true), Value::Integer(1));
    }

    #[test]
    fn test_table_data_json() -> Result<()> {
        let mut record = Record::new();
        record.insert("age".to_string(), Value::Integer(42));
        record.insert("name".to_string(), Value::String("x".to_string()));
        record.insert("active".to_string(), Value::Boolean(true));
        let mut data = TableData::new();
        data.insert(7, record);

        let json = serde_json::to_string(&data)?;
        assert_eq!(json, r#"{"7":{"active":true,"age":42,"name":"x"}}"#);

        let decoded: TableData = serde_json::from_str(&json)?;
        assert_eq!(decoded, data);
        Ok(())
    }

    #[test]
    fn test_float_is_rejected() {
        let decoded = serde_json::from_str::<TableData>(r#"{"1":{"price":1.5}}"#);
        assert!(decoded.is_err());
    }
}
