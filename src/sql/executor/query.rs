use std::iter;

use crate::{
    error::{Error, Result},
    sql::{
        executor::{check_predicate, Executor, ResultSet},
        schema::{Schema, Table, ID_COLUMN},
        types::{Predicate, Record, Row, TableData, Value},
    },
};

/// Whether a record satisfies every `column = value` entry of the predicate.
/// The ID column is compared against the record's key.
pub fn matches(id: i64, record: &Record, predicate: &Predicate) -> bool {
    predicate.iter().all(|(col_name, value)| {
        if col_name == ID_COLUMN {
            *value == Value::Integer(id)
        } else {
            record.get(col_name) == Some(value)
        }
    })
}

/// Lays a record out in column order, key first
fn make_row(table: &Table, id: i64, record: &Record) -> Result<Row> {
    let values = table.data_columns().map(|col| {
        record.get(&col.name).cloned().ok_or_else(|| {
            Error::Storage(format!(
                "record {} of table {} has no value for column {}",
                id, table.name, col.name
            ))
        })
    });
    iter::once(Ok(Value::Integer(id))).chain(values).collect()
}

/// SELECT executor
pub struct Select {
    table_name: String,
    predicate: Option<Predicate>,
}

impl Select {
    pub fn new(table_name: String, predicate: Option<Predicate>) -> Box<Self> {
        Box::new(Self {
            table_name,
            predicate,
        })
    }
}

impl Executor for Select {
    fn execute(self: Box<Self>, schema: &mut Schema, data: &mut TableData) -> Result<ResultSet> {
        let table = schema.must_get_table(&self.table_name)?;
        let predicate = self.predicate.unwrap_or_default();
        check_predicate(table, &predicate)?;

        let rows = data
            .iter()
            .filter(|(id, record)| matches(**id, record, &predicate))
            .map(|(id, record)| make_row(table, *id, record))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResultSet::Scan {
            columns: table.column_names(),
            rows,
            table_name: self.table_name,
        })
    }
}
