use crate::{
    error::{Error, Result, ValidationError},
    sql::{
        executor::{check_predicate, check_value, query::matches, Executor, ResultSet},
        schema::{Schema, ID_COLUMN, ID_INITIAL_VALUE},
        types::{Predicate, Record, TableData, Value},
    },
};

/// INSERT executor
pub struct Insert {
    table_name: String,
    values: Vec<Value>,
}

impl Insert {
    pub fn new(table_name: String, values: Vec<Value>) -> Box<Self> {
        Box::new(Self { table_name, values })
    }
}

/// Key for the next record: one past the largest key, so keys below the
/// current maximum are never handed out again
fn next_id(table_name: &str, data: &TableData) -> Result<i64> {
    match data.last_key_value() {
        None => Ok(ID_INITIAL_VALUE),
        Some((id, _)) => id.checked_add(1).ok_or_else(|| {
            Error::Storage(format!("table {} has no key left after ID={}", table_name, id))
        }),
    }
}

impl Executor for Insert {
    fn execute(self: Box<Self>, schema: &mut Schema, data: &mut TableData) -> Result<ResultSet> {
        let table = schema.must_get_table(&self.table_name)?;
        let columns: Vec<_> = table.data_columns().collect();
        if self.values.len() != columns.len() {
            return Err(ValidationError::ValueCount {
                expected: columns.len(),
                found: self.values.len(),
            }
            .into());
        }

        // Values line up with the non-ID columns by position
        let mut record = Record::new();
        for (i, (value, column)) in self.values.into_iter().zip(columns).enumerate() {
            check_value(column, &value, Some(i + 1))?;
            record.insert(column.name.clone(), value);
        }

        let id = next_id(&self.table_name, data)?;
        data.insert(id, record);
        log::debug!("inserted record {} into {}", id, self.table_name);

        Ok(ResultSet::Insert {
            table_name: self.table_name,
            id,
        })
    }
}

/// UPDATE executor
pub struct Update {
    table_name: String,
    set: Predicate,
    predicate: Predicate,
}

impl Update {
    pub fn new(table_name: String, set: Predicate, predicate: Predicate) -> Box<Self> {
        Box::new(Self {
            table_name,
            set,
            predicate,
        })
    }
}

impl Executor for Update {
    fn execute(self: Box<Self>, schema: &mut Schema, data: &mut TableData) -> Result<ResultSet> {
        let table = schema.must_get_table(&self.table_name)?;
        if self.set.contains_key(ID_COLUMN) {
            return Err(ValidationError::ImmutableColumn(ID_COLUMN.to_string()).into());
        }
        check_predicate(table, &self.set)?;
        check_predicate(table, &self.predicate)?;

        let mut ids = Vec::new();
        for (id, record) in data.iter_mut() {
            if matches(*id, record, &self.predicate) {
                record.extend(self.set.clone());
                ids.push(*id);
            }
        }
        log::debug!("updated {} record(s) in {}", ids.len(), self.table_name);

        Ok(ResultSet::Update {
            table_name: self.table_name,
            ids,
        })
    }
}

/// DELETE executor
pub struct Delete {
    table_name: String,
    predicate: Predicate,
}

impl Delete {
    pub fn new(table_name: String, predicate: Predicate) -> Box<Self> {
        Box::new(Self {
            table_name,
            predicate,
        })
    }
}

impl Executor for Delete {
    fn execute(self: Box<Self>, schema: &mut Schema, data: &mut TableData) -> Result<ResultSet> {
        let table = schema.must_get_table(&self.table_name)?;
        check_predicate(table, &self.predicate)?;

        let mut ids = Vec::new();
        data.retain(|id, record| {
            let hit = matches(*id, record, &self.predicate);
            if hit {
                ids.push(*id);
            }
            !hit
        });
        log::debug!("deleted {} record(s) from {}", ids.len(), self.table_name);

        Ok(ResultSet::Delete {
            table_name: self.table_name,
            ids,
        })
    }
}
