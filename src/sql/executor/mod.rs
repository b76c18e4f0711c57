use std::fmt::Display;

use crate::{
    display::{render_table, HELP},
    error::{Error, Result, ValidationError},
    sql::{
        executor::{
            mutation::{Delete, Insert, Update},
            query::Select,
            schema::{CreateTable, DropTable, Info, ListTables},
        },
        parser::ast::Statement,
        schema::{Column, Schema, Table},
        types::{Predicate, Row, TableData, Value},
    },
};

mod mutation;
mod query;
mod schema;

/// Table operation executor
///
/// Executors only touch `schema` and `data` after every check has passed,
/// so an `Err` always leaves both exactly as they were.
pub trait Executor {
    fn execute(self: Box<Self>, schema: &mut Schema, data: &mut TableData) -> Result<ResultSet>;
}

impl dyn Executor {
    /// Builds an executor from a parsed statement
    pub fn build(stmt: Statement) -> Result<Box<dyn Executor>> {
        let executor: Box<dyn Executor> = match stmt {
            Statement::CreateTable { name, columns } => CreateTable::new(name, columns),
            Statement::DropTable { name } => DropTable::new(name),
            Statement::ListTables => ListTables::new(),
            Statement::Info { table_name } => Info::new(table_name),
            Statement::Insert { table_name, values } => Insert::new(table_name, values),
            Statement::Select {
                table_name,
                predicate,
            } => Select::new(table_name, predicate),
            Statement::Update {
                table_name,
                set,
                predicate,
            } => Update::new(table_name, set, predicate),
            Statement::Delete {
                table_name,
                predicate,
            } => Delete::new(table_name, predicate),
            Statement::Help => Control::new(ResultSet::Help),
            Statement::Exit => Control::new(ResultSet::Exit),
            Statement::Unknown(command) => return Err(Error::UnknownCommand(command)),
        };
        Ok(executor)
    }
}

/// `help` and `exit` don't touch any table
struct Control {
    result: ResultSet,
}

impl Control {
    fn new(result: ResultSet) -> Box<Self> {
        Box::new(Self { result })
    }
}

impl Executor for Control {
    fn execute(self: Box<Self>, _: &mut Schema, _: &mut TableData) -> Result<ResultSet> {
        Ok(self.result)
    }
}

/// Execution result set
#[derive(Debug, Clone, PartialEq)]
pub enum ResultSet {
    CreateTable {
        table_name: String,
        columns: Vec<Column>,
    },
    DropTable {
        table_name: String,
    },
    ListTables {
        tables: Vec<String>,
    },
    Insert {
        table_name: String,
        id: i64,
    },
    Scan {
        table_name: String,
        columns: Vec<String>,
        rows: Vec<Row>,
    },
    Update {
        table_name: String,
        ids: Vec<i64>,
    },
    Delete {
        table_name: String,
        ids: Vec<i64>,
    },
    Info {
        table_name: String,
        columns: Vec<Column>,
        count: usize,
    },
    Help,
    Exit,
}

impl ResultSet {
    /// Whether the executor changed the schema or the table data
    pub fn is_mutation(&self) -> bool {
        match self {
            ResultSet::CreateTable { .. } | ResultSet::DropTable { .. } | ResultSet::Insert { .. } => true,
            ResultSet::Update { ids, .. } | ResultSet::Delete { ids, .. } => !ids.is_empty(),
            _ => false,
        }
    }
}

fn join_columns(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for ResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultSet::CreateTable {
                table_name,
                columns,
            } => write!(
                f,
                "Table \"{}\" created with columns: {}",
                table_name,
                join_columns(columns)
            ),
            ResultSet::DropTable { table_name } => write!(f, "Table \"{}\" dropped.", table_name),
            ResultSet::ListTables { tables } if tables.is_empty() => f.write_str("No tables."),
            ResultSet::ListTables { tables } => {
                let lines: Vec<_> = tables.iter().map(|t| format!("- {}", t)).collect();
                f.write_str(&lines.join("\n"))
            }
            ResultSet::Insert { table_name, id } => write!(
                f,
                "Record with ID={} inserted into table \"{}\".",
                id, table_name
            ),
            ResultSet::Scan { columns, rows, .. } => {
                writeln!(f, "{}", render_table(columns, rows))?;
                write!(f, "{} row(s)", rows.len())
            }
            ResultSet::Update { table_name, ids } | ResultSet::Delete { table_name, ids }
                if ids.is_empty() =>
            {
                write!(f, "No records in table \"{}\" matched.", table_name)
            }
            ResultSet::Update { table_name, ids } => {
                let lines: Vec<_> = ids
                    .iter()
                    .map(|id| format!("Record with ID={} updated in table \"{}\".", id, table_name))
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            ResultSet::Delete { table_name, ids } => {
                let lines: Vec<_> = ids
                    .iter()
                    .map(|id| format!("Record with ID={} deleted from table \"{}\".", id, table_name))
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            ResultSet::Info {
                table_name,
                columns,
                count,
            } => write!(
                f,
                "Table: {}\nColumns: {}\nRecords: {}",
                table_name,
                join_columns(columns),
                count
            ),
            ResultSet::Help => f.write_str(HELP),
            ResultSet::Exit => f.write_str("Bye!"),
        }
    }
}

/// Checks a value against the declared type of its column.
/// `position` is the 1-based place of the value in an insert.
fn check_value(column: &Column, value: &Value, position: Option<usize>) -> Result<()> {
    if value.datatype() != column.datatype {
        return Err(ValidationError::TypeMismatch {
            column: column.name.clone(),
            position,
            expected: column.datatype,
            found: value.datatype(),
        }
        .into());
    }
    Ok(())
}

/// Every column of a predicate or set clause must exist and every value must
/// have the column's type
fn check_predicate(table: &Table, predicate: &Predicate) -> Result<()> {
    for (col_name, value) in predicate {
        check_value(table.must_get_column(col_name)?, value, None)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Executor, ResultSet};
    use crate::{
        error::{Error, Result},
        sql::{parser::parse, schema::Schema, types::TableData},
    };

    /// Parses and runs one command against in-memory state
    pub(super) fn run(schema: &mut Schema, data: &mut TableData, input: &str) -> Result<ResultSet> {
        let stmt = parse(input)?.expect("empty command");
        <dyn Executor>::build(stmt)?.execute(schema, data)
    }

    #[test]
    fn test_control_statements() -> Result<()> {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        assert_eq!(run(&mut schema, &mut data, "help")?, ResultSet::Help);
        assert_eq!(run(&mut schema, &mut data, "exit")?, ResultSet::Exit);
        assert_eq!(
            run(&mut schema, &mut data, "vacuum"),
            Err(Error::UnknownCommand("vacuum".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_is_mutation() {
        let update = |ids: Vec<i64>| ResultSet::Update {
            table_name: "t".to_string(),
            ids,
        };
        assert!(update(vec![1]).is_mutation());
        assert!(!update(vec![]).is_mutation());
        assert!(ResultSet::DropTable {
            table_name: "t".to_string()
        }
        .is_mutation());
        assert!(!ResultSet::ListTables { tables: vec![] }.is_mutation());
        assert!(!ResultSet::Help.is_mutation());
    }
}
