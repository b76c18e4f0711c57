use crate::sql::types::{Predicate, Value};

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `create_table <name> <col:type> ...`
    CreateTable {
        name: String,
        /// Raw `name:type` declarations, checked when the table is created
        columns: Vec<String>,
    },
    /// `drop_table <name>`
    DropTable { name: String },
    /// `list_tables`
    ListTables,
    /// `insert into <name> values (v1, v2, ...)`
    Insert {
        table_name: String,
        values: Vec<Value>,
    },
    /// `select from <name> [where <col> = <value>]`
    Select {
        table_name: String,
        predicate: Option<Predicate>,
    },
    /// `update <name> set <col> = <value> where <col> = <value>`
    Update {
        table_name: String,
        set: Predicate,
        predicate: Predicate,
    },
    /// `delete from <name> where <col> = <value>`
    Delete {
        table_name: String,
        predicate: Predicate,
    },
    /// `info <name>`
    Info { table_name: String },
    Help,
    Exit,
    /// The first word did not name a command
    Unknown(String),
}

impl Statement {
    /// Returns the table whose records the statement reads or writes
    pub fn data_table(&self) -> Option<&str> {
        match self {
            Statement::Insert { table_name, .. }
            | Statement::Select { table_name, .. }
            | Statement::Update { table_name, .. }
            | Statement::Delete { table_name, .. }
            | Statement::Info { table_name } => Some(table_name),
            _ => None,
        }
    }
}

/// Command keywords, matched case-sensitively
pub mod command {
    pub const CREATE_TABLE: &str = "create_table";
    pub const DROP_TABLE: &str = "drop_table";
    pub const LIST_TABLES: &str = "list_tables";
    pub const INSERT: &str = "insert";
    pub const SELECT: &str = "select";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const INFO: &str = "info";
    pub const HELP: &str = "help";
    pub const EXIT: &str = "exit";
}

/// Keywords used inside commands
pub mod keyword {
    pub const INTO: &str = "into";
    pub const VALUES: &str = "values";
    pub const FROM: &str = "from";
    pub const WHERE: &str = "where";
    pub const SET: &str = "set";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
}
