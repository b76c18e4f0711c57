use crate::{
    error::{Result, ValidationError},
    sql::{
        executor::{Executor, ResultSet},
        schema::{Column, Schema, Table, ID_COLUMN},
        types::{DataType, TableData},
    },
};

/// CREATE_TABLE executor
pub struct CreateTable {
    name: String,
    columns: Vec<String>,
}

impl CreateTable {
    pub fn new(name: String, columns: Vec<String>) -> Box<Self> {
        Box::new(Self { name, columns })
    }

    // Table names double as data file names
    fn validate_name(&self) -> Result<()> {
        if self.name.is_empty() || self.name.contains(['/', '\\']) {
            return Err(ValidationError::InvalidTableName(self.name.clone()).into());
        }
        Ok(())
    }

    /// Turns the `name:type` declarations into a table, all or nothing
    fn build_table(&self) -> Result<Table> {
        let mut table = Table::new(self.name.clone());
        for spec in &self.columns {
            let invalid = || ValidationError::InvalidColumnSpec(spec.clone());

            let (name, tag) = spec.split_once(':').unwrap_or((spec.as_str(), ""));
            let (name, tag) = (name.trim(), tag.trim());
            let datatype = DataType::from_tag(tag).ok_or_else(invalid)?;

            // ID is always present
            if name == ID_COLUMN {
                continue;
            }
            if name.is_empty() || table.get_column(name).is_some() {
                return Err(invalid().into());
            }
            table.columns.push(Column::new(name, datatype));
        }
        Ok(table)
    }
}

impl Executor for CreateTable {
    fn execute(self: Box<Self>, schema: &mut Schema, _: &mut TableData) -> Result<ResultSet> {
        self.validate_name()?;
        if schema.contains(&self.name) {
            return Err(ValidationError::TableExists(self.name).into());
        }
        let table = self.build_table()?;
        let columns = table.columns.clone();
        schema.create_table(table)?;
        log::info!("created table {}", self.name);

        Ok(ResultSet::CreateTable {
            table_name: self.name,
            columns,
        })
    }
}

/// DROP_TABLE executor
pub struct DropTable {
    name: String,
}

impl DropTable {
    pub fn new(name: String) -> Box<Self> {
        Box::new(Self { name })
    }
}

impl Executor for DropTable {
    fn execute(self: Box<Self>, schema: &mut Schema, _: &mut TableData) -> Result<ResultSet> {
        schema.drop_table(&self.name)?;
        log::info!("dropped table {}", self.name);
        Ok(ResultSet::DropTable {
            table_name: self.name,
        })
    }
}

/// LIST_TABLES executor
pub struct ListTables;

impl ListTables {
    pub fn new() -> Box<Self> {
        Box::new(Self)
    }
}

impl Executor for ListTables {
    fn execute(self: Box<Self>, schema: &mut Schema, _: &mut TableData) -> Result<ResultSet> {
        Ok(ResultSet::ListTables {
            tables: schema.tables().iter().map(|t| t.name.clone()).collect(),
        })
    }
}

/// INFO executor
pub struct Info {
    table_name: String,
}

impl Info {
    pub fn new(table_name: String) -> Box<Self> {
        Box::new(Self { table_name })
    }
}

impl Executor for Info {
    fn execute(self: Box<Self>, schema: &mut Schema, data: &mut TableData) -> Result<ResultSet> {
        let table = schema.must_get_table(&self.table_name)?;
        Ok(ResultSet::Info {
            columns: table.columns.clone(),
            count: data.len(),
            table_name: self.table_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, Result, ValidationError},
        sql::{
            executor::{tests::run, ResultSet},
            schema::{Column, Schema},
            types::{DataType, TableData},
        },
    };

    fn invalid_spec(spec: &str) -> Result<ResultSet> {
        Err(Error::Validation(ValidationError::InvalidColumnSpec(spec.to_string())))
    }

    #[test]
    fn test_create_table() -> Result<()> {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        let result = run(&mut schema, &mut data, "create_table t c1:int c2:str")?;
        let expected = vec![
            Column::new("ID", DataType::Integer),
            Column::new("c1", DataType::Integer),
            Column::new("c2", DataType::String),
        ];
        assert_eq!(
            result,
            ResultSet::CreateTable {
                table_name: "t".to_string(),
                columns: expected.clone(),
            }
        );
        assert_eq!(schema.must_get_table("t")?.columns, expected);

        // A second create leaves the schema untouched
        let before = schema.clone();
        assert_eq!(
            run(&mut schema, &mut data, "create_table t other:bool"),
            Err(Error::Validation(ValidationError::TableExists("t".to_string())))
        );
        assert_eq!(schema, before);
        Ok(())
    }

    #[test]
    fn test_create_table_is_all_or_nothing() -> Result<()> {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        assert_eq!(
            run(&mut schema, &mut data, "create_table t a:int b:float c:str"),
            invalid_spec("b:float")
        );
        assert_eq!(
            run(&mut schema, &mut data, "create_table t a:int b"),
            invalid_spec("b")
        );
        assert_eq!(
            run(&mut schema, &mut data, "create_table t a:int a:str"),
            invalid_spec("a:str")
        );
        assert_eq!(
            run(&mut schema, &mut data, "create_table t :int"),
            invalid_spec(":int")
        );
        assert!(schema.is_empty());
        Ok(())
    }

    #[test]
    fn test_create_table_skips_id() -> Result<()> {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        run(&mut schema, &mut data, "create_table t ID:int name:str ID:str")?;
        assert_eq!(
            schema.must_get_table("t")?.columns,
            vec![
                Column::new("ID", DataType::Integer),
                Column::new("name", DataType::String),
            ]
        );

        // The type of an explicit ID column is still checked
        assert_eq!(
            run(&mut schema, &mut data, "create_table u ID:uuid"),
            invalid_spec("ID:uuid")
        );
        Ok(())
    }

    #[test]
    fn test_create_table_invalid_name() {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        for input in ["create_table \"\" a:int", "create_table ../etc a:int"] {
            assert!(matches!(
                run(&mut schema, &mut data, input),
                Err(Error::Validation(ValidationError::InvalidTableName(_)))
            ));
        }
        assert!(schema.is_empty());
    }

    #[test]
    fn test_drop_and_list_tables() -> Result<()> {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        assert_eq!(
            run(&mut schema, &mut data, "list_tables")?,
            ResultSet::ListTables { tables: vec![] }
        );
        run(&mut schema, &mut data, "create_table b")?;
        run(&mut schema, &mut data, "create_table a")?;
        assert_eq!(
            run(&mut schema, &mut data, "list_tables")?,
            ResultSet::ListTables {
                tables: vec!["b".to_string(), "a".to_string()]
            }
        );

        let before = schema.clone();
        assert_eq!(
            run(&mut schema, &mut data, "drop_table missing"),
            Err(Error::Validation(ValidationError::TableNotFound(
                "missing".to_string()
            )))
        );
        assert_eq!(schema, before);

        assert_eq!(
            run(&mut schema, &mut data, "drop_table b")?,
            ResultSet::DropTable {
                table_name: "b".to_string()
            }
        );
        assert_eq!(schema.tables().len(), 1);
        Ok(())
    }

    #[test]
    fn test_info() -> Result<()> {
        let mut schema = Schema::new();
        let mut data = TableData::new();

        run(&mut schema, &mut data, "create_table users name:str active:bool")?;
        run(&mut schema, &mut data, "insert into users values (\"a\", true)")?;
        run(&mut schema, &mut data, "insert into users values (\"b\", false)")?;

        let result = run(&mut schema, &mut data, "info users")?;
        assert_eq!(
            result.to_string(),
            "Table: users\nColumns: ID:int, name:str, active:bool\nRecords: 2"
        );
        assert_eq!(
            run(&mut schema, &mut data, "info ghosts"),
            Err(Error::Validation(ValidationError::TableNotFound(
                "ghosts".to_string()
            )))
        );
        Ok(())
    }
}
