use std::time::Instant;

use crate::{
    config::Config,
    error::Result,
    sql::{
        cache::ResultCache,
        executor::{Executor, ResultSet},
        parser::{ast::Statement, parse},
        schema::Schema,
        types::TableData,
    },
    storage::engine::Engine as StorageEngine,
};

/// Command session over a storage engine
///
/// Each command is one cycle: load the schema (and the rows of the table it
/// touches), run the executor on the loaded copy, save whatever it changed.
/// Nothing but the select cache is kept between commands.
pub struct Session<E: StorageEngine> {
    engine: E,
    cache: Option<ResultCache>,
}

impl<E: StorageEngine> Session<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cache: Some(ResultCache::new()),
        }
    }

    /// Creates a session honouring the config's cache switch
    pub fn with_config(engine: E, config: &Config) -> Self {
        Self {
            engine,
            cache: config.cache_enabled.then(ResultCache::new),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn cache(&self) -> Option<&ResultCache> {
        self.cache.as_ref()
    }

    /// Executes one line of command text, `None` for a blank line
    pub fn execute(&mut self, input: &str) -> Result<Option<ResultSet>> {
        let start = Instant::now();
        let result = match parse(input)? {
            Some(stmt) => Some(self.execute_statement(stmt)?),
            None => None,
        };
        log::debug!("executed {:?} in {:?}", input.trim(), start.elapsed());
        Ok(result)
    }

    /// Executes a parsed statement
    pub fn execute_statement(&mut self, stmt: Statement) -> Result<ResultSet> {
        // Serve repeated selects from the cache
        let select_key = match &stmt {
            Statement::Select {
                table_name,
                predicate,
            } => Some((table_name.clone(), predicate.clone())),
            _ => None,
        };
        if let (Some(cache), Some((table_name, predicate))) = (&self.cache, &select_key) {
            if let Some(result) = cache.get(table_name, predicate) {
                return Ok(result.clone());
            }
        }

        let mut schema = self.engine.load_schema()?;
        let mut data = match stmt.data_table() {
            Some(table_name) if schema.contains(table_name) => self.engine.load_rows(table_name)?,
            _ => TableData::new(),
        };

        let result = <dyn Executor>::build(stmt)?.execute(&mut schema, &mut data)?;
        if result.is_mutation() {
            self.persist(&result, &schema, &data)?;
        } else if let (Some(cache), Some((table_name, predicate))) = (&mut self.cache, select_key) {
            cache.put(&table_name, predicate, result.clone());
        }
        Ok(result)
    }

    /// Saves the state changed by `result` and forgets cached selects of
    /// the affected table
    fn persist(&mut self, result: &ResultSet, schema: &Schema, data: &TableData) -> Result<()> {
        let table_name = match result {
            ResultSet::CreateTable { table_name, .. } => {
                self.engine.save_schema(schema)?;
                // A fresh table never inherits rows left behind on disk
                let table = schema.must_get_table(table_name)?;
                self.engine.save_rows(table, &TableData::new())?;
                table_name
            }
            ResultSet::DropTable { table_name } => {
                self.engine.save_schema(schema)?;
                self.engine.delete_rows(table_name)?;
                table_name
            }
            ResultSet::Insert { table_name, .. }
            | ResultSet::Update { table_name, .. }
            | ResultSet::Delete { table_name, .. } => {
                let table = schema.must_get_table(table_name)?;
                self.engine.save_rows(table, data)?;
                table_name
            }
            _ => return Ok(()),
        };
        if let Some(cache) = &mut self.cache {
            cache.invalidate(table_name);
        }
        Ok(())
    }
}
