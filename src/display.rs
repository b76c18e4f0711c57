//! Text rendering of query results and the command reference

use crate::sql::types::{Row, Value};

/// Command reference printed on start-up and by `help`
pub const HELP: &str = "\
Data commands:
  insert into <table> values (<value1>, <value2>, ...)    add a record
  select from <table> where <column> = <value>            read matching records
  select from <table>                                     read all records
  update <table> set <column> = <value> where <column> = <value>
                                                          update matching records
  delete from <table> where <column> = <value>            delete matching records
  info <table>                                            describe a table

Table commands:
  create_table <table> <column1:type> <column2:type> ...  create a table (int, str, bool)
  drop_table <table>                                      delete a table and its records
  list_tables                                             list all tables

Other commands:
  help                                                    show this reference
  exit                                                    leave the program

Strings are quoted (\"text\" or 'text'), booleans are true/false.";

/// Renders rows as an ASCII table:
///
/// ```text
/// +----+-------+
/// | ID | name  |
/// +----+-------+
/// | 1  | Alice |
/// +----+-------+
/// ```
pub fn render_table(columns: &[String], rows: &[Row]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(render_value).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .fold(String::from("+"), |acc, w| acc + &"-".repeat(w + 2) + "+");
    let line = |values: &[String]| {
        widths
            .iter()
            .zip(values)
            .fold(String::from("|"), |acc, (w, v)| {
                acc + &format!(" {:<width$} |", v, width = *w)
            })
    };

    let mut out = vec![border.clone(), line(columns), border.clone()];
    if !cells.is_empty() {
        out.extend(cells.iter().map(|row| line(&row[..])));
        out.push(border);
    }
    out.join("\n")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        v => v.to_string(),
    }
}
