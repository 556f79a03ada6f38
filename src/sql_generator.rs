use std::fmt;

use crate::error::{ConvertError, Result};
use crate::table_parser::Table;
use crate::type_inference::ColumnType;

const INDENT: &str = "    ";
const DATA_COMMENT: &str = "--Data";

/// rendering switches for `generate_sql`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// double any `'` inside text literals. off by default, in which case a
    /// value containing a quote yields invalid sql.
    pub escape_quotes: bool,
}

/// a finished sql script: one `create table` block followed by one insert per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScript {
    sql: String,
    insert_count: usize,
}

impl SqlScript {
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_string(self) -> String {
        self.sql
    }

    pub fn insert_count(&self) -> usize {
        self.insert_count
    }
}

impl fmt::Display for SqlScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// generates the `create table` block and the insert statements for `table`.
///
/// the first title is always the primary key. values are written verbatim:
/// text columns single-quoted, numeric columns bare, whatever the value holds.
/// `types` must hold exactly one entry per title.
pub fn generate_sql(
    table_name: &str,
    table: &Table,
    types: &[ColumnType],
    options: &EmitOptions,
) -> Result<SqlScript> {
    let titles = table.titles();
    if types.len() != titles.len() {
        return Err(ConvertError::ColumnTypeCount {
            expected: titles.len(),
            found: types.len(),
        });
    }
    let mut lines = Vec::with_capacity(titles.len() + table.row_count() + 6);

    lines.push(format!("--{table_name}"));
    lines.push(format!("CREATE TABLE {table_name} ("));
    lines.extend(
        titles
            .iter()
            .zip(types)
            .map(|(title, column_type)| format!("{INDENT}{title} {},", column_type.sql_type())),
    );
    // a table built without titles gets an empty key
    let primary_key = titles.first().map(String::as_str).unwrap_or_default();
    lines.push(format!("{INDENT}PRIMARY KEY ({primary_key})"));
    lines.push(");".to_string());
    lines.push(String::new());
    lines.push(DATA_COMMENT.to_string());

    for row in table.rows() {
        let values: Vec<String> = row
            .iter()
            .zip(types)
            .map(|(value, column_type)| render_literal(value, *column_type, options))
            .collect();
        lines.push(format!(
            "INSERT INTO {table_name} VALUES ({});",
            values.join(",")
        ));
    }

    Ok(SqlScript {
        sql: lines.join("\n"),
        insert_count: table.row_count(),
    })
}

fn render_literal(value: &str, column_type: ColumnType, options: &EmitOptions) -> String {
    if !column_type.is_quoted() {
        return value.to_string();
    }
    if options.escape_quotes {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        format!("'{value}'")
    }
}
