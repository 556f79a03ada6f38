use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::error::{ConvertError, Result};
use crate::utils::{BYTE_ORDER_MARK, strip_bom, universal_lines};

/// a parsed delimited table: the title row plus every data row in source order.
/// every row holds exactly `titles.len()` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    titles: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// builds a table from already split fields, rejecting rows whose width
    /// differs from the title row. rows are numbered as source lines, the
    /// title row being line 1.
    pub fn new(titles: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != titles.len())
        {
            return Err(ConvertError::MalformedRow {
                line: index + 2,
                expected: titles.len(),
                found: row.len(),
            });
        }
        Ok(Self { titles, rows })
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.titles.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// values of one column across all rows, in row order.
    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows.iter().map(|row| row[index].as_str()).collect()
    }
}

/// reads the whole input as utf-8 text and parses it with `parse_table`.
pub fn read_table<R: Read>(mut reader: R, separator: &str) -> Result<Table> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_table(&text, separator)
}

/// parses delimited text into a `Table`.
///
/// the first line is the title row and every following line, blank or not,
/// is a data row. fields are split on the literal separator: no quoting, no
/// unescaping and no trimming, so a quoted field containing the separator is
/// split like any other. trailing empty fields are dropped.
pub fn parse_table(text: &str, separator: &str) -> Result<Table> {
    let splitter = FieldSplitter::new(separator)?;
    let mut lines = universal_lines(strip_bom(text));

    let (_, title_line) = lines.next().ok_or(ConvertError::EmptyInput)?;
    let titles = splitter.split(title_line)?;
    let expected = titles.len();

    let mut rows = Vec::new();
    for (line, content) in lines {
        let fields = splitter.split(content)?;
        if fields.len() != expected {
            return Err(ConvertError::MalformedRow {
                line,
                expected,
                found: fields.len(),
            });
        }
        rows.push(fields);
    }

    debug!(
        "parsed {} column(s) and {} data row(s)",
        titles.len(),
        rows.len()
    );
    Ok(Table { titles, rows })
}

/// splits a single line into fields. single-byte separators go through a csv
/// reader with quoting disabled; longer ones are split literally.
struct FieldSplitter<'a> {
    separator: &'a str,
    builder: Option<ReaderBuilder>,
}

impl<'a> FieldSplitter<'a> {
    fn new(separator: &'a str) -> Result<Self> {
        let builder = match separator.as_bytes() {
            [] => return Err(ConvertError::EmptySeparator),
            [byte] => {
                let mut builder = ReaderBuilder::new();
                builder
                    .has_headers(false)
                    .flexible(true)
                    .quoting(false)
                    .delimiter(*byte);
                Some(builder)
            }
            _ => None,
        };
        Ok(Self { separator, builder })
    }

    fn split(&self, line: &str) -> Result<Vec<String>> {
        let mut fields = match &self.builder {
            // the csv reader skips empty lines and strips a leading bom on its own
            Some(builder) if !line.is_empty() && !line.starts_with(BYTE_ORDER_MARK) => {
                let mut rdr = builder.from_reader(line.as_bytes());
                let mut record = StringRecord::new();
                rdr.read_record(&mut record)?;
                record.iter().map(str::to_string).collect()
            }
            _ => line.split(self.separator).map(str::to_string).collect(),
        };
        drop_trailing_empty(&mut fields);
        Ok(fields)
    }
}

// a line always keeps at least one field, so a blank line is a single empty value.
fn drop_trailing_empty(fields: &mut Vec<String>) {
    while fields.len() > 1 && fields.last().is_some_and(String::is_empty) {
        fields.pop();
    }
    if fields.is_empty() {
        fields.push(String::new());
    }
}
