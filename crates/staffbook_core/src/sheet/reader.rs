//! Read the first sheet of a workbook or a CSV file into a raw table.

use super::{SheetError, SheetFormat, SheetResult};
use crate::import::table::{Cell, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Reads `path` into a [`RawTable`]; the first row is the header.
///
/// Rows where every cell is empty are skipped. A file with a header but no
/// data rows yields an empty table rather than an error.
pub fn read_table(path: impl AsRef<Path>) -> SheetResult<RawTable> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=sheet_read module=sheet status=start path={}",
        path.display()
    );

    let result = if path.is_file() {
        SheetFormat::from_path(path).and_then(|format| match format {
            SheetFormat::Csv => read_csv(path),
            SheetFormat::Xlsx | SheetFormat::OtherWorkbook => read_workbook(path),
        })
    } else {
        Err(SheetError::NotFound {
            path: path.to_path_buf(),
        })
    };

    match &result {
        Ok(table) => info!(
            "event=sheet_read module=sheet status=ok columns={} rows={} duration_ms={}",
            table.headers.len(),
            table.row_count(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=sheet_read module=sheet status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn read_workbook(path: &Path) -> SheetResult<RawTable> {
    let unreadable = |message: String| SheetError::Unreadable {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|err| unreadable(err.to_string()))?;
    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(RawTable::default());
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| unreadable(format!("sheet `{sheet_name}`: {err}")))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(RawTable::default());
    };

    let headers = header.iter().map(header_label).collect();
    let rows = rows
        .map(|row| row.iter().map(data_to_cell).collect::<Vec<_>>())
        .filter(|cells| !cells.iter().all(Cell::is_empty))
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn read_csv(path: &Path) -> SheetResult<RawTable> {
    let unreadable = |message: String| SheetError::Unreadable {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|err| unreadable(err.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(&content))
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| unreadable(err.to_string()))?
        .iter()
        .map(|label| label.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| unreadable(err.to_string()))?;
        let cells: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        if !cells.iter().all(Cell::is_empty) {
            rows.push(cells);
        }
    }

    Ok(RawTable::new(headers, rows))
}

/// Spreadsheet tools in French locales export CSV with `;` separators.
fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or_default();
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn header_label(data: &Data) -> String {
    match data_to_cell(data) {
        Cell::Text(text) => text,
        other => other.to_text().unwrap_or_default(),
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(number) => Cell::Number(*number),
        Data::Int(number) => Cell::Number(*number as f64),
        Data::Bool(value) => Cell::Bool(*value),
        other => Cell::Text(other.to_string()),
    }
}
