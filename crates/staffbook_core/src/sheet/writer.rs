//! Write the employee set to a spreadsheet file.

use super::{SheetError, SheetFormat, SheetResult};
use crate::model::employee::{number_to_text, Employee};
use log::{error, info};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::io;
use std::path::Path;
use std::time::Instant;

/// Export column order; matches the storage column names.
pub const EXPORT_COLUMNS: &[&str] = &[
    "id",
    "nom",
    "email",
    "telephone",
    "departement",
    "poste",
    "salaire",
];

const SHEET_NAME: &str = "employees";

/// Writes `employees` to `path` as `.xlsx` or `.csv`, replacing any existing file.
///
/// # Errors
/// - [`SheetError::PermissionDenied`] when the target cannot be opened for
///   writing (typically because it is open in a spreadsheet program).
/// - [`SheetError::UnsupportedFormat`] for extensions that cannot be written.
pub fn write_employees(path: impl AsRef<Path>, employees: &[Employee]) -> SheetResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let result = match SheetFormat::from_path(path) {
        Ok(SheetFormat::Xlsx) => write_xlsx(path, employees),
        Ok(SheetFormat::Csv) => write_csv(path, employees),
        Ok(SheetFormat::OtherWorkbook) => Err(SheetError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default()
                .to_ascii_lowercase(),
        }),
        Err(err) => Err(err),
    };

    match &result {
        Ok(()) => info!(
            "event=sheet_write module=sheet status=ok rows={} path={} duration_ms={}",
            employees.len(),
            path.display(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=sheet_write module=sheet status=error path={} error={}",
            path.display(),
            err
        ),
    }
    result
}

fn write_xlsx(path: &Path, employees: &[Employee]) -> SheetResult<()> {
    let xlsx_error = |err: XlsxError| match err {
        XlsxError::IoError(io_err) => io_error(path, io_err),
        other => SheetError::Write {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &header_format)
            .map_err(xlsx_error)?;
    }

    for (index, employee) in employees.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet
            .write_number(row, 0, employee.id as f64)
            .map_err(xlsx_error)?;
        worksheet
            .write_string(row, 1, &employee.nom)
            .map_err(xlsx_error)?;
        worksheet
            .write_string(row, 2, &employee.email)
            .map_err(xlsx_error)?;

        let optional = [&employee.telephone, &employee.departement, &employee.poste];
        for (offset, value) in optional.into_iter().enumerate() {
            // None stays an empty cell.
            if let Some(text) = value {
                worksheet
                    .write_string(row, 3 + offset as u16, text)
                    .map_err(xlsx_error)?;
            }
        }

        worksheet
            .write_number(row, 6, employee.salaire)
            .map_err(xlsx_error)?;
    }
    worksheet.autofit();

    workbook.save(path).map_err(xlsx_error)
}

fn write_csv(path: &Path, employees: &[Employee]) -> SheetResult<()> {
    let file = std::fs::File::create(path).map_err(|err| io_error(path, err))?;
    let csv_error = |err: csv::Error| match err.into_kind() {
        csv::ErrorKind::Io(io_err) => io_error(path, io_err),
        other => SheetError::Write {
            path: path.to_path_buf(),
            message: format!("{other:?}"),
        },
    };

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(EXPORT_COLUMNS).map_err(csv_error)?;
    for employee in employees {
        writer
            .write_record([
                employee.id.to_string(),
                employee.nom.clone(),
                employee.email.clone(),
                employee.telephone.clone().unwrap_or_default(),
                employee.departement.clone().unwrap_or_default(),
                employee.poste.clone().unwrap_or_default(),
                number_to_text(employee.salaire),
            ])
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|err| io_error(path, err))
}

fn io_error(path: &Path, err: io::Error) -> SheetError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        SheetError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        SheetError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
