//! Employee use-case service.
//!
//! # Responsibility
//! - Provide import, export, browse, edit and statistics entry points.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - An import writes every normalized row or none of them.
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::import::{FormatReport, ImportError, ImportNormalizer, RawTable};
use crate::model::employee::{Employee, EmployeeField, EmployeeId, FieldValue};
use crate::repo::employee_repo::{EmployeeListQuery, EmployeeRepository, RepoResult};
use crate::service::report::{ActionReport, ExportReport, ImportReport};
use crate::sheet::{read_table, write_employees};
use crate::stats::{department_breakdown, DepartmentSummary, EmployeeStatistics};
use log::{error, info};
use std::path::Path;
use std::time::Instant;

/// Default number of rows returned by [`EmployeeService::preview`].
pub const DEFAULT_PREVIEW_ROWS: u32 = 5;

/// Use-case service over an employee repository.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
    normalizer: ImportNormalizer,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service with the built-in column aliases.
    pub fn new(repo: R) -> Self {
        Self::with_normalizer(repo, ImportNormalizer::default())
    }

    pub fn with_normalizer(repo: R, normalizer: ImportNormalizer) -> Self {
        Self { repo, normalizer }
    }

    /// Reads a spreadsheet file and imports it.
    ///
    /// Unreadable, missing and corrupt files are reported as
    /// [`ErrorKind::FileAccess`](crate::error::ErrorKind::FileAccess).
    pub fn import_file(&self, path: impl AsRef<Path>) -> ImportReport {
        let path = path.as_ref();
        match read_table(path) {
            Ok(table) => self.import_table(&table),
            Err(err) => {
                let err = ImportError::from(err);
                error!(
                    "event=import module=service status=error error_kind={:?} error={}",
                    err.kind(),
                    err
                );
                ImportReport::failure(&err, None)
            }
        }
    }

    /// Validates, normalizes and bulk-appends a raw table.
    ///
    /// # Contract
    /// - Empty input (no header or no data row) fails with `empty file`
    ///   before the store is touched.
    /// - A missing required column fails with zero rows written.
    /// - On success `imported` equals the store's appended row count.
    pub fn import_table(&self, table: &RawTable) -> ImportReport {
        let started_at = Instant::now();
        info!(
            "event=import module=service status=start rows={}",
            table.row_count()
        );

        if table.is_empty() {
            let err = ImportError::EmptyInput;
            error!(
                "event=import module=service status=error error_kind={:?}",
                err.kind()
            );
            return ImportReport::failure(&err, None);
        }

        let format = self.normalizer.validate_format(table);
        let result = self
            .normalizer
            .normalize_detailed(table)
            .and_then(|normalized| {
                self.repo
                    .insert_many(&normalized.rows)
                    .map(|imported| (imported, normalized.notes))
                    .map_err(ImportError::from)
            });

        match result {
            Ok((imported, notes)) => {
                info!(
                    "event=import module=service status=ok format={} imported={} duration_ms={}",
                    format.format_label,
                    imported,
                    started_at.elapsed().as_millis()
                );
                ImportReport::success(imported, format.format_label, notes)
            }
            Err(err) => {
                error!(
                    "event=import module=service status=error format={} error_kind={:?} error={}",
                    format.format_label,
                    err.kind(),
                    err
                );
                ImportReport::failure(&err, Some(format.format_label))
            }
        }
    }

    /// Detects the layout of a spreadsheet file without importing it.
    ///
    /// A file that cannot be read yields `ok = false` with the reason as the
    /// only issue.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> FormatReport {
        match read_table(path) {
            Ok(table) => self.normalizer.validate_format(&table),
            Err(err) => {
                let err = ImportError::from(err);
                error!(
                    "event=validate module=service status=error error_kind={:?} error={}",
                    err.kind(),
                    err
                );
                FormatReport::failure(&err)
            }
        }
    }

    /// Detects the layout of an already-read table.
    pub fn validate_table(&self, table: &RawTable) -> FormatReport {
        self.normalizer.validate_format(table)
    }

    /// Writes every stored employee to `path` (`.xlsx` or `.csv`).
    ///
    /// An empty store is reported as a failure and no file is written.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> ExportReport {
        let path = path.as_ref();
        let employees = match self.repo.get_all() {
            Ok(employees) => employees,
            Err(err) => {
                error!("event=export module=service status=error error={}", err);
                return ExportReport::from_repo_error(&err);
            }
        };

        if employees.is_empty() {
            info!("event=export module=service status=skipped reason=empty_store");
            return ExportReport::nothing_to_export();
        }

        match write_employees(path, &employees) {
            Ok(()) => {
                info!(
                    "event=export module=service status=ok rows={}",
                    employees.len()
                );
                ExportReport::success(employees.len(), path.to_path_buf())
            }
            Err(err) => ExportReport::from_sheet_error(&err),
        }
    }

    /// Sets one field of one employee.
    pub fn update(&self, id: EmployeeId, field: EmployeeField, value: FieldValue) -> ActionReport {
        match self.repo.update_field(id, field, &value) {
            Ok(()) => ActionReport::success(format!("employee {id}: {field} updated"), 1),
            Err(err) => ActionReport::failure(&err),
        }
    }

    /// Deletes one employee; deleting an unknown id changes nothing.
    pub fn delete(&self, id: EmployeeId) -> ActionReport {
        match self.repo.delete(id) {
            Ok(true) => ActionReport::success(format!("employee {id} deleted"), 1),
            Ok(false) => {
                ActionReport::success(format!("employee {id} not found, nothing deleted"), 0)
            }
            Err(err) => ActionReport::failure(&err),
        }
    }

    /// Removes every employee. Irreversible.
    pub fn clear_all(&self) -> ActionReport {
        match self.repo.clear_all() {
            Ok(removed) => ActionReport::success(format!("{removed} employees removed"), removed),
            Err(err) => ActionReport::failure(&err),
        }
    }

    pub fn get_all(&self) -> RepoResult<Vec<Employee>> {
        self.repo.get_all()
    }

    pub fn get(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.get(id)
    }

    pub fn count(&self) -> RepoResult<usize> {
        self.repo.count()
    }

    /// First `max_rows` employees in storage order.
    pub fn preview(&self, max_rows: u32) -> RepoResult<Vec<Employee>> {
        self.repo.list(&EmployeeListQuery::first(max_rows))
    }

    /// Browses or searches employees.
    pub fn search(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        self.repo.list(query)
    }

    /// Dashboard statistics; all zero when the store is empty.
    pub fn statistics(&self) -> RepoResult<EmployeeStatistics> {
        Ok(EmployeeStatistics::from_records(&self.repo.get_all()?))
    }

    /// Per-department headcount and mean salary.
    pub fn department_breakdown(&self) -> RepoResult<Vec<DepartmentSummary>> {
        Ok(department_breakdown(&self.repo.get_all()?))
    }
}
