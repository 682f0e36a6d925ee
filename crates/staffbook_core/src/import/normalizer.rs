//! Format detection and normalization of raw tables into candidate employees.
//!
//! # Responsibility
//! - Classify a raw table against the known source layouts.
//! - Produce canonical [`NewEmployee`] rows or fail before producing any.
//!
//! # Invariants
//! - A missing required column fails the whole table, never a single row.
//! - Sentinel scrubbing applies to optional fields only.
//! - No per-row validation of required values: blank cells are kept as blank
//!   text (and a blank or non-numeric salary as `0.0`), never rejected. Every
//!   salary stored as `0.0` this way is listed in [`Normalized::notes`].

use super::aliases::{AliasTable, FORMAT_PARTIAL, FORMAT_UNKNOWN, FORMAT_VARIANTS};
use super::table::{Cell, RawTable};
use crate::error::ErrorKind;
use crate::model::employee::{parse_amount, scrub_optional, EmployeeField, NewEmployee};
use crate::repo::employee_repo::RepoError;
use crate::sheet::SheetError;
use log::warn;
use serde::Serialize;
use thiserror::Error;

/// Import pipeline error.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("empty file")]
    EmptyInput,
    #[error("missing required column: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::MissingColumns(_) => ErrorKind::MissingColumn,
            Self::Sheet(err) => err.kind(),
            Self::Repo(err) => err.kind(),
        }
    }
}

/// Result of [`ImportNormalizer::validate_format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatReport {
    /// Whether the table can be imported.
    pub ok: bool,
    /// `employees-1`, `employees-2`, `partial` or `unknown`.
    pub format_label: String,
    pub issues: Vec<String>,
    /// Set when `ok` is false.
    pub error_kind: Option<ErrorKind>,
}

impl FormatReport {
    /// Report for a table that could not be read or validated at all.
    pub fn failure(err: &ImportError) -> Self {
        Self {
            ok: false,
            format_label: FORMAT_UNKNOWN.to_string(),
            issues: vec![err.to_string()],
            error_kind: Some(err.kind()),
        }
    }
}

/// Rows produced by [`ImportNormalizer::normalize_detailed`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub rows: Vec<NewEmployee>,
    /// One line per coerced cell, naming its 1-based sheet row.
    pub notes: Vec<String>,
}

/// Stateless transform from raw tables to canonical candidate rows.
#[derive(Debug, Clone, Default)]
pub struct ImportNormalizer {
    aliases: AliasTable,
}

impl ImportNormalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Checks required columns and detects the source layout.
    ///
    /// A table with every required column is importable even when it matches
    /// no known layout; it is then labelled `partial` with an issue.
    pub fn validate_format(&self, table: &RawTable) -> FormatReport {
        let missing = self.missing_required(table);
        if !missing.is_empty() {
            return FormatReport {
                ok: false,
                format_label: FORMAT_UNKNOWN.to_string(),
                issues: missing
                    .iter()
                    .map(|label| format!("missing required column: {label}"))
                    .collect(),
                error_kind: Some(ErrorKind::MissingColumn),
            };
        }

        let detected = FORMAT_VARIANTS.iter().find(|variant| {
            variant
                .columns
                .iter()
                .all(|column| table.has_column(column))
        });

        match detected {
            Some(variant) => FormatReport {
                ok: true,
                format_label: variant.label.to_string(),
                issues: Vec::new(),
                error_kind: None,
            },
            None => FormatReport {
                ok: true,
                format_label: FORMAT_PARTIAL.to_string(),
                issues: vec!["some optional columns are missing".to_string()],
                error_kind: None,
            },
        }
    }

    /// Maps every row onto the canonical schema.
    ///
    /// # Errors
    /// - [`ImportError::MissingColumns`] naming every absent required column;
    ///   checked before any row is mapped.
    pub fn normalize(&self, table: &RawTable) -> Result<Vec<NewEmployee>, ImportError> {
        self.normalize_detailed(table).map(|normalized| normalized.rows)
    }

    /// Same as [`Self::normalize`], also reporting coerced salary cells.
    pub fn normalize_detailed(&self, table: &RawTable) -> Result<Normalized, ImportError> {
        let column = |field| self.aliases.resolve(field, &table.headers);
        let (Some(nom_col), Some(email_col), Some(salaire_col)) = (
            column(EmployeeField::Nom),
            column(EmployeeField::Email),
            column(EmployeeField::Salaire),
        ) else {
            return Err(ImportError::MissingColumns(self.missing_required(table)));
        };
        let telephone_col = column(EmployeeField::Telephone);
        let departement_col = column(EmployeeField::Departement);
        let poste_col = column(EmployeeField::Poste);

        let optional = |row: usize, col: Option<usize>| {
            col.and_then(|col| scrub_optional(table.cell(row, col).to_text()))
        };

        let mut normalized = Normalized::default();
        for row in 0..table.row_count() {
            let salaire = salary(table.cell(row, salaire_col)).unwrap_or_else(|reason| {
                // Sheet rows are 1-based and the header takes row 1.
                let sheet_row = row + 2;
                warn!(
                    "event=import_normalize module=import status=warn row={} reason=salary_coerced",
                    sheet_row
                );
                normalized
                    .notes
                    .push(format!("row {sheet_row}: {reason}, stored as 0"));
                0.0
            });
            normalized.rows.push(NewEmployee {
                nom: required_text(table.cell(row, nom_col)),
                email: required_text(table.cell(row, email_col)),
                telephone: optional(row, telephone_col),
                departement: optional(row, departement_col),
                poste: optional(row, poste_col),
                salaire,
            });
        }

        Ok(normalized)
    }

    fn missing_required(&self, table: &RawTable) -> Vec<String> {
        EmployeeField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .filter(|field| self.aliases.resolve(*field, &table.headers).is_none())
            .map(|field| self.aliases.primary_label(field))
            .collect()
    }
}

fn required_text(cell: &Cell) -> String {
    cell.to_text().unwrap_or_default()
}

fn salary(cell: &Cell) -> Result<f64, String> {
    match cell {
        Cell::Number(number) => Ok(*number),
        Cell::Text(text) => {
            parse_amount(text).ok_or_else(|| format!("salary `{text}` is not a number"))
        }
        Cell::Bool(value) => Err(format!("salary `{value}` is not a number")),
        Cell::Empty => Err("salary is blank".to_string()),
    }
}
