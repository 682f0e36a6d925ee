//! Core domain logic for the staffbook employee store.
//! This crate is the single source of truth for import and storage invariants.

pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sheet;
pub mod stats;

pub use config::{AppConfig, ConfigError};
pub use error::ErrorKind;
pub use import::{AliasTable, Cell, FormatReport, ImportError, ImportNormalizer, RawTable};
pub use logging::{default_log_level, init_logging, init_stderr_logging};
pub use model::employee::{Employee, EmployeeField, EmployeeId, FieldValue, NewEmployee};
pub use repo::employee_repo::{
    EmployeeListQuery, EmployeeRepository, EmployeeSort, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::{EmployeeService, DEFAULT_PREVIEW_ROWS};
pub use service::report::{ActionReport, ExportReport, ImportReport};
pub use sheet::{read_table, write_employees, SheetError};
pub use stats::{department_breakdown, DepartmentSummary, EmployeeStatistics};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
