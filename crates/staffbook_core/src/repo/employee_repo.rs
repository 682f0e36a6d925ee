//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide bulk append, browse, single-field update and delete over the
//!   canonical `employees` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Bulk append never deduplicates; every row gets a fresh id.
//! - Updates address columns only through the closed [`EmployeeField`] set.
//! - Read paths reject invalid persisted state instead of masking it; legacy
//!   placeholders are rewritten once by the schema migrations, not on read.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::employee::{
    number_to_text, parse_amount, scrub_optional, Employee, EmployeeField, EmployeeId,
    FieldValue, NewEmployee,
};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

const EMPLOYEE_TABLE: &str = "employees";
const EMPLOYEE_COLUMNS: &[&str] = &[
    "id",
    "nom",
    "email",
    "telephone",
    "departement",
    "poste",
    "salaire",
];

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    nom,
    email,
    telephone,
    departement,
    poste,
    salaire
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("employee not found: {0}")]
    NotFound(EmployeeId),
    #[error("invalid value for `{field}`: {message}")]
    InvalidValue {
        field: EmployeeField,
        message: String,
    },
    #[error("invalid persisted employee data: {0}")]
    InvalidData(String),
    #[error("connection schema version {actual_version} is older than required {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Sort key for [`EmployeeListQuery`]; ties keep storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeSort {
    #[default]
    Id,
    Nom,
    Email,
    Salaire,
}

impl EmployeeSort {
    fn order_by(self) -> &'static str {
        match self {
            Self::Id => "id ASC",
            Self::Nom => "nom ASC, id ASC",
            Self::Email => "email ASC, id ASC",
            Self::Salaire => "salaire ASC, id ASC",
        }
    }
}

impl FromStr for EmployeeSort {
    type Err = UnknownSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "nom" => Ok(Self::Nom),
            "email" => Ok(Self::Email),
            "salaire" => Ok(Self::Salaire),
            _ => Err(UnknownSortError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key `{0}`; expected id|nom|email|salaire")]
pub struct UnknownSortError(pub String);

/// Browse/search options for listing employees.
///
/// The default query returns every record in storage order.
#[derive(Debug, Clone, Default)]
pub struct EmployeeListQuery {
    /// Case-insensitive substring matched against every text field.
    pub text: Option<String>,
    /// Exact department filter.
    pub departement: Option<String>,
    /// Exact position filter.
    pub poste: Option<String>,
    pub sort: EmployeeSort,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl EmployeeListQuery {
    /// Query for the first `limit` records.
    pub fn first(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Free-text search query without paging.
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Repository interface for the employee record store.
pub trait EmployeeRepository {
    /// Appends all rows in one transaction and returns how many were written.
    fn insert_many(&self, rows: &[NewEmployee]) -> RepoResult<usize>;
    fn get(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>>;
    fn count(&self) -> RepoResult<usize>;
    /// Sets one field; fails with [`RepoError::NotFound`] for an unknown id.
    fn update_field(&self, id: EmployeeId, field: EmployeeField, value: &FieldValue)
        -> RepoResult<()>;
    /// Removes one record; returns `false` when no record had that id.
    fn delete(&self, id: EmployeeId) -> RepoResult<bool>;
    /// Removes every record and returns how many were removed.
    fn clear_all(&self) -> RepoResult<usize>;

    /// Every record in storage order; empty when the store is empty.
    fn get_all(&self) -> RepoResult<Vec<Employee>> {
        self.list(&EmployeeListQuery::default())
    }
}

/// SQLite-backed employee repository borrowing the process-wide connection.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when migrations were not applied.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the schema does not match the canonical layout.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [EMPLOYEE_TABLE],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Err(RepoError::MissingRequiredTable(EMPLOYEE_TABLE));
        }

        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
        let present = stmt
            .query_map([EMPLOYEE_TABLE], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(column) = EMPLOYEE_COLUMNS
            .iter()
            .copied()
            .find(|column| !present.iter().any(|name| name == column))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: EMPLOYEE_TABLE,
                column,
            });
        }

        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn insert_many(&self, rows: &[NewEmployee]) -> RepoResult<usize> {
        let started_at = Instant::now();
        let result = (|| -> RepoResult<usize> {
            let tx = self.conn.unchecked_transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO employees (
                        nom,
                        email,
                        telephone,
                        departement,
                        poste,
                        salaire
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                )?;
                for row in rows {
                    stmt.execute(params![
                        row.nom.as_str(),
                        row.email.as_str(),
                        row.telephone.as_deref(),
                        row.departement.as_deref(),
                        row.poste.as_deref(),
                        row.salaire,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(rows.len())
        })();

        match &result {
            Ok(count) => info!(
                "event=employee_insert_many module=repo status=ok rows={} duration_ms={}",
                count,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=employee_insert_many module=repo status=error rows={} error={}",
                rows.len(),
                err
            ),
        }
        result
    }

    fn get(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn list(&self, query: &EmployeeListQuery) -> RepoResult<Vec<Employee>> {
        let mut sql = format!("{EMPLOYEE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(text) = query.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            sql.push_str(
                " AND (nom LIKE ?1 ESCAPE '\\'
                    OR email LIKE ?1 ESCAPE '\\'
                    OR telephone LIKE ?1 ESCAPE '\\'
                    OR departement LIKE ?1 ESCAPE '\\'
                    OR poste LIKE ?1 ESCAPE '\\')",
            );
            bind_values.push(Value::Text(format!("%{}%", escape_like(text))));
        }

        if let Some(departement) = &query.departement {
            bind_values.push(Value::Text(departement.clone()));
            sql.push_str(&format!(" AND departement = ?{}", bind_values.len()));
        }

        if let Some(poste) = &query.poste {
            bind_values.push(Value::Text(poste.clone()));
            sql.push_str(&format!(" AND poste = ?{}", bind_values.len()));
        }

        // Order clause comes from the closed EmployeeSort set.
        sql.push_str(" ORDER BY ");
        sql.push_str(query.sort.order_by());

        if let Some(limit) = query.limit {
            bind_values.push(Value::Integer(i64::from(limit)));
            sql.push_str(&format!(" LIMIT ?{}", bind_values.len()));
            if query.offset > 0 {
                bind_values.push(Value::Integer(i64::from(query.offset)));
                sql.push_str(&format!(" OFFSET ?{}", bind_values.len()));
            }
        } else if query.offset > 0 {
            bind_values.push(Value::Integer(i64::from(query.offset)));
            sql.push_str(&format!(" LIMIT -1 OFFSET ?{}", bind_values.len()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn count(&self) -> RepoResult<usize> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get::<_, i64>(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative employee count {count}")))
    }

    fn update_field(
        &self,
        id: EmployeeId,
        field: EmployeeField,
        value: &FieldValue,
    ) -> RepoResult<()> {
        let bound = field_value_to_db(field, value)?;

        // Column name comes from the closed EmployeeField set, never from input.
        let changed = self.conn.execute(
            &format!("UPDATE employees SET {} = ?1 WHERE id = ?2;", field.column()),
            params![bound, id],
        )?;

        if changed == 0 {
            info!(
                "event=employee_update module=repo status=not_found id={} field={}",
                id, field
            );
            return Err(RepoError::NotFound(id));
        }

        info!(
            "event=employee_update module=repo status=ok id={} field={}",
            id, field
        );
        Ok(())
    }

    fn delete(&self, id: EmployeeId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        info!(
            "event=employee_delete module=repo status=ok id={} removed={}",
            id,
            changed > 0
        );
        Ok(changed > 0)
    }

    fn clear_all(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM employees;", [])?;
        info!(
            "event=employee_clear module=repo status=ok removed={}",
            removed
        );
        Ok(removed)
    }
}

fn field_value_to_db(field: EmployeeField, value: &FieldValue) -> RepoResult<Value> {
    let invalid = |message: &str| RepoError::InvalidValue {
        field,
        message: message.to_string(),
    };

    match field {
        EmployeeField::Salaire => match value {
            FieldValue::Number(number) if number.is_finite() => Ok(Value::Real(*number)),
            FieldValue::Number(_) => Err(invalid("salary must be a finite number")),
            FieldValue::Text(text) => parse_amount(text)
                .map(Value::Real)
                .ok_or_else(|| invalid("salary must be numeric")),
            FieldValue::Null => Err(invalid("field is required")),
        },
        EmployeeField::Nom | EmployeeField::Email => match value {
            FieldValue::Text(text) => Ok(Value::Text(text.clone())),
            FieldValue::Number(number) => Ok(Value::Text(number_to_text(*number))),
            FieldValue::Null => Err(invalid("field is required")),
        },
        EmployeeField::Telephone | EmployeeField::Departement | EmployeeField::Poste => {
            let text = match value {
                FieldValue::Text(text) => scrub_optional(Some(text.clone())),
                FieldValue::Number(number) => Some(number_to_text(*number)),
                FieldValue::Null => None,
            };
            Ok(text.map_or(Value::Null, Value::Text))
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    let nom = required_column::<String>(row, id, "nom")?;
    let email = required_column::<String>(row, id, "email")?;
    let salaire = required_column::<f64>(row, id, "salaire")?;

    Ok(Employee {
        id,
        nom,
        email,
        telephone: row.get("telephone")?,
        departement: row.get("departement")?,
        poste: row.get("poste")?,
        salaire,
    })
}

fn required_column<T: rusqlite::types::FromSql>(
    row: &Row<'_>,
    id: EmployeeId,
    column: &str,
) -> RepoResult<T> {
    row.get::<_, Option<T>>(column)?.ok_or_else(|| {
        RepoError::InvalidData(format!("employees.{column} is NULL for id {id}"))
    })
}
