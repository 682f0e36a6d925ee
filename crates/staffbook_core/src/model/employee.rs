//! Employee domain model.
//!
//! # Responsibility
//! - Define persisted and candidate employee records.
//! - Define the closed set of mutable fields accepted by updates.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes or gets reused.
//! - Optional text never holds `""`, whitespace-only text, or `None`/`none`/`NONE`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned identifier (SQLite `INTEGER PRIMARY KEY AUTOINCREMENT`).
pub type EmployeeId = i64;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid amount regex")
});
static DECIMAL_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+,\d{1,2}$").expect("valid decimal comma regex"));
static GROUPED_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d{1,3}(,\d{3})+$").expect("valid grouping regex"));

/// Placeholder strings scrubbed to `None` in optional fields.
pub const OPTIONAL_SENTINELS: &[&str] = &["", "None", "none", "NONE"];

/// Persisted employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub nom: String,
    pub email: String,
    pub telephone: Option<String>,
    pub departement: Option<String>,
    pub poste: Option<String>,
    pub salaire: f64,
}

/// Candidate record produced by import normalization, before the store
/// assigns an id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    pub nom: String,
    pub email: String,
    pub telephone: Option<String>,
    pub departement: Option<String>,
    pub poste: Option<String>,
    pub salaire: f64,
}

impl NewEmployee {
    /// Creates a candidate with required fields set and optional fields empty.
    pub fn new(nom: impl Into<String>, email: impl Into<String>, salaire: f64) -> Self {
        Self {
            nom: nom.into(),
            email: email.into(),
            salaire,
            ..Self::default()
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            nom: self.nom,
            email: self.email,
            telephone: self.telephone,
            departement: self.departement,
            poste: self.poste,
            salaire: self.salaire,
        }
    }
}

/// Mutable employee fields. `id` is deliberately not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeField {
    Nom,
    Email,
    Telephone,
    Departement,
    Poste,
    Salaire,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 6] = [
        Self::Nom,
        Self::Email,
        Self::Telephone,
        Self::Departement,
        Self::Poste,
        Self::Salaire,
    ];

    /// Storage column backing this field.
    pub fn column(self) -> &'static str {
        match self {
            Self::Nom => "nom",
            Self::Email => "email",
            Self::Telephone => "telephone",
            Self::Departement => "departement",
            Self::Poste => "poste",
            Self::Salaire => "salaire",
        }
    }

    /// Whether a persisted record must always carry a value for this field.
    pub fn is_required(self) -> bool {
        matches!(self, Self::Nom | Self::Email | Self::Salaire)
    }
}

impl Display for EmployeeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employee field `{0}`; expected nom|email|telephone|departement|poste|salaire")]
pub struct UnknownFieldError(pub String);

impl FromStr for EmployeeField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.column() == normalized)
            .ok_or_else(|| UnknownFieldError(value.to_string()))
    }
}

/// New value for a single-field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Interprets command-line style input: numeric text becomes `Number`,
    /// everything else stays `Text`.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Interprets user input for `field`. Only salary input is read as a
    /// number; every text field keeps the input verbatim.
    pub fn for_field(field: EmployeeField, raw: &str) -> Self {
        match field {
            EmployeeField::Salaire => Self::parse_lossy(raw),
            _ => Self::Text(raw.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// Returns whether `value` is blank or one of [`OPTIONAL_SENTINELS`].
pub fn is_sentinel(value: &str) -> bool {
    value.trim().is_empty() || OPTIONAL_SENTINELS.contains(&value)
}

/// Scrubs blank/placeholder text to `None`; other text is kept verbatim.
pub fn scrub_optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !is_sentinel(text))
}

/// Renders a numeric cell as text; whole numbers drop the fractional part so
/// a phone number stored as `77123456.0` reads back as `77123456`.
pub fn number_to_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parses a monetary amount written as text.
///
/// Spaces (including non-breaking ones) are thousands separators. A comma is
/// a decimal separator only when followed by one or two digits (`1500,50`);
/// otherwise it must group thousands (`500,000`, `1,250.75`). Exponent
/// notation is accepted. Returns `None` for anything else.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    let normalized = if DECIMAL_COMMA_RE.is_match(&compact) {
        compact.replacen(',', ".", 1)
    } else if GROUPED_COMMA_RE.is_match(&compact) {
        compact.replace(',', "")
    } else if let Some((whole, fraction)) = compact.split_once('.') {
        if whole.contains(',') && !GROUPED_COMMA_RE.is_match(whole) {
            return None;
        }
        format!("{}.{fraction}", whole.replace(',', ""))
    } else {
        compact
    };
    if !AMOUNT_RE.is_match(&normalized) {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}
