//! Declarative column alias table and known source layouts.
//!
//! Each canonical field maps to an ordered list of accepted source labels.
//! The normalizer walks this table once per field, so a new source layout
//! only needs new labels here, not new control flow.

use crate::model::employee::EmployeeField;

/// Label returned when required columns are missing.
pub const FORMAT_UNKNOWN: &str = "unknown";
/// Label returned when required columns exist but no known variant matches.
pub const FORMAT_PARTIAL: &str = "partial";

/// A known source layout, identified by its optional columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatVariant {
    pub label: &'static str,
    pub columns: &'static [&'static str],
}

/// Known layouts, checked in order.
pub const FORMAT_VARIANTS: &[FormatVariant] = &[
    FormatVariant {
        label: "employees-1",
        columns: &["Téléphone", "Département"],
    },
    FormatVariant {
        label: "employees-2",
        columns: &["Phone", "Poste"],
    },
];

const BUILTIN_ALIASES: &[(EmployeeField, &[&str])] = &[
    (EmployeeField::Nom, &["Nom"]),
    (EmployeeField::Email, &["Email"]),
    (EmployeeField::Salaire, &["Salaire"]),
    (EmployeeField::Telephone, &["Téléphone", "Phone"]),
    (EmployeeField::Departement, &["Département"]),
    (EmployeeField::Poste, &["Poste"]),
];

/// Canonical field → ordered source column labels (exact, case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(EmployeeField, Vec<String>)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_ALIASES
                .iter()
                .map(|(field, labels)| {
                    (*field, labels.iter().map(|label| label.to_string()).collect())
                })
                .collect(),
        }
    }
}

impl AliasTable {
    /// Accepted labels for `field`, highest priority first.
    pub fn labels(&self, field: EmployeeField) -> &[String] {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, labels)| labels.as_slice())
            .unwrap_or(&[])
    }

    /// Label used in messages about `field` (its first alias).
    pub fn primary_label(&self, field: EmployeeField) -> String {
        self.labels(field)
            .first()
            .cloned()
            .unwrap_or_else(|| field.column().to_string())
    }

    /// Appends `label` after the existing labels of `field`.
    ///
    /// Duplicate labels are ignored so the lookup order stays stable.
    pub fn add_alias(&mut self, field: EmployeeField, label: impl Into<String>) {
        let label = label.into();
        match self.entries.iter_mut().find(|(candidate, _)| *candidate == field) {
            Some((_, labels)) => {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            None => self.entries.push((field, vec![label])),
        }
    }

    /// Column index of the highest-priority label present in `headers`.
    pub fn resolve(&self, field: EmployeeField, headers: &[String]) -> Option<usize> {
        self.labels(field)
            .iter()
            .find_map(|label| headers.iter().position(|header| header == label))
    }
}

#[cfg(test)]
mod tests {
    use super::AliasTable;
    use crate::model::employee::EmployeeField;

    fn headers(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn phone_prefers_french_label_over_english() {
        let aliases = AliasTable::default();
        let both = headers(&["Phone", "Nom", "Téléphone"]);
        assert_eq!(aliases.resolve(EmployeeField::Telephone, &both), Some(2));

        let english = headers(&["Nom", "Phone"]);
        assert_eq!(aliases.resolve(EmployeeField::Telephone, &english), Some(1));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let aliases = AliasTable::default();
        let lower = headers(&["nom", "NOM", "Nom "]);
        assert_eq!(aliases.resolve(EmployeeField::Nom, &lower), None);
    }

    #[test]
    fn extra_aliases_extend_lookup_after_builtins() {
        let mut aliases = AliasTable::default();
        aliases.add_alias(EmployeeField::Telephone, "Tel");
        aliases.add_alias(EmployeeField::Telephone, "Tel");

        assert_eq!(
            aliases.labels(EmployeeField::Telephone),
            &["Téléphone".to_string(), "Phone".to_string(), "Tel".to_string()]
        );
        assert_eq!(
            aliases.resolve(EmployeeField::Telephone, &headers(&["Tel"])),
            Some(0)
        );
    }

    #[test]
    fn primary_label_is_first_alias() {
        let aliases = AliasTable::default();
        assert_eq!(aliases.primary_label(EmployeeField::Salaire), "Salaire");
    }
}
