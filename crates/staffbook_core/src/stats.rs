//! Summary statistics over the employee set.
//!
//! # Invariants
//! - Monetary aggregates are rounded to 2 decimals.
//! - An empty record set yields all-zero statistics, never `None`; callers
//!   treat zero totals as "no data".

use crate::model::employee::Employee;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Dashboard statistics over all stored employees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EmployeeStatistics {
    pub total_employees: usize,
    pub mean_salary: f64,
    pub min_salary: f64,
    pub max_salary: f64,
    /// Distinct non-null departments.
    pub department_count: usize,
    /// Distinct non-null positions.
    pub position_count: usize,
}

impl EmployeeStatistics {
    pub fn from_records(records: &[Employee]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total = records.len();
        let sum: f64 = records.iter().map(|record| record.salaire).sum();
        let min = records
            .iter()
            .map(|record| record.salaire)
            .fold(f64::INFINITY, f64::min);
        let max = records
            .iter()
            .map(|record| record.salaire)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            total_employees: total,
            mean_salary: round_money(sum / total as f64),
            min_salary: round_money(min),
            max_salary: round_money(max),
            department_count: distinct(records.iter().map(|r| r.departement.as_deref())),
            position_count: distinct(records.iter().map(|r| r.poste.as_deref())),
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_employees > 0
    }
}

/// Headcount and mean salary of one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub departement: String,
    pub employees: usize,
    pub mean_salary: f64,
}

/// Per-department breakdown, highest mean salary first.
///
/// Employees without a department are left out.
pub fn department_breakdown(records: &[Employee]) -> Vec<DepartmentSummary> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for record in records {
        if let Some(departement) = record.departement.as_deref() {
            let entry = groups.entry(departement).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += record.salaire;
        }
    }

    let mut summaries: Vec<DepartmentSummary> = groups
        .into_iter()
        .map(|(departement, (employees, total))| DepartmentSummary {
            departement: departement.to_string(),
            employees,
            mean_salary: round_money(total / employees as f64),
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.mean_salary
            .total_cmp(&a.mean_salary)
            .then_with(|| a.departement.cmp(&b.departement))
    });
    summaries
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> usize {
    values.flatten().collect::<BTreeSet<_>>().len()
}

fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{department_breakdown, EmployeeStatistics};
    use crate::model::employee::{Employee, NewEmployee};

    fn employee(id: i64, salaire: f64, departement: Option<&str>, poste: Option<&str>) -> Employee {
        let mut candidate = NewEmployee::new(format!("E{id}"), format!("e{id}@x.com"), salaire);
        candidate.departement = departement.map(str::to_string);
        candidate.poste = poste.map(str::to_string);
        candidate.into_employee(id)
    }

    #[test]
    fn empty_set_is_all_zero() {
        let stats = EmployeeStatistics::from_records(&[]);
        assert_eq!(stats, EmployeeStatistics::default());
        assert_eq!(stats.mean_salary, 0.0);
        assert_eq!(stats.min_salary, 0.0);
        assert_eq!(stats.max_salary, 0.0);
        assert!(!stats.has_data());
    }

    #[test]
    fn aggregates_round_and_count_distinct_non_null() {
        let records = vec![
            employee(1, 100.0, Some("RH"), Some("Analyste")),
            employee(2, 200.0, Some("RH"), None),
            employee(3, 100.005, None, Some("Analyste")),
            employee(4, 333.333, Some("IT"), Some("Dev")),
        ];

        let stats = EmployeeStatistics::from_records(&records);
        assert_eq!(stats.total_employees, 4);
        assert_eq!(stats.mean_salary, 183.33);
        assert_eq!(stats.min_salary, 100.0);
        assert_eq!(stats.max_salary, 333.33);
        assert_eq!(stats.department_count, 2);
        assert_eq!(stats.position_count, 2);
        assert!(stats.has_data());
    }

    #[test]
    fn breakdown_sorts_by_mean_salary_and_skips_missing_departments() {
        let records = vec![
            employee(1, 100.0, Some("RH"), None),
            employee(2, 300.0, Some("RH"), None),
            employee(3, 500.0, Some("IT"), None),
            employee(4, 900.0, None, None),
        ];

        let breakdown = department_breakdown(&records);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].departement, "IT");
        assert_eq!(breakdown[0].employees, 1);
        assert_eq!(breakdown[1].departement, "RH");
        assert_eq!(breakdown[1].mean_salary, 200.0);
    }
}
