//! Human and JSON rendering of core results.

use comfy_table::Table;
use serde::Serialize;
use staffbook_core::{DepartmentSummary, Employee, EmployeeStatistics};

pub struct Output {
    pub json: bool,
}

impl Output {
    /// Prints a report envelope; `message` is the human rendering.
    pub fn report<T: Serialize>(&self, report: &T, message: &str) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{message}");
        }
        Ok(())
    }

    pub fn employees(&self, employees: &[Employee]) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(employees)?);
            return Ok(());
        }
        if employees.is_empty() {
            println!("no employees");
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec![
            "id",
            "nom",
            "email",
            "telephone",
            "departement",
            "poste",
            "salaire",
        ]);
        for employee in employees {
            table.add_row(vec![
                employee.id.to_string(),
                employee.nom.clone(),
                employee.email.clone(),
                employee.telephone.clone().unwrap_or_default(),
                employee.departement.clone().unwrap_or_default(),
                employee.poste.clone().unwrap_or_default(),
                format!("{:.2}", employee.salaire),
            ]);
        }
        println!("{table}");
        Ok(())
    }

    pub fn statistics(
        &self,
        stats: &EmployeeStatistics,
        breakdown: Option<&[DepartmentSummary]>,
    ) -> anyhow::Result<()> {
        if self.json {
            #[derive(Serialize)]
            struct StatsOutput<'a> {
                statistics: &'a EmployeeStatistics,
                #[serde(skip_serializing_if = "Option::is_none")]
                departments: Option<&'a [DepartmentSummary]>,
            }
            let output = StatsOutput {
                statistics: stats,
                departments: breakdown,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let mut table = Table::new();
        table.set_header(vec!["metric", "value"]);
        table.add_row(vec!["employees".to_string(), stats.total_employees.to_string()]);
        table.add_row(vec!["mean salary".to_string(), format!("{:.2}", stats.mean_salary)]);
        table.add_row(vec!["min salary".to_string(), format!("{:.2}", stats.min_salary)]);
        table.add_row(vec!["max salary".to_string(), format!("{:.2}", stats.max_salary)]);
        table.add_row(vec!["departments".to_string(), stats.department_count.to_string()]);
        table.add_row(vec!["positions".to_string(), stats.position_count.to_string()]);
        println!("{table}");

        if let Some(breakdown) = breakdown {
            let mut table = Table::new();
            table.set_header(vec!["departement", "employees", "mean salary"]);
            for summary in breakdown {
                table.add_row(vec![
                    summary.departement.clone(),
                    summary.employees.to_string(),
                    format!("{:.2}", summary.mean_salary),
                ]);
            }
            println!("{table}");
        }
        Ok(())
    }
}
