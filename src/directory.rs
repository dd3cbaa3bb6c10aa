use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

use crate::model::{
    employee::{Employee, LeaveBalances},
    leave_detail::LeaveDetail,
    leave_record::LeaveRecord,
};

/// Read-only reference data for both views. Loaded once, shared by all workers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub records: Vec<LeaveRecord>,
    /// keyed by employee id
    #[serde(default)]
    pub details: BTreeMap<String, LeaveDetail>,
}

static SEED: Lazy<Directory> = Lazy::new(build_seed);

fn employee(id: &str, name: &str, department: &str, sick: u32, vacation: u32, email: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        work_days: 22,
        leave_balances: LeaveBalances { sick, vacation },
        email: email.to_string(),
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn record(id: &str, name: &str, department: &str, range: [&str; 2], range2: [&str; 2]) -> LeaveRecord {
    LeaveRecord {
        employee_id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        start_date: day(range[0]),
        end_date: day(range[1]),
        start_date2: Some(day(range2[0])),
        end_date2: Some(day(range2[1])),
    }
}

fn detail(dates: &[&str]) -> LeaveDetail {
    LeaveDetail {
        work_days: 22,
        leave_dates: dates.iter().map(|d| d.to_string()).collect(),
    }
}

fn build_seed() -> Directory {
    Directory {
        employees: vec![
            employee("EMP001", "Somchai Prasert", "IT", 0, 6, "somchai@example.com"),
            employee("EMP002", "Suda Raksamee", "HR", 5, 6, "suda@example.com"),
            employee("EMP003", "Nattapong Jinda", "Finance", 2, 4, "suda@example.com"),
            employee("EMP004", "Siamai Thana", "Maketing", 3, 0, "suda@example.com"),
        ],
        records: vec![
            record(
                "EMP002",
                "Suda Raksamee",
                "HR",
                ["2025-05-12", "2025-05-14"],
                ["2025-05-02", "2025-05-02"],
            ),
            record(
                "EMP003",
                "Nattapong Jinda",
                "Finance",
                ["2025-05-12", "2025-05-12"],
                ["2025-05-09", "2025-05-09"],
            ),
        ],
        details: BTreeMap::from([
            ("EMP002".to_string(), detail(&["2025-05-12", "2025-05-13", "2025-05-14"])),
            ("EMP003".to_string(), detail(&["2025-05-12"])),
            ("EMP004".to_string(), detail(&["2025-05-09", "2025-05-10", "2025-05-11"])),
        ]),
    }
}

impl Directory {
    /// Demo data the service ships with.
    pub fn seed() -> Self {
        SEED.clone()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let directory: Directory =
            serde_json::from_str(json).context("reference data is not valid JSON")?;
        directory.validate()?;
        Ok(directory)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("failed to load {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for emp in &self.employees {
            if !seen.insert(emp.id.as_str()) {
                bail!("duplicate employee id {}", emp.id);
            }
        }
        Ok(())
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn record(&self, employee_id: &str) -> Option<&LeaveRecord> {
        self.records.iter().find(|r| r.employee_id == employee_id)
    }

    pub fn detail(&self, employee_id: &str) -> Option<&LeaveDetail> {
        self.details.get(employee_id)
    }
}

pub fn init_directory(path: Option<&Path>) -> Result<Directory> {
    let directory = match path {
        Some(path) => Directory::from_json_file(path)?,
        None => Directory::seed(),
    };

    info!(
        employees = directory.employees.len(),
        records = directory.records.len(),
        details = directory.details.len(),
        "Reference data loaded"
    );

    Ok(directory)
}
