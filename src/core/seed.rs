//! Seed records loaded at startup.
//!
//! The console ships with a built-in mock data set. A JSON file with the
//! same shape can replace it via `data.seed_file` in the config.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{Payment, Plan, Subscription};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SeedError>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl SeedData {
    /// Read a seed file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let data: SeedData = serde_json::from_str(&contents)?;
        log::info!(
            "Loaded {} subscriptions and {} payments from {}",
            data.subscriptions.len(),
            data.payments.len(),
            path.display()
        );
        Ok(data)
    }

    /// Seed file when configured and readable, otherwise the built-in set.
    pub fn load(seed_file: Option<&Path>) -> Self {
        match seed_file {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                log::warn!("{e} ({}); using built-in data", path.display());
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Self {
        let subscriptions = vec![
            sub(1, "jdoe", "Globex Corporation", (2022, 11, 3), Plan::Pro, (2023, 1, 1), (2024, 1, 1), 500, 420, true),
            sub(2, "asmith", "Initech", (2023, 2, 14), Plan::Basic, (2023, 3, 1), (2024, 3, 1), 100, 95, true),
            sub(3, "bwayne", "Wayne Enterprises", (2021, 6, 30), Plan::Enterprise, (2021, 7, 1), (2025, 7, 1), 5000, 1250, true),
            sub(4, "ckent", "Daily Planet", (2023, 5, 9), Plan::Basic, (2023, 5, 10), (2024, 5, 10), 100, 12, false),
            sub(5, "dprince", "Themyscira Imports", (2022, 8, 21), Plan::Pro, (2022, 9, 1), (2023, 9, 1), 500, 500, false),
            sub(6, "pparker", "Bugle Media", (2023, 9, 2), Plan::Basic, (2023, 9, 2), (2024, 9, 2), 100, 71, true),
            sub(7, "tstark", "Stark Industries", (2020, 4, 1), Plan::Enterprise, (2020, 4, 1), (2026, 4, 1), 10000, 9400, true),
            sub(8, "bbanner", "Gamma Labs", (2023, 1, 19), Plan::Pro, (2023, 2, 1), (2024, 2, 1), 500, 60, true),
            sub(9, "nromanoff", "Red Room Consulting", (2022, 12, 12), Plan::Basic, (2023, 1, 1), (2024, 1, 1), 100, 33, false),
            sub(10, "srogers", "Liberty Logistics", (2021, 7, 4), Plan::Enterprise, (2021, 8, 1), (2024, 8, 1), 5000, 4800, true),
            sub(11, "hjordan", "Ferris Aircraft", (2023, 10, 30), Plan::Pro, (2023, 11, 1), (2024, 11, 1), 500, 245, true),
            sub(12, "oqueen", "Queen Consolidated", (2022, 3, 15), Plan::Basic, (2022, 4, 1), (2023, 4, 1), 100, 100, false),
        ];

        let payments = vec![
            pay(1, "jdoe", "Globex Corporation", 1188.00),
            pay(2, "asmith", "Initech", 348.00),
            pay(3, "bwayne", "Wayne Enterprises", 23_976.00),
            pay(4, "ckent", "Daily Planet", 29.00),
            pay(5, "dprince", "Themyscira Imports", 594.00),
            pay(6, "pparker", "Bugle Media", 87.00),
            pay(7, "tstark", "Stark Industries", 71_928.00),
            pay(8, "bbanner", "Gamma Labs", 990.00),
            pay(9, "nromanoff", "Red Room Consulting", 116.00),
            pay(10, "srogers", "Liberty Logistics", 17_982.00),
            pay(11, "hjordan", "Ferris Aircraft", 99.00),
            pay(12, "oqueen", "Queen Consolidated", 348.00),
        ];

        Self {
            subscriptions,
            payments,
        }
    }
}

fn day((y, m, d): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn sub(
    id: u32,
    username: &str,
    company_name: &str,
    registered: (i32, u32, u32),
    plan: Plan,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    total_uploads: u32,
    uploads_used: u32,
    is_active: bool,
) -> Subscription {
    Subscription {
        id,
        username: username.to_string(),
        company_name: company_name.to_string(),
        registration_date: day(registered),
        plan,
        subscription_start_date: day(start),
        subscription_end_date: day(end),
        total_uploads,
        uploads_used,
        is_active,
    }
}

fn pay(id: u32, username: &str, company_name: &str, total_amount_paid: f64) -> Payment {
    Payment {
        id,
        username: username.to_string(),
        company_name: company_name.to_string(),
        total_amount_paid,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_is_well_formed() {
        let data = SeedData::builtin();
        assert!(!data.subscriptions.is_empty());
        assert_eq!(data.subscriptions.len(), data.payments.len());

        let ids: HashSet<u32> = data.subscriptions.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), data.subscriptions.len());

        for s in &data.subscriptions {
            assert!(s.uploads_used <= s.total_uploads, "{} over quota", s.username);
            assert!(s.subscription_start_date <= s.subscription_end_date);
        }
        for p in &data.payments {
            assert!(p.total_amount_paid >= 0.0);
        }
    }

    #[test]
    fn test_builtin_covers_all_plans_and_statuses() {
        let data = SeedData::builtin();
        for plan in Plan::ALL {
            assert!(data.subscriptions.iter().any(|s| s.plan == plan));
        }
        assert!(data.subscriptions.iter().any(|s| s.is_active));
        assert!(data.subscriptions.iter().any(|s| !s.is_active));
    }

    #[test]
    fn test_day_helper() {
        assert_eq!(day((2023, 3, 7)).to_rfc3339(), "2023-03-07T09:00:00+00:00");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "subscriptions": [{{
                    "id": 7, "username": "zed", "companyName": "Zed Co",
                    "registrationDate": "2023-01-02T10:00:00Z",
                    "subscriptionPlan": "Enterprise",
                    "subscriptionStartDate": "2023-01-02T10:00:00Z",
                    "subscriptionEndDate": "2024-01-02T10:00:00Z",
                    "totalUploads": 10, "uploadsUsed": 3, "isActive": true
                }}],
                "payments": [{{ "id": 7, "username": "zed", "companyName": "Zed Co", "totalAmountPaid": 12.5 }}]
            }}"#
        )
        .unwrap();

        let data = SeedData::from_file(file.path()).unwrap();
        assert_eq!(data.subscriptions[0].plan, Plan::Enterprise);
        assert_eq!(data.subscriptions[0].uploads_left(), 7);
        assert_eq!(data.payments[0].total_amount_paid, 12.5);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            SeedData::from_file(file.path()),
            Err(SeedError::Json(_))
        ));
        assert_eq!(SeedData::load(Some(file.path())), SeedData::builtin());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let missing = Path::new("/definitely/not/here/seed.json");
        assert!(matches!(SeedData::from_file(missing), Err(SeedError::Io(_))));
        assert_eq!(SeedData::load(None), SeedData::builtin());
    }
}
