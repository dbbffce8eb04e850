//! Display formatting shared by the views.

use chrono::{DateTime, Utc};

/// Format a USD amount as `$1,234.50` (negative as `-$5.00`).
pub fn usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// `YYYY-MM-DD`.
pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Colour band for an upload quota gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Healthy,
    /// Above 70 % used.
    High,
    /// Above 90 % used.
    Critical,
}

impl UsageLevel {
    pub fn from_percent(used_percent: f64) -> Self {
        if used_percent > 90.0 {
            UsageLevel::Critical
        } else if used_percent > 70.0 {
            UsageLevel::High
        } else {
            UsageLevel::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_usd() {
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(60.0), "$60.00");
        assert_eq!(usd(999.999), "$1,000.00");
        assert_eq!(usd(1234.5), "$1,234.50");
        assert_eq!(usd(1_250_000.0), "$1,250,000.00");
        assert_eq!(usd(-5.0), "-$5.00");
    }

    #[test]
    fn test_date() {
        let at = Utc.with_ymd_and_hms(2023, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(date(&at), "2023-03-07");
    }

    #[test]
    fn test_usage_levels() {
        assert_eq!(UsageLevel::from_percent(10.0), UsageLevel::Healthy);
        assert_eq!(UsageLevel::from_percent(70.0), UsageLevel::Healthy);
        assert_eq!(UsageLevel::from_percent(70.5), UsageLevel::High);
        assert_eq!(UsageLevel::from_percent(90.0), UsageLevel::High);
        assert_eq!(UsageLevel::from_percent(91.0), UsageLevel::Critical);
    }
}
