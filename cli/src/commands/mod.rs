pub mod balance;
pub mod config;
pub mod log;
pub mod logs;
pub mod route;
pub mod steps;
pub mod supplements;

use chrono::NaiveDate;
use color_eyre::eyre::{Result, WrapErr};

use crate::data::{self, DATE_FORMAT};

/// Parses a `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .wrap_err_with(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(data::today()),
    }
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2026-02-28")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert!(parse_date(Some("28/02/2026")).is_err());
        assert_eq!(parse_date(None).unwrap(), data::today());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Magnesium", 20), "Magnesium");
        assert_eq!(truncate_str("Magnesium citrate complex", 12), "Magnesium...");
    }
}
