//! Training modules and the apprenticeship record.

use chrono::Months;
use serde::{Deserialize, Serialize};
use crate::error::{ProfileError, Result};
use crate::status::{CourseLevel, Status};
use crate::Date;

/// Length of the articleship, used to derive the default end date.
pub const ARTICLESHIP_TERM_MONTHS: u32 = 24;

/// A short mandatory course such as ICITSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingModule {
    /// Identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Expected duration, e.g. "4 Weeks"
    pub duration: String,

    /// Current status
    pub status: Status,

    /// When the module started
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    /// When the module finished
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Stage this module gates
    pub required_for_level: CourseLevel,
}

impl TrainingModule {
    /// Create a pending module.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration: impl Into<String>,
        required_for_level: CourseLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: duration.into(),
            status: Status::Pending,
            start_date: None,
            end_date: None,
            required_for_level,
        }
    }

    /// Set both dates at once.
    pub fn set_dates(&mut self, start: Option<Date>, end: Option<Date>) -> Result<()> {
        check_order(start, end)?;
        self.start_date = start;
        self.end_date = end;
        Ok(())
    }
}

/// The multi-year practical training (articleship).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Articleship {
    /// Current status
    pub status: Status,

    /// Start date
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    /// Expected or actual end date
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    /// Leave days taken so far
    #[serde(default)]
    pub leaves_taken: u32,

    /// Opted into industrial training for the final months
    #[serde(default)]
    pub industrial_training: bool,
}

impl Articleship {
    /// Record the start date and derive the end date from the fixed term.
    pub fn start(&mut self, date: Date) {
        self.start_date = Some(date);
        self.end_date = date.checked_add_months(Months::new(ARTICLESHIP_TERM_MONTHS));
    }

    /// Override the derived end date.
    pub fn set_end(&mut self, date: Option<Date>) -> Result<()> {
        check_order(self.start_date, date)?;
        self.end_date = date;
        Ok(())
    }

    /// Started and not yet completed; runs alongside later requirements.
    pub fn is_running(&self) -> bool {
        self.start_date.is_some() && self.status != Status::Completed
    }
}

fn check_order(start: Option<Date>, end: Option<Date>) -> Result<()> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(ProfileError::EndBeforeStart { start: s, end: e }),
        _ => Ok(()),
    }
}

/// Dates may be stored as `""` when never set or cleared.
fn blank_date<'de, D>(deserializer: D) -> std::result::Result<Option<Date>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<Date>().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_derives_two_year_end() {
        let mut a = Articleship::default();
        a.start(date(2024, 3, 15));
        assert_eq!(a.start_date, Some(date(2024, 3, 15)));
        assert_eq!(a.end_date, Some(date(2026, 3, 15)));
    }

    #[test]
    fn test_leap_day_start_clamps_to_month_end() {
        let mut a = Articleship::default();
        a.start(date(2024, 2, 29));
        assert_eq!(a.end_date, Some(date(2026, 2, 28)));
    }

    #[test]
    fn test_manual_end_overrides_derived() {
        let mut a = Articleship::default();
        a.start(date(2024, 1, 1));
        a.set_end(Some(date(2026, 6, 30))).unwrap();
        assert_eq!(a.end_date, Some(date(2026, 6, 30)));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut a = Articleship::default();
        a.start(date(2024, 1, 1));
        assert!(a.set_end(Some(date(2023, 12, 31))).is_err());
        assert_eq!(a.end_date, Some(date(2026, 1, 1)));
    }

    #[test]
    fn test_is_running() {
        let mut a = Articleship::default();
        assert!(!a.is_running());
        a.start(date(2024, 1, 1));
        assert!(a.is_running());
        a.status = Status::Completed;
        assert!(!a.is_running());
    }

    #[test]
    fn test_dates_serialize_as_iso() {
        let mut a = Articleship::default();
        a.start(date(2024, 7, 1));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["startDate"], "2024-07-01");
        assert_eq!(json["endDate"], "2026-07-01");
        assert_eq!(json["leavesTaken"], 0);
    }

    #[test]
    fn test_blank_dates_load_as_unset() {
        let module: TrainingModule = serde_json::from_value(serde_json::json!({
            "id": "ICITSS",
            "name": "ICITSS",
            "duration": "4 Weeks",
            "status": "In Progress",
            "startDate": "2024-05-06",
            "endDate": "",
            "requiredForLevel": "Intermediate"
        }))
        .unwrap();
        assert_eq!(module.start_date, Some(date(2024, 5, 6)));
        assert_eq!(module.end_date, None);

        let a: Articleship = serde_json::from_value(serde_json::json!({
            "status": "Pending",
            "startDate": "",
            "endDate": " ",
            "leavesTaken": 0,
            "industrialTraining": false
        }))
        .unwrap();
        assert_eq!(a.start_date, None);
        assert_eq!(a.end_date, None);
        assert!(!a.is_running());
    }

    #[test]
    fn test_null_and_bad_dates() {
        let a: Articleship = serde_json::from_value(serde_json::json!({
            "status": "Pending",
            "startDate": null
        }))
        .unwrap();
        assert_eq!(a.start_date, None);

        let bad = serde_json::from_value::<Articleship>(serde_json::json!({
            "status": "Pending",
            "startDate": "15/01/2024"
        }));
        assert!(bad.is_err());
    }
}
