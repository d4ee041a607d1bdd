use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Date format of [`PlanRecord::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format of [`PlanRecord::time`] (zero-padded, 24-hour).
pub const TIME_FORMAT: &str = "%H:%M";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A persisted, user-authored date plan.
///
/// Optional fields are stored as empty strings, matching the persisted
/// JSON layout. `title` and `date` are never empty for a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Creation timestamp in milliseconds, unique within the store.
    pub id: i64,
    pub title: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, or empty.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    /// Markdown notes, or empty.
    #[serde(default)]
    pub notes: String,
}

impl PlanRecord {
    /// Build a record from user fields and an already-assigned id.
    pub fn from_fields(id: i64, fields: PlanFields) -> Self {
        Self {
            id,
            title: fields.title,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            notes: fields.notes,
        }
    }

    /// Return `true` if this plan has a time of day set.
    pub fn has_time(&self) -> bool {
        !self.time.is_empty()
    }
}

/// User-editable plan fields (everything but the id).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFields {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
}

impl PlanFields {
    /// Shorthand for the two required fields.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Check the fields a stored record must satisfy.
    ///
    /// Returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_owned());
        }
        if self.date.trim().is_empty() {
            return Err("date is required".to_owned());
        }
        // Lengths are checked too: sorting relies on zero padding.
        if self.date.len() != 10 || NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_err() {
            return Err(format!("date {:?} is not a YYYY-MM-DD date", self.date));
        }
        if !self.time.is_empty()
            && (self.time.len() != 5 || NaiveTime::parse_from_str(&self.time, TIME_FORMAT).is_err())
        {
            return Err(format!("time {:?} is not an HH:MM time", self.time));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Display order for plans: newest date first, then latest time first.
///
/// Both keys compare lexicographically, which matches chronological order
/// for ISO dates and zero-padded 24-hour times. On the same date, a plan
/// without a time sorts after every plan that has one.
pub fn compare_plans(a: &PlanRecord, b: &PlanRecord) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| match (a.has_time(), b.has_time()) {
            (true, true) => b.time.cmp(&a.time),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: i64, date: &str, time: &str) -> PlanRecord {
        PlanRecord::from_fields(id, PlanFields::new("t", date).with_time(time))
    }

    #[test]
    fn later_date_sorts_first() {
        let a = plan(1, "2024-06-01", "23:00");
        let b = plan(2, "2024-06-02", "08:00");
        assert_eq!(compare_plans(&a, &b), Ordering::Greater);
        assert_eq!(compare_plans(&b, &a), Ordering::Less);
    }

    #[test]
    fn timed_sorts_before_untimed_on_same_date() {
        let timed = plan(1, "2024-06-01", "07:00");
        let untimed = plan(2, "2024-06-01", "");
        assert_eq!(compare_plans(&timed, &untimed), Ordering::Less);
        assert_eq!(compare_plans(&untimed, &timed), Ordering::Greater);
    }

    #[test]
    fn later_time_sorts_first_on_same_date() {
        let early = plan(1, "2024-06-01", "09:30");
        let late = plan(2, "2024-06-01", "19:00");
        assert_eq!(compare_plans(&late, &early), Ordering::Less);
    }

    #[test]
    fn both_untimed_are_equal() {
        let a = plan(1, "2024-06-01", "");
        let b = plan(2, "2024-06-01", "");
        assert_eq!(compare_plans(&a, &b), Ordering::Equal);
    }

    #[test]
    fn validate_requires_title_and_date() {
        assert!(PlanFields::new("", "2024-06-01").validate().is_err());
        assert!(PlanFields::new("   ", "2024-06-01").validate().is_err());
        assert!(PlanFields::new("Dinner", "").validate().is_err());
        assert!(PlanFields::new("Dinner", "2024-06-01").validate().is_ok());
    }

    #[test]
    fn validate_checks_formats() {
        let err = PlanFields::new("Dinner", "06/01/2024").validate().unwrap_err();
        assert!(err.contains("YYYY-MM-DD"), "unexpected: {err}");
        assert!(PlanFields::new("Dinner", "2024-6-1").validate().is_err());

        let err = PlanFields::new("Dinner", "2024-06-01")
            .with_time("7pm")
            .validate()
            .unwrap_err();
        assert!(err.contains("HH:MM"), "unexpected: {err}");

        assert!(
            PlanFields::new("Dinner", "2024-06-01")
                .with_time("19:30")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn deserialize_tolerates_missing_optional_fields() {
        let json = r#"{"id": 1717000000000, "title": "Picnic", "date": "2024-06-01"}"#;
        let record: PlanRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Picnic");
        assert!(record.time.is_empty());
        assert!(record.notes.is_empty());
    }
}
