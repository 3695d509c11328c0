//! Closed calendar-date interval used for rental and reservation periods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// A period of whole days, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(
                "period",
                format!("start date {start} is after end date {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> u32 {
        let span = (self.end - self.start).num_days() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    /// Closed-interval overlap: touching boundaries count as overlapping.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Days `day` lies past the end of the range, zero when not past it.
    pub fn days_past_end(&self, day: NaiveDate) -> u32 {
        let late = (day - self.end).num_days();
        u32::try_from(late.max(0)).unwrap_or(u32::MAX)
    }

    /// Same start, new end.
    pub fn with_end(&self, end: NaiveDate) -> DomainResult<Self> {
        Self::new(self.start, end)
    }

    /// Same end, new start.
    pub fn with_start(&self, start: NaiveDate) -> DomainResult<Self> {
        Self::new(start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn range(a: u32, b: u32) -> DateRange {
        DateRange::new(d(a), d(b)).unwrap()
    }

    #[test]
    fn test_start_after_end_rejected() {
        assert!(DateRange::new(d(5), d(4)).is_err());
        assert!(DateRange::new(d(5), d(5)).is_ok());
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(range(1, 1).days(), 1);
        assert_eq!(range(1, 3).days(), 3);
    }

    #[test]
    fn test_overlap_boundaries_touching() {
        assert!(range(1, 5).overlaps(&range(5, 9)));
        assert!(range(5, 9).overlaps(&range(1, 5)));
    }

    #[test]
    fn test_overlap_disjoint_and_nested() {
        assert!(!range(1, 4).overlaps(&range(5, 9)));
        assert!(range(1, 10).overlaps(&range(3, 4)));
        assert!(range(3, 4).overlaps(&range(1, 10)));
    }

    #[test]
    fn test_days_past_end() {
        let r = range(1, 5);
        assert_eq!(r.days_past_end(d(3)), 0);
        assert_eq!(r.days_past_end(d(5)), 0);
        assert_eq!(r.days_past_end(d(8)), 3);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2026-03-01","end":"2026-03-02"}"#).unwrap();
        assert_eq!(ok.days(), 2);

        let bad = serde_json::from_str::<DateRange>(r#"{"start":"2026-03-02","end":"2026-03-01"}"#);
        assert!(bad.is_err());
    }
}
