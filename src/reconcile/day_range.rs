//! Validated date ranges and per-day effects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range with `from_date <= to_date`.
///
/// # Example
///
/// ```
/// use hr_engine::reconcile::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
/// ).unwrap();
/// assert_eq!(range.len_days(), 5);
///
/// let inverted = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
/// );
/// assert!(inverted.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from_date: NaiveDate,
    to_date: NaiveDate,
}

impl DateRange {
    /// Builds a range, failing with `InvalidRange` when `to_date` is before
    /// `from_date`.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate) -> EngineResult<Self> {
        if to_date < from_date {
            return Err(EngineError::InvalidRange {
                from_date,
                to_date,
                message: "to_date is before from_date".to_string(),
            });
        }
        Ok(Self { from_date, to_date })
    }

    /// First day of the range.
    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    /// Last day of the range.
    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    /// Returns true if `date` lies within the range (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from_date && date <= self.to_date
    }

    /// Number of calendar days in the range.
    pub fn len_days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }

    /// Every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from_date.iter_days().take_while(move |d| *d <= self.to_date)
    }

    /// Checks that an optional half-day date lies inside the range.
    pub fn validate_half_day(&self, half_day_date: Option<NaiveDate>) -> EngineResult<()> {
        match half_day_date {
            Some(date) if !self.contains(date) => Err(EngineError::InvalidRange {
                from_date: self.from_date,
                to_date: self.to_date,
                message: format!("half_day_date {} is outside the range", date),
            }),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from_date, self.to_date)
    }
}

/// What a single day in a range amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayEffect {
    /// A counted working day.
    Present,
    /// A holiday excluded from the count.
    Holiday,
    /// A full day of leave.
    OnLeave,
    /// Half a day.
    HalfDay,
}

impl DayEffect {
    /// The day's numeric contribution to a total.
    pub fn contribution(self) -> Decimal {
        match self {
            DayEffect::Present | DayEffect::OnLeave => Decimal::ONE,
            DayEffect::HalfDay => Decimal::new(5, 1),
            DayEffect::Holiday => Decimal::ZERO,
        }
    }
}
