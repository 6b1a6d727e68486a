//! Working-day counting over a date range.
//!
//! Used for the "custom days" of attendance requests, the day count of
//! work-from-home requests and the total days of leave applications.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::day_range::{DateRange, DayEffect};
use super::holiday_calendar::HolidayCalendar;

/// One day's share of a day count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// The date.
    pub date: NaiveDate,
    /// What the date counted as.
    pub effect: DayEffect,
    /// Its numeric contribution; the contributions sum to the total.
    pub contribution: Decimal,
}

/// The result of counting days, including the audit step.
#[derive(Debug, Clone)]
pub struct DayCountResult {
    /// Total days, non-negative and exact to 0.5.
    pub total_days: Decimal,
    /// Per-day breakdown in date order.
    pub days: Vec<DayBreakdown>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Counts the days in `range`, optionally skipping holidays and crediting
/// one day as a half day.
///
/// # Arguments
///
/// * `range` - The validated date range
/// * `calendar` - Holidays for the employee (may be empty)
/// * `half_day_date` - Day credited as 0.5; must lie inside `range`
/// * `include_holidays` - When false, holidays contribute 0
///
/// # Returns
///
/// A [`DayCountResult`], or `InvalidRange` when `half_day_date` is outside
/// the range. A half day that falls on an excluded holiday has no effect.
///
/// # Examples
///
/// ```
/// use hr_engine::reconcile::{count_days, DateRange, HolidayCalendar};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let range = DateRange::new(d(1), d(5)).unwrap();
/// let calendar: HolidayCalendar = [d(3)].into_iter().collect();
///
/// let result = count_days(&range, &calendar, None, false).unwrap();
/// assert_eq!(result.total_days, Decimal::from(4));
///
/// let result = count_days(&range, &calendar, Some(d(5)), false).unwrap();
/// assert_eq!(result.total_days, Decimal::new(35, 1));
/// ```
pub fn count_days(
    range: &DateRange,
    calendar: &HolidayCalendar,
    half_day_date: Option<NaiveDate>,
    include_holidays: bool,
) -> EngineResult<DayCountResult> {
    range.validate_half_day(half_day_date)?;

    let mut days: Vec<DayBreakdown> = range
        .days()
        .map(|date| {
            let effect = if !include_holidays && calendar.contains(date) {
                DayEffect::Holiday
            } else {
                DayEffect::Present
            };
            DayBreakdown {
                date,
                effect,
                contribution: effect.contribution(),
            }
        })
        .collect();

    let full_days: Decimal = days.iter().map(|d| d.contribution).sum();
    let holidays_skipped = days
        .iter()
        .filter(|d| d.effect == DayEffect::Holiday)
        .count();

    // Only a half day that was counted in full is reduced.
    let half_day_applied = match half_day_date
        .and_then(|hd| days.iter_mut().find(|d| d.date == hd))
    {
        Some(day) if day.contribution > Decimal::ZERO => {
            day.effect = DayEffect::HalfDay;
            day.contribution = DayEffect::HalfDay.contribution();
            true
        }
        _ => false,
    };

    let total_days = if half_day_applied {
        (full_days - Decimal::new(5, 1)).max(Decimal::ZERO)
    } else {
        full_days
    };

    let reasoning = match (holidays_skipped, half_day_applied) {
        (0, false) => format!("{} days in range", range.len_days()),
        (h, false) => format!(
            "{} days in range, {} holiday(s) excluded = {}",
            range.len_days(),
            h,
            total_days.normalize()
        ),
        (h, true) => format!(
            "{} days in range, {} holiday(s) excluded, half day on {} = {}",
            range.len_days(),
            h,
            half_day_date.map(|d| d.to_string()).unwrap_or_default(),
            total_days.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "count_days".to_string(),
        rule_name: "Working Day Count".to_string(),
        input: serde_json::json!({
            "from_date": range.from_date(),
            "to_date": range.to_date(),
            "holiday_list": calendar.source(),
            "half_day_date": half_day_date,
            "include_holidays": include_holidays
        }),
        output: serde_json::json!({
            "days_in_range": range.len_days(),
            "holidays_skipped": holidays_skipped,
            "half_day_applied": half_day_applied,
            "total_days": total_days.normalize().to_string()
        }),
        reasoning,
    };

    Ok(DayCountResult {
        total_days,
        days,
        audit_step,
    })
}
