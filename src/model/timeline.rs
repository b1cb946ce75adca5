use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Three-letter month labels, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Gregorian leap year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// The visible date span of a chart. The start date is never after the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    #[serde(with = "crate::model::dates::date_serde")]
    start: NaiveDate,
    #[serde(with = "crate::model::dates::date_serde")]
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = LayoutError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a new range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LayoutError> {
        if start > end {
            return Err(LayoutError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Pulls dates past the end of the range back onto the end date.
    pub fn clamp_end(&self, date: NaiveDate) -> NaiveDate {
        date.min(self.end)
    }
}

/// One calendar month of a [`CalendarGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// Month of the year, 1 = January.
    pub month: u32,
    pub label: &'static str,
}

impl CalendarMonth {
    fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            label: MONTH_ABBREVIATIONS[(month as usize - 1) % 12],
        }
    }

    pub const fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month()
    }
}

/// Every month from the month of `start` to the month of `end`, inclusive.
///
/// Empty when `start` lies in a later month than `end`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<CalendarMonth> {
    let last = (end.year(), end.month());
    let mut month = CalendarMonth::new(start.year(), start.month());
    let mut months = Vec::new();

    while (month.year, month.month) <= last {
        months.push(month);
        month = month.next();
    }
    months
}

/// The month columns of a chart and the mapping from dates to horizontal
/// positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    range: DateRange,
    months: Vec<CalendarMonth>,
}

impl CalendarGrid {
    pub fn new(range: DateRange) -> Self {
        Self {
            months: months_between(range.start(), range.end()),
            range,
        }
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn months(&self) -> &[CalendarMonth] {
        &self.months
    }

    /// Number of month columns. Never zero for a valid range.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Consecutive `(year, month count)` groups in grid order.
    pub fn years(&self) -> Vec<(i32, usize)> {
        let mut years: Vec<(i32, usize)> = Vec::new();
        for month in &self.months {
            match years.last_mut() {
                Some((year, count)) if *year == month.year => *count += 1,
                _ => years.push((month.year, 1)),
            }
        }
        years
    }

    /// Grid column holding `date`, if any.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.months.iter().position(|m| m.contains(date))
    }

    /// Fractional position of `date` along the chart, `0.0..=1.0`.
    ///
    /// Dates outside the range are clamped to its boundaries: anything
    /// before the start is `0.0`, anything after the end maps like the end.
    pub fn position_of(&self, date: NaiveDate) -> f32 {
        if self.months.is_empty() || date < self.range.start() {
            return 0.0;
        }
        let date = self.range.clamp_end(date);
        let index = self.index_of(date).unwrap_or(0);
        let day_fraction = date.day() as f32 / days_in_month(date.year(), date.month()) as f32;
        (index as f32 + day_fraction) / self.months.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn grid(start: NaiveDate, end: NaiveDate) -> CalendarGrid {
        CalendarGrid::new(DateRange::new(start, end).expect("valid test range"))
    }

    #[test]
    fn test_range_rejects_start_after_end() {
        let err = DateRange::new(date(2024, 3, 1), date(2024, 2, 1)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidRange {
                start: date(2024, 3, 1),
                end: date(2024, 2, 1),
            }
        );
        assert!(DateRange::new(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
    }

    #[test]
    fn test_range_deserialize_validates() {
        let ok: Result<DateRange, _> =
            serde_json::from_str(r#"{"start":"2024-01-01","end":"2024-12-31"}"#);
        assert!(ok.is_ok());

        let bad: Result<DateRange, _> =
            serde_json::from_str(r#"{"start":"2025-01-01","end":"2024-12-31"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_days_in_month_cases() {
        struct TestCase {
            year: i32,
            month: u32,
            days: u32,
        }

        let cases = [
            TestCase { year: 2023, month: 1, days: 31 },
            TestCase { year: 2023, month: 2, days: 28 },
            TestCase { year: 2024, month: 2, days: 29 },
            TestCase { year: 1900, month: 2, days: 28 },
            TestCase { year: 2000, month: 2, days: 29 },
            TestCase { year: 2024, month: 4, days: 30 },
            TestCase { year: 2024, month: 12, days: 31 },
        ];

        for case in &cases {
            assert_eq!(
                days_in_month(case.year, case.month),
                case.days,
                "{}-{:02}",
                case.year,
                case.month
            );
        }
    }

    #[test]
    fn test_months_between_ignores_day_of_month() {
        let months = months_between(date(2024, 1, 15), date(2024, 3, 2));
        let labels: Vec<_> = months.iter().map(|m| (m.year, m.month, m.label)).collect();
        assert_eq!(
            labels,
            vec![(2024, 1, "Jan"), (2024, 2, "Feb"), (2024, 3, "Mar")]
        );
    }

    #[test]
    fn test_months_between_crosses_year() {
        let months = months_between(date(2023, 11, 30), date(2024, 2, 1));
        assert_eq!(months.len(), 4);
        assert_eq!(months[1].label, "Dec");
        assert_eq!((months[2].year, months[2].month), (2024, 1));
    }

    #[test]
    fn test_single_day_range_has_one_month() {
        let g = grid(date(2024, 5, 9), date(2024, 5, 9));
        assert_eq!(g.len(), 1);
        assert_eq!(g.months()[0].label, "May");
    }

    #[test]
    fn test_years_groups_consecutive_months() {
        let g = grid(date(2023, 10, 1), date(2025, 2, 28));
        assert_eq!(g.years(), vec![(2023, 3), (2024, 12), (2025, 2)]);
    }

    #[test]
    fn test_position_within_year() {
        let g = grid(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(g.len(), 12);

        let feb_first = g.position_of(date(2024, 2, 1));
        assert!((feb_first - (1.0 + 1.0 / 29.0) / 12.0).abs() < 1e-6);

        let last = g.position_of(date(2024, 12, 31));
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_position_is_monotonic_and_bounded() {
        let start = date(2023, 11, 20);
        let end = date(2024, 3, 31);
        let g = grid(start, end);

        let mut previous = 0.0_f32;
        let mut day = start;
        while day <= end {
            let pos = g.position_of(day);
            assert!((0.0..=1.0).contains(&pos), "{day} -> {pos}");
            assert!(pos >= previous, "{day} went backwards");
            previous = pos;
            day = day.succ_opt().expect("date overflow");
        }
    }

    #[test]
    fn test_position_end_month_before_last_day() {
        let g = grid(date(2024, 1, 1), date(2024, 3, 15));
        let end = g.position_of(date(2024, 3, 15));
        assert!(end < 1.0);
        assert!((end - (2.0 + 15.0 / 31.0) / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_position_clamps_after_end() {
        let g = grid(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(g.position_of(date(2025, 6, 1)), g.position_of(date(2024, 12, 31)));
        assert!((g.position_of(date(2030, 1, 1)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_position_before_start_is_zero() {
        let g = grid(date(2024, 1, 1), date(2024, 12, 31));
        assert_eq!(g.position_of(date(2023, 6, 15)), 0.0);
        assert_eq!(g.position_of(date(2023, 12, 31)), 0.0);
    }

    #[test]
    fn test_position_monotonic_across_start() {
        let g = grid(date(2024, 1, 15), date(2024, 6, 30));
        let mut day = date(2023, 12, 1);
        let mut last = g.position_of(day);
        while day <= date(2024, 2, 29) {
            let pos = g.position_of(day);
            assert!(pos >= last, "position decreased at {day}: {pos} < {last}");
            last = pos;
            day = day.succ_opt().expect("date overflow");
        }
    }
}
