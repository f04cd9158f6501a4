//! Pure text helpers for whatever layer draws the picker.
//!
//! Header:   `June 2024`
//! Weekdays: `Su Mo Tu We Th Fr Sa`
//! Time:     `09:30 AM`

use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

use crate::time_of_day::TimeOfDay;

pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Largest number of years listed on each side of the viewed year.
pub const MAX_YEAR_SPAN: i32 = 100;

/// `June 2024`. Falls back to `%B %Y` when `format` is not a valid `chrono` format.
pub fn format_month_year(view_month: NaiveDate, format: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", view_month.format(format)).is_err() {
        label.clear();
        let _ = write!(label, "{}", view_month.format("%B %Y"));
    }
    label
}

/// Years from `span` before to `span` after the year of `view_month`, ascending.
/// `span` is clamped to `0..=MAX_YEAR_SPAN`.
pub fn year_list(view_month: NaiveDate, span: i32) -> Vec<i32> {
    let year = view_month.year();
    let span = span.clamp(0, MAX_YEAR_SPAN);
    (year.saturating_sub(span)..=year.saturating_add(span)).collect()
}

/// Hour field text, zero padded (`09`).
pub fn format_hour_field(time: &TimeOfDay) -> String {
    format!("{:02}", time.hour12())
}

/// Minute field text, zero padded (`05`).
pub fn format_minute_field(time: &TimeOfDay) -> String {
    format!("{:02}", time.minute())
}

/// `09:30 AM`
pub fn format_time(time: &TimeOfDay) -> String {
    format!(
        "{}:{} {}",
        format_hour_field(time),
        format_minute_field(time),
        time.period()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_of_day::Period;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_label_formats_readably() {
        assert_eq!(format_month_year(d(2024, 6, 1), "%B %Y"), "June 2024");
        assert_eq!(format_month_year(d(2024, 2, 1), "%b '%y"), "Feb '24");
    }

    #[test]
    fn invalid_label_format_falls_back() {
        assert_eq!(format_month_year(d(2024, 6, 1), "%Q %Y"), "June 2024");
    }

    #[test]
    fn year_list_spans_both_sides() {
        let years = year_list(d(2024, 6, 1), 10);
        assert_eq!(years.len(), 21);
        assert_eq!(years.first(), Some(&2014));
        assert_eq!(years.last(), Some(&2034));
        assert_eq!(year_list(d(2024, 6, 1), 0), vec![2024]);
    }

    #[test]
    fn year_list_span_is_capped() {
        let years = year_list(d(2024, 6, 1), i32::MAX);
        assert_eq!(years.len(), 2 * MAX_YEAR_SPAN as usize + 1);
        assert_eq!(years.first(), Some(&1924));
        assert_eq!(year_list(d(2024, 6, 1), -3), vec![2024]);
    }

    #[test]
    fn time_fields_are_zero_padded() {
        let t = TimeOfDay::new(9, 5, Period::Pm);
        assert_eq!(format_hour_field(&t), "09");
        assert_eq!(format_minute_field(&t), "05");
        assert_eq!(format_time(&t), "09:05 PM");
    }
}
