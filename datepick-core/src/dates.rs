use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Accepted textual date-time formats (parsing only), tried in order.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Generates a vector of `NaiveDate`s, inclusive of the start and end dates.
/// If `start` is after `end`, the resulting vector will be empty.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use datepick_core::dates::get_dates_in_range;
/// let start_date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
/// let end_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let dates = get_dates_in_range(start_date, end_date);
///
/// assert_eq!(dates.len(), 3);
/// assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn get_dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// `00:00:00.000` of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `23:59:59.999` of `date`.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time"))
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the given month (1-based). Out-of-range months yield 0.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year.
        None => 31,
    }
}

/// Weekday index with Sunday as 0 and Saturday as 6.
pub fn weekday_from_sunday(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Moves `value` by a signed number of days. `None` when the result leaves chrono's range.
pub fn shift_days(value: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    value.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Moves `value` by a signed number of calendar months.
///
/// The day of month is clamped to the last valid day of the target month, so
/// stepping back one month from March 31 lands on February 29 in leap years and
/// February 28 otherwise. The time of day is untouched.
///
/// ```
/// # use chrono::NaiveDate;
/// # use datepick_core::dates::{shift_months, start_of_day};
/// let march_31 = start_of_day(NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
/// let feb = shift_months(march_31, -1).unwrap();
/// assert_eq!(feb.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
/// ```
pub fn shift_months(value: NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    let step = Months::new(months.unsigned_abs());
    if months >= 0 {
        value.checked_add_months(step)
    } else {
        value.checked_sub_months(step)
    }
}

/// Moves `value` by a signed number of years, with the same clamping as [`shift_months`]
/// (February 29 becomes February 28 in a common year).
pub fn shift_years(value: NaiveDateTime, years: i32) -> Option<NaiveDateTime> {
    shift_months(value, years.checked_mul(12)?)
}

/// Replaces the year of `value`, clamping February 29 to February 28 when needed.
pub fn with_year_clamped(value: NaiveDateTime, year: i32) -> NaiveDateTime {
    year.checked_sub(value.year())
        .and_then(|delta| shift_years(value, delta))
        .unwrap_or(value)
}

/// Parses a date or date-time string. A bare date resolves to the start of that day.
pub fn parse_date_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| parse_date(input).map(start_of_day))
}

/// Parses a day-granularity date string.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn range_is_empty_when_start_after_end() {
        assert!(get_dates_in_range(d(2024, 6, 2), d(2024, 6, 1)).is_empty());
    }

    #[test]
    fn day_bounds_cover_whole_day() {
        let day = d(2024, 6, 10);
        assert_eq!(start_of_day(day).time(), NaiveTime::MIN);
        let end = end_of_day(day);
        assert_eq!(end.date(), day);
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.nanosecond(), 999_000_000);
    }

    #[test]
    fn days_in_month_is_leap_aware() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn weekday_starts_on_sunday() {
        assert_eq!(weekday_from_sunday(d(2024, 6, 9)), 0); // Sunday
        assert_eq!(weekday_from_sunday(d(2024, 6, 15)), 6); // Saturday
    }

    #[test]
    fn month_shift_clamps_to_last_valid_day() {
        let leap = start_of_day(d(2024, 3, 31));
        assert_eq!(shift_months(leap, -1).unwrap().date(), d(2024, 2, 29));
        let common = start_of_day(d(2023, 3, 31));
        assert_eq!(shift_months(common, -1).unwrap().date(), d(2023, 2, 28));
        let jan = start_of_day(d(2024, 1, 31));
        assert_eq!(shift_months(jan, 1).unwrap().date(), d(2024, 2, 29));
        assert_eq!(shift_months(jan, -13).unwrap().date(), d(2022, 12, 31));
    }

    #[test]
    fn year_shift_clamps_leap_day() {
        let leap_day = start_of_day(d(2024, 2, 29));
        assert_eq!(shift_years(leap_day, 1).unwrap().date(), d(2025, 2, 28));
        assert_eq!(with_year_clamped(leap_day, 2028).date(), d(2028, 2, 29));
        assert_eq!(with_year_clamped(leap_day, 2023).date(), d(2023, 2, 28));
    }

    #[test]
    fn shifts_out_of_range_yield_none() {
        let now = start_of_day(d(2024, 6, 10));
        assert!(shift_days(now, i64::MAX).is_none());
        assert!(shift_years(now, i32::MAX).is_none());
    }

    #[test]
    fn parse_accepts_dates_and_date_times() {
        assert_eq!(parse_date_time("2024-06-10"), Some(start_of_day(d(2024, 6, 10))));
        assert_eq!(
            parse_date_time("2024-06-10 18:30"),
            Some(d(2024, 6, 10).and_hms_opt(18, 30, 0).unwrap())
        );
        assert_eq!(
            parse_date_time("2024-06-10T07:05"),
            Some(d(2024, 6, 10).and_hms_opt(7, 5, 0).unwrap())
        );
        assert_eq!(parse_date("20240610"), Some(d(2024, 6, 10)));
        assert_eq!(parse_date_time("not a date"), None);
    }
}
