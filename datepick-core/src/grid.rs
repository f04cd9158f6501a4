//! Month grid for the calendar view.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use crate::dates::{days_in_month, first_of_month, get_dates_in_range, weekday_from_sunday};
use crate::restrictions::{EffectiveBounds, RestrictionSpec, resolve_day_enabled};

/// One entry of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `false` for the padding days borrowed from the neighbouring months.
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Builds the Sunday-to-Saturday grid for the month containing `view_month`.
///
/// The grid is padded with the tail of the previous month and the head of the
/// next one so that it always covers whole weeks: five or six rows for nearly
/// every month, four for a 28-day February starting on a Sunday.
///
/// The result depends only on the arguments; callers may memoize on them.
pub fn build_month(
    view_month: NaiveDate,
    working_date: Option<NaiveDateTime>,
    today: NaiveDate,
    spec: Option<&RestrictionSpec>,
    bounds: &EffectiveBounds,
) -> Vec<DayCell> {
    let first = first_of_month(view_month);
    let day_count = days_in_month(first.year(), first.month());
    let last = first.with_day(day_count).unwrap_or(first);

    let leading = i64::from(weekday_from_sunday(first));
    let trailing = i64::from(6 - weekday_from_sunday(last));
    let start = first
        .checked_sub_signed(TimeDelta::days(leading))
        .unwrap_or(first);
    let end = last
        .checked_add_signed(TimeDelta::days(trailing))
        .unwrap_or(last);

    let selected = working_date.map(|w| w.date());

    get_dates_in_range(start, end)
        .into_iter()
        .map(|date| DayCell {
            date,
            is_current_month: date.year() == first.year() && date.month() == first.month(),
            is_today: date == today,
            is_selected: Some(date) == selected,
            is_disabled: !resolve_day_enabled(spec, date, bounds),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restrictions::resolve_bounds;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn plain(view: NaiveDate) -> Vec<DayCell> {
        build_month(view, None, d(2024, 6, 10), None, &EffectiveBounds::default())
    }

    #[test]
    fn every_month_covers_whole_weeks() {
        for year in [1999, 2000, 2015, 2023, 2024, 2100] {
            for month in 1..=12 {
                let cells = plain(d(year, month, 1));
                assert_eq!(cells.len() % 7, 0, "{year}-{month}");
                assert!(matches!(cells.len(), 28 | 35 | 42), "{year}-{month}");
                assert_eq!(cells[0].date.weekday(), Weekday::Sun);
                assert_eq!(cells[cells.len() - 1].date.weekday(), Weekday::Sat);
                let current = cells.iter().filter(|c| c.is_current_month).count() as u32;
                assert_eq!(current, days_in_month(year, month));
            }
        }
    }

    #[test]
    fn june_2024_is_padded_on_both_sides() {
        // 2024-06-01 is a Saturday, 2024-06-30 a Sunday.
        let cells = plain(d(2024, 6, 17));
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date, d(2024, 5, 26));
        assert!(!cells[0].is_current_month);
        assert_eq!(cells[6].date, d(2024, 6, 1));
        assert!(cells[6].is_current_month);
        assert_eq!(cells[41].date, d(2024, 7, 6));
    }

    #[test]
    fn february_2015_needs_no_padding() {
        let cells = plain(d(2015, 2, 1));
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|c| c.is_current_month));
    }

    #[test]
    fn flags_today_and_selection_by_day() {
        let working = d(2024, 6, 12).and_hms_opt(15, 45, 0);
        let cells = build_month(
            d(2024, 6, 1),
            working,
            d(2024, 6, 10),
            None,
            &EffectiveBounds::default(),
        );
        let today: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, d(2024, 6, 10));
        let selected: Vec<_> = cells.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, d(2024, 6, 12));
    }

    #[test]
    fn no_working_date_selects_nothing() {
        assert!(plain(d(2024, 6, 1)).iter().all(|c| !c.is_selected));
    }

    #[test]
    fn disabled_flags_follow_restrictions() {
        let spec = RestrictionSpec {
            days_back: Some(0),
            days_forward: Some(7),
            ..Default::default()
        };
        let now = d(2024, 6, 10).and_hms_opt(8, 0, 0).unwrap();
        let bounds = resolve_bounds(Some(&spec), now);
        let cells = build_month(d(2024, 6, 1), None, now.date(), Some(&spec), &bounds);
        let enabled: Vec<NaiveDate> = cells
            .iter()
            .filter(|c| !c.is_disabled)
            .map(|c| c.date)
            .collect();
        assert_eq!(enabled, get_dates_in_range(d(2024, 6, 10), d(2024, 6, 17)));
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let a = plain(d(2024, 2, 1));
        let b = plain(d(2024, 2, 29));
        assert_eq!(a, b);
    }
}
