//! Collapses a [`RestrictionSpec`] into a single min/max window plus per-day checks.
//!
//! Nothing in here fails: absent fields are skipped, malformed `"HH:mm"` strings
//! are ignored and offsets that overflow the calendar simply produce no bound.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dates::{end_of_day, shift_days, shift_months, shift_years, start_of_day};
use crate::time_of_day::MINUTES_PER_DAY;

/// Declarative constraints on what the picker may select. Every field is optional
/// and combines freely with the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestrictionSpec {
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    pub days_back: Option<i64>,
    pub days_forward: Option<i64>,
    pub weeks_back: Option<i64>,
    pub weeks_forward: Option<i64>,
    pub months_back: Option<i32>,
    pub months_forward: Option<i32>,
    pub years_back: Option<i32>,
    pub years_forward: Option<i32>,
    /// Nothing later than "now".
    pub past_only: bool,
    /// Nothing earlier than "now".
    pub future_only: bool,
    pub disabled_dates: Vec<NaiveDate>,
    /// Earliest selectable wall-clock time on any day, `"HH:mm"`.
    pub min_time: Option<String>,
    /// Latest selectable wall-clock time on any day, `"HH:mm"`.
    pub max_time: Option<String>,
}

/// The single window produced by collapsing every configured bound.
/// `None` on either side means that side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectiveBounds {
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
}

impl EffectiveBounds {
    /// Clamps `value` into the window, applying the lower bound first.
    pub fn clamp(&self, value: NaiveDateTime) -> NaiveDateTime {
        let mut value = value;
        if let Some(min) = self.min_date {
            if value < min {
                value = min;
            }
        }
        if let Some(max) = self.max_date {
            if value > max {
                value = max;
            }
        }
        value
    }
}

impl RestrictionSpec {
    /// Parsed `(min_time, max_time)` as minutes since midnight. Malformed values are `None`.
    pub fn time_window(&self) -> (Option<u32>, Option<u32>) {
        (
            self.min_time.as_deref().and_then(parse_hhmm),
            self.max_time.as_deref().and_then(parse_hhmm),
        )
    }

    /// Snaps a minutes-since-midnight value into the `min_time`/`max_time` window.
    pub fn clamp_minutes(&self, minutes: u32) -> u32 {
        let (min, max) = self.time_window();
        let mut minutes = minutes;
        if let Some(min) = min {
            if minutes < min {
                minutes = min;
            }
        }
        if let Some(max) = max {
            if minutes > max {
                minutes = max;
            }
        }
        minutes
    }

    fn is_disabled_date(&self, day: NaiveDate) -> bool {
        self.disabled_dates.iter().any(|d| *d == day)
    }
}

static HHMM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").unwrap());

/// Parses `"HH:mm"` (a single-digit hour is accepted) into minutes since midnight.
pub fn parse_hhmm(input: &str) -> Option<u32> {
    let caps = HHMM.captures(input)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Resolves the effective min/max window for `now`.
///
/// Lower candidates are `min_date`, today's start moved back by each of the
/// `*_back` offsets, and `now` when `future_only` is set; the latest one wins.
/// Upper candidates mirror them from the end of today (`23:59:59.999`) with the
/// `*_forward` offsets, `max_date` and `now` for `past_only`; the earliest one wins.
///
/// The result is not validated: a lower bound past the upper bound is returned
/// as is and simply leaves every day disabled.
pub fn resolve_bounds(spec: Option<&RestrictionSpec>, now: NaiveDateTime) -> EffectiveBounds {
    let Some(spec) = spec else {
        return EffectiveBounds::default();
    };
    let today_start = start_of_day(now.date());
    let today_end = end_of_day(now.date());

    let lower = [
        spec.min_date,
        spec.days_back
            .and_then(|n| n.checked_neg())
            .and_then(|n| shift_days(today_start, n)),
        spec.weeks_back
            .and_then(|n| n.checked_mul(-7))
            .and_then(|n| shift_days(today_start, n)),
        spec.months_back
            .and_then(|n| n.checked_neg())
            .and_then(|n| shift_months(today_start, n)),
        spec.years_back
            .and_then(|n| n.checked_neg())
            .and_then(|n| shift_years(today_start, n)),
        spec.future_only.then_some(now),
    ];
    let upper = [
        spec.max_date,
        spec.days_forward.and_then(|n| shift_days(today_end, n)),
        spec.weeks_forward
            .and_then(|n| n.checked_mul(7))
            .and_then(|n| shift_days(today_end, n)),
        spec.months_forward.and_then(|n| shift_months(today_end, n)),
        spec.years_forward.and_then(|n| shift_years(today_end, n)),
        spec.past_only.then_some(now),
    ];

    EffectiveBounds {
        min_date: lower.into_iter().flatten().max(),
        max_date: upper.into_iter().flatten().min(),
    }
}

/// Whether `day` can be picked: it must overlap the bounds window and must not be
/// listed in `disabled_dates`.
pub fn resolve_day_enabled(
    spec: Option<&RestrictionSpec>,
    day: NaiveDate,
    bounds: &EffectiveBounds,
) -> bool {
    if let Some(min) = bounds.min_date {
        if end_of_day(day) < min {
            return false;
        }
    }
    if let Some(max) = bounds.max_date {
        if start_of_day(day) > max {
            return false;
        }
    }
    !spec.is_some_and(|s| s.is_disabled_date(day))
}

/// Pulls `value` inside the configured time-of-day window, then inside `bounds`.
///
/// When the minutes since midnight fall outside `min_time`/`max_time`, the time
/// component is replaced by the bound (seconds zeroed) and the day is kept.
pub fn clamp_time_of_day(
    spec: Option<&RestrictionSpec>,
    value: NaiveDateTime,
    bounds: &EffectiveBounds,
) -> NaiveDateTime {
    let mut value = value;
    if let Some(spec) = spec {
        let minutes = value.hour() * 60 + value.minute();
        let clamped = spec.clamp_minutes(minutes);
        if clamped != minutes {
            value = value.date().and_time(minutes_to_time(clamped));
        }
    }
    bounds.clamp(value)
}

fn minutes_to_time(minutes: u32) -> NaiveTime {
    let minutes = minutes.min(MINUTES_PER_DAY - 1);
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}
