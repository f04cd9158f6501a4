//! 12-hour clock value used by the picker's time fields.

use chrono::{NaiveTime, Timelike};
use strum_macros::{Display, EnumString};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Period {
    #[default]
    Am,
    Pm,
}

impl Period {
    pub fn toggled(self) -> Self {
        match self {
            Period::Am => Period::Pm,
            Period::Pm => Period::Am,
        }
    }
}

/// Which time field a scroll-wheel step applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hour,
    Minute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
}

/// A time of day on a 12-hour clock.
///
/// `hour12` is always within `1..=12` and `minute` within `0..=59`; every
/// constructor sanitizes its input instead of rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour12: u32,
    minute: u32,
    period: Period,
}

impl Default for TimeOfDay {
    /// 12:00 AM.
    fn default() -> Self {
        Self {
            hour12: 12,
            minute: 0,
            period: Period::Am,
        }
    }
}

impl TimeOfDay {
    pub fn new(hour12: u32, minute: u32, period: Period) -> Self {
        Self {
            hour12: hour12.clamp(1, 12),
            minute: minute.min(59),
            period,
        }
    }

    pub fn hour12(&self) -> u32 {
        self.hour12
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Clamps raw hour/minute field values into range, keeping the current period.
    ///
    /// NaN or anything below 1 becomes hour 1, anything above 12 becomes 12.
    /// NaN or a negative minute becomes 0, anything above 59 becomes 59.
    /// Fractions are truncated.
    pub fn sanitize(&self, hour: f64, minute: f64) -> Self {
        Self {
            hour12: clamp_field(hour, 1, 12),
            minute: clamp_field(minute, 0, 59),
            period: self.period,
        }
    }

    /// [`sanitize`](Self::sanitize) over raw text field contents. Unparsable text counts as NaN.
    pub fn sanitize_text(&self, hour: &str, minute: &str) -> Self {
        self.sanitize(parse_field(hour), parse_field(minute))
    }

    /// Hour on a 24-hour clock (`0..=23`).
    pub fn to_24_hour(&self) -> u32 {
        match (self.hour12, self.period) {
            (12, Period::Am) => 0,
            (h, Period::Pm) if h != 12 => h + 12,
            (h, _) => h,
        }
    }

    pub fn from_24_hour(hour24: u32, minute: u32) -> Self {
        let hour24 = hour24.min(23);
        let period = if hour24 >= 12 { Period::Pm } else { Period::Am };
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        Self {
            hour12,
            minute: minute.min(59),
            period,
        }
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.to_24_hour() * 60 + self.minute
    }

    pub fn from_minutes_since_midnight(minutes: u32) -> Self {
        let minutes = minutes.min(MINUTES_PER_DAY - 1);
        Self::from_24_hour(minutes / 60, minutes % 60)
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self::from_24_hour(time.hour(), time.minute())
    }

    /// Wall-clock time with seconds zeroed.
    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.to_24_hour(), self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// One scroll-wheel step on `field`. Hours wrap within `1..=12`, minutes within
    /// `0..=59`; the period never changes.
    pub fn wheel_adjust(&self, field: TimeField, direction: WheelDirection) -> Self {
        let mut next = *self;
        match (field, direction) {
            (TimeField::Hour, WheelDirection::Up) => {
                next.hour12 = if self.hour12 >= 12 { 1 } else { self.hour12 + 1 };
            }
            (TimeField::Hour, WheelDirection::Down) => {
                next.hour12 = if self.hour12 <= 1 { 12 } else { self.hour12 - 1 };
            }
            (TimeField::Minute, WheelDirection::Up) => {
                next.minute = if self.minute >= 59 { 0 } else { self.minute + 1 };
            }
            (TimeField::Minute, WheelDirection::Down) => {
                next.minute = if self.minute == 0 { 59 } else { self.minute - 1 };
            }
        }
        next
    }

    pub fn with_period(&self, period: Period) -> Self {
        Self { period, ..*self }
    }

    pub fn toggle_period(&self) -> Self {
        self.with_period(self.period.toggled())
    }
}

fn clamp_field(value: f64, low: u32, high: u32) -> u32 {
    if value.is_nan() || value < f64::from(low) {
        low
    } else if value > f64::from(high) {
        high
    } else {
        value.trunc() as u32
    }
}

fn parse_field(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}
