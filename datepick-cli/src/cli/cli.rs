use clap::{Parser, ValueEnum};
use datepick_core::{Period, TimeField, WheelDirection};
use std::path::PathBuf;

use crate::render::ColorMode;

/// datepick — constraint-aware date/time picker in your terminal
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Read settings and restrictions from this TOML file instead of the default locations.
    #[arg(long, env = "DATEPICK_CONFIG")]
    pub config: Option<PathBuf>,
    /// Currently committed date (e.g. `--on 2024-06-10`, `--on "2024-06-10 18:30"`).
    #[arg(long)]
    pub on: Option<String>,
    /// Time of day for the committed date (e.g. `--on 2024-06-10 --at 18:30`).
    #[arg(long, requires = "on")]
    pub at: Option<String>,
    /// Pretend the clock reads this date-time. Affects relative restrictions and today's highlight.
    #[arg(long)]
    pub now: Option<String>,
    /// Move the view this many months after opening (e.g. `--month -1`).
    #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
    pub month: i32,
    /// Jump the view to this year through the year list.
    #[arg(long)]
    pub year: Option<i32>,
    /// Pick this day of the viewed month and confirm the result.
    #[arg(long, short)]
    pub pick: Option<u32>,
    /// Type into the time fields, `H:MM` on a 12-hour clock (e.g. `--time 9:30`).
    #[arg(long, short)]
    pub time: Option<String>,
    /// Switch the period field to AM or PM.
    #[arg(long, value_parser = parse_period)]
    pub period: Option<Period>,
    /// Scroll the time fields, one step per occurrence (e.g. `--wheel hour-up --wheel minute-down`).
    #[arg(long, value_enum)]
    pub wheel: Vec<WheelStep>,
    /// Also print the effective min/max bounds.
    #[arg(long, short)]
    pub bounds: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum WheelStep {
    HourUp,
    HourDown,
    MinuteUp,
    MinuteDown,
}

impl WheelStep {
    pub fn as_parts(self) -> (TimeField, WheelDirection) {
        match self {
            WheelStep::HourUp => (TimeField::Hour, WheelDirection::Up),
            WheelStep::HourDown => (TimeField::Hour, WheelDirection::Down),
            WheelStep::MinuteUp => (TimeField::Minute, WheelDirection::Up),
            WheelStep::MinuteDown => (TimeField::Minute, WheelDirection::Down),
        }
    }
}

fn parse_period(s: &str) -> Result<Period, String> {
    s.parse::<Period>()
        .map_err(|_| format!("expected AM or PM, got '{s}'"))
}
