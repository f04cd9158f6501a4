use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use directories::BaseDirs;
use log::warn;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::dates::{parse_date, parse_date_time};
use crate::render::MAX_YEAR_SPAN;
use crate::restrictions::{RestrictionSpec, parse_hhmm};

const DEFAULT_MONTH_LABEL_FORMAT: &str = "%B %Y";
const DEFAULT_YEAR_SPAN: i32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Constraints applied to every selection. `None` leaves the picker unconstrained.
    pub restrictions: Option<RestrictionSpec>,
    /// `chrono` format used for the month header (e.g. `"%B %Y"` → `June 2024`).
    pub month_label_format: String,
    /// When opening without a committed date, seed the time fields from the clock
    /// instead of 12:00 AM.
    pub seed_time_from_clock: bool,
    /// Years listed on each side of the viewed year in the year list, at most [`MAX_YEAR_SPAN`].
    pub year_span: i32,
    /// Pins "now" for relative restrictions and today's highlight. `None` reads the local clock.
    pub reference_now: Option<NaiveDateTime>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restrictions: None,
            month_label_format: DEFAULT_MONTH_LABEL_FORMAT.to_string(),
            seed_time_from_clock: true,
            year_span: DEFAULT_YEAR_SPAN,
            reference_now: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    month_label_format: Option<String>,
    seed_time_from_clock: Option<bool>,
    year_span: Option<i32>,
    /// Optional table:
    /// [restrictions]
    /// days_forward = 30
    /// min_time = "09:00"
    restrictions: Option<FileRestrictions>,
}

#[derive(Debug, Default, Deserialize)]
struct FileRestrictions {
    min_date: Option<String>,
    max_date: Option<String>,
    days_back: Option<i64>,
    days_forward: Option<i64>,
    weeks_back: Option<i64>,
    weeks_forward: Option<i64>,
    months_back: Option<i32>,
    months_forward: Option<i32>,
    years_back: Option<i32>,
    years_forward: Option<i32>,
    past_only: Option<bool>,
    future_only: Option<bool>,
    disabled_dates: Option<Vec<String>>,
    min_time: Option<String>,
    max_time: Option<String>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    /// A missing or broken file falls back to the defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    /// Load config from an explicit path. Unlike [`Config::load`], read and parse errors are returned.
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            restrictions: file_config.restrictions.map(Self::build_restrictions),
            month_label_format: file_config
                .month_label_format
                .unwrap_or(defaults.month_label_format),
            seed_time_from_clock: file_config
                .seed_time_from_clock
                .unwrap_or(defaults.seed_time_from_clock),
            year_span: Self::check_year_span(file_config.year_span.unwrap_or(defaults.year_span)),
            reference_now: None,
        }
    }

    /// Converts the raw `[restrictions]` table. Values that don't parse are dropped
    /// with a warning, leaving the rest of the table in effect.
    fn build_restrictions(raw: FileRestrictions) -> RestrictionSpec {
        let disabled_dates = raw
            .disabled_dates
            .unwrap_or_default()
            .iter()
            .filter_map(|s| {
                let date = parse_date(s);
                if date.is_none() {
                    warn!("restrictions.disabled_dates: ignoring '{s}'");
                }
                date
            })
            .collect();

        RestrictionSpec {
            min_date: Self::parse_bound("min_date", raw.min_date),
            max_date: Self::parse_bound("max_date", raw.max_date),
            days_back: raw.days_back,
            days_forward: raw.days_forward,
            weeks_back: raw.weeks_back,
            weeks_forward: raw.weeks_forward,
            months_back: raw.months_back,
            months_forward: raw.months_forward,
            years_back: raw.years_back,
            years_forward: raw.years_forward,
            past_only: raw.past_only.unwrap_or(false),
            future_only: raw.future_only.unwrap_or(false),
            disabled_dates,
            min_time: Self::check_time("min_time", raw.min_time),
            max_time: Self::check_time("max_time", raw.max_time),
        }
    }

    fn check_year_span(span: i32) -> i32 {
        let clamped = span.clamp(0, MAX_YEAR_SPAN);
        if clamped != span {
            warn!("year_span: {span} out of range, using {clamped}");
        }
        clamped
    }

    fn parse_bound(field: &str, value: Option<String>) -> Option<NaiveDateTime> {
        let value = value?;
        let parsed = parse_date_time(&value);
        if parsed.is_none() {
            warn!("restrictions.{field}: ignoring '{value}'");
        }
        parsed
    }

    fn check_time(field: &str, value: Option<String>) -> Option<String> {
        let value = value?;
        if parse_hhmm(&value).is_none() {
            warn!("restrictions.{field}: ignoring '{value}', expected HH:mm");
            return None;
        }
        Some(value)
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("datepick")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("datepick").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    /// Test helper to create a `Config` pinned to a reference instant.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(
        restrictions: Option<RestrictionSpec>,
        reference_now: NaiveDateTime,
    ) -> Config {
        Config {
            restrictions,
            month_label_format: "%B %Y".to_string(),
            seed_time_from_clock: false,
            year_span: 10,
            reference_now: Some(reference_now),
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("datepick")
                .join("config.toml");
            let expected_native = b.config_dir().join("datepick").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.get(0), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let fc = super::Config::parse_file("").unwrap();
        let config = super::Config::from_file_config(fc);
        assert!(config.restrictions.is_none());
        assert_eq!(config.month_label_format, "%B %Y");
        assert!(config.seed_time_from_clock);
        assert_eq!(config.year_span, 10);
    }

    #[test]
    fn parse_file_reads_restrictions_table() {
        let toml = r#"
            month_label_format = "%b %Y"
            seed_time_from_clock = false

            [restrictions]
            min_date = "2024-01-01"
            max_date = "2024-12-31 18:00"
            days_forward = 30
            future_only = true
            disabled_dates = ["2024-06-12", "2024-06-13"]
            min_time = "09:00"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        let config = super::Config::from_file_config(fc);
        assert_eq!(config.month_label_format, "%b %Y");
        assert!(!config.seed_time_from_clock);

        let r = config.restrictions.unwrap();
        assert_eq!(
            r.min_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(
            r.max_date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap().and_hms_opt(18, 0, 0)
        );
        assert_eq!(r.days_forward, Some(30));
        assert!(r.future_only);
        assert!(!r.past_only);
        assert_eq!(r.disabled_dates.len(), 2);
        assert_eq!(r.min_time.as_deref(), Some("09:00"));
        assert_eq!(r.max_time, None);
    }

    #[test]
    fn malformed_restriction_values_are_dropped() {
        let toml = r#"
            [restrictions]
            min_date = "yesterday-ish"
            days_back = 2
            disabled_dates = ["2024-06-12", "not-a-date"]
            min_time = "9am"
            max_time = "17:30"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        let r = super::Config::from_file_config(fc).restrictions.unwrap();
        assert_eq!(r.min_date, None);
        assert_eq!(r.days_back, Some(2));
        assert_eq!(
            r.disabled_dates,
            vec![NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()]
        );
        assert_eq!(r.min_time, None);
        assert_eq!(r.max_time.as_deref(), Some("17:30"));
    }

    #[test]
    fn out_of_range_year_span_is_clamped() {
        let fc = super::Config::parse_file("year_span = -3").unwrap();
        assert_eq!(super::Config::from_file_config(fc).year_span, 0);

        let fc = super::Config::parse_file("year_span = 2000000000").unwrap();
        assert_eq!(super::Config::from_file_config(fc).year_span, MAX_YEAR_SPAN);
    }

    #[test]
    fn load_from_reads_file_and_reports_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[restrictions]\npast_only = true").unwrap();
        let config = super::Config::load_from(file.path()).unwrap();
        assert!(config.restrictions.unwrap().past_only);

        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "year_span = \"many\"").unwrap();
        let err = super::Config::load_from(broken.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));

        let dir = tempfile::tempdir().unwrap();
        assert!(super::Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
