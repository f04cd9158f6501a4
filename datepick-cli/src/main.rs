mod cli;
mod render;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDateTime, NaiveTime};
use clap::Parser;
use cli::Cli;
use datepick_core::{Config, SelectionController, dates::parse_date_time};
use log::debug;
use render::{RenderOptions, Renderer};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("datepick: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(now) = cli.now.as_deref() {
        config.reference_now = Some(parse_value("--now", now)?);
    }

    let renderer = Renderer::new(Some(RenderOptions {
        use_color: cli.color.use_color(),
    }));

    let committed = resolve_committed(&cli)?;
    let mut picker = SelectionController::with_committed(config, committed);
    picker.open();

    if let Some(year) = cli.year {
        picker.toggle_year_view();
        picker.select_year(year);
    }
    if cli.month != 0 {
        picker.navigate_month(cli.month);
    }

    if let Some(day) = cli.pick {
        let cell = picker
            .calendar_days()
            .into_iter()
            .find(|c| c.is_current_month && c.date.day() == day);
        match cell {
            Some(cell) if cell.is_disabled => {
                renderer.print_info(&format!("{} is not selectable.", cell.date));
            }
            Some(cell) => picker.select_day(&cell),
            None => renderer.print_info(&format!(
                "There is no day {day} in {}.",
                picker.month_year_label()
            )),
        }
    }

    if let Some(time) = cli.time.as_deref() {
        let (hour, minute) = time.split_once(':').unwrap_or((time, "0"));
        picker.edit_time_text(hour, minute);
    }
    if let Some(period) = cli.period {
        if picker.working_time().period() != period {
            picker.toggle_period();
        }
    }
    for step in &cli.wheel {
        let (field, direction) = step.as_parts();
        picker.wheel_adjust_time(field, direction);
    }

    renderer.print_month(&picker.month_year_label(), &picker.calendar_days());
    renderer.print_time(&picker.working_time());
    if cli.bounds {
        renderer.print_bounds(&picker.effective_bounds());
    }

    if cli.pick.is_some() {
        match picker.confirm() {
            Some(value) => renderer.print_selection(value),
            None => renderer.print_info("Nothing selected."),
        }
    } else {
        debug!("no --pick given, leaving the committed value untouched");
        picker.cancel();
    }

    Ok(())
}

fn resolve_committed(cli: &Cli) -> Result<Option<NaiveDateTime>> {
    let Some(on) = cli.on.as_deref() else {
        return Ok(None);
    };
    let date = parse_value("--on", on)?;
    match cli.at.as_deref() {
        Some(at) => {
            let time = NaiveTime::parse_from_str(at.trim(), "%H:%M")
                .with_context(|| format!("invalid --at value '{at}', expected HH:MM"))?;
            Ok(Some(date.date().and_time(time)))
        }
        None => Ok(Some(date)),
    }
}

fn parse_value(flag: &str, value: &str) -> Result<NaiveDateTime> {
    parse_date_time(value).ok_or_else(|| {
        anyhow!("invalid {flag} value '{value}', expected YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"")
    })
}
