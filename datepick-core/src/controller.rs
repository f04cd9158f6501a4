//! The `SelectionController`: working vs. committed selection and the open/close protocol.
//!
//! The controller owns a [`PickerState`] and is the only thing that mutates it.
//! Derived values (bounds, grid, labels) are recomputed from that state on every
//! call, so they can never go stale.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use log::debug;

use crate::config::Config;
use crate::dates::{first_of_month, shift_months, start_of_day, with_year_clamped};
use crate::grid::{DayCell, build_month};
use crate::render::{format_month_year, year_list};
use crate::restrictions::{
    EffectiveBounds, RestrictionSpec, clamp_time_of_day, resolve_bounds, resolve_day_enabled,
};
use crate::time_of_day::{TimeField, TimeOfDay, WheelDirection};

/// Which face of the open picker is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Calendar,
    YearList,
}

/// Coarse state of the picker as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    Closed,
    OpenCalendarView,
    OpenYearView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerState {
    pub is_open: bool,
    /// The confirmed selection; the only part the embedder keeps.
    pub committed_date: Option<NaiveDateTime>,
    /// Scratch selection while open. Discarded on cancel.
    pub working_date: Option<NaiveDateTime>,
    pub working_time: TimeOfDay,
    /// Always the first day of the displayed month.
    pub view_month: NaiveDate,
    pub view_mode: ViewMode,
}

pub struct SelectionController {
    config: Config,
    state: PickerState,
}

impl SelectionController {
    pub fn new(config: Config) -> Self {
        let now = config
            .reference_now
            .unwrap_or_else(|| Local::now().naive_local());
        Self {
            config,
            state: PickerState {
                is_open: false,
                committed_date: None,
                working_date: None,
                working_time: TimeOfDay::default(),
                view_month: first_of_month(now.date()),
                view_mode: ViewMode::Calendar,
            },
        }
    }

    /// Creates a closed controller holding `committed` as its current value.
    pub fn with_committed(config: Config, committed: Option<NaiveDateTime>) -> Self {
        let mut controller = Self::new(config);
        controller.set_committed_date(committed);
        controller
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> PickerPhase {
        match (self.state.is_open, self.state.view_mode) {
            (false, _) => PickerPhase::Closed,
            (true, ViewMode::Calendar) => PickerPhase::OpenCalendarView,
            (true, ViewMode::YearList) => PickerPhase::OpenYearView,
        }
    }

    pub fn committed_date(&self) -> Option<NaiveDateTime> {
        self.state.committed_date
    }

    pub fn working_date(&self) -> Option<NaiveDateTime> {
        self.state.working_date
    }

    pub fn working_time(&self) -> TimeOfDay {
        self.state.working_time
    }

    pub fn restrictions(&self) -> Option<&RestrictionSpec> {
        self.config.restrictions.as_ref()
    }

    /// "Now" as seen by the picker: the pinned reference instant or the local clock.
    pub fn now(&self) -> NaiveDateTime {
        self.config
            .reference_now
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Replaces the embedder's value. Ignored while the picker is open, since the
    /// working copy was already seeded from the previous value.
    pub fn set_committed_date(&mut self, committed: Option<NaiveDateTime>) {
        if self.state.is_open {
            debug!("set_committed_date ignored while open");
            return;
        }
        self.state.committed_date = committed;
    }

    /// Replaces the restrictions and, if the picker is open, re-applies them to the working value.
    pub fn set_restrictions(&mut self, restrictions: Option<RestrictionSpec>) {
        self.config.restrictions = restrictions;
        if self.state.is_open {
            self.enforce_time_restrictions();
        }
    }

    pub fn effective_bounds(&self) -> EffectiveBounds {
        resolve_bounds(self.restrictions(), self.now())
    }

    /// The grid for the displayed month, rebuilt from scratch.
    pub fn calendar_days(&self) -> Vec<DayCell> {
        let now = self.now();
        let bounds = resolve_bounds(self.restrictions(), now);
        build_month(
            self.state.view_month,
            self.state.working_date,
            now.date(),
            self.restrictions(),
            &bounds,
        )
    }

    pub fn month_year_label(&self) -> String {
        format_month_year(self.state.view_month, &self.config.month_label_format)
    }

    pub fn years(&self) -> Vec<i32> {
        year_list(self.state.view_month, self.config.year_span)
    }

    /// Closed → calendar view. Seeds the working selection from the committed value.
    pub fn open(&mut self) {
        if self.state.is_open {
            return;
        }
        let now = self.now();
        let committed = self.state.committed_date;

        self.state.working_date = committed;
        self.state.view_month = first_of_month(committed.unwrap_or(now).date());
        self.state.working_time = match committed {
            Some(c) => TimeOfDay::from_naive_time(c.time()),
            None if self.config.seed_time_from_clock => TimeOfDay::from_naive_time(now.time()),
            None => TimeOfDay::default(),
        };
        self.state.view_mode = ViewMode::Calendar;
        self.state.is_open = true;
        self.enforce_time_restrictions();

        // the bounds clamp may have moved the working day into another month
        if let Some(working) = self.state.working_date {
            self.state.view_month = first_of_month(working.date());
        }
        debug!("picker opened on {}", self.state.view_month.format("%Y-%m"));
    }

    pub fn toggle_year_view(&mut self) {
        if !self.state.is_open {
            return;
        }
        self.state.view_mode = match self.state.view_mode {
            ViewMode::Calendar => ViewMode::YearList,
            ViewMode::YearList => ViewMode::Calendar,
        };
    }

    /// Moves the displayed month by `delta` months. The view always stays anchored on day 1.
    pub fn navigate_month(&mut self, delta: i32) {
        if self.phase() != PickerPhase::OpenCalendarView {
            return;
        }
        if let Some(shifted) = shift_months(start_of_day(self.state.view_month), delta) {
            self.state.view_month = first_of_month(shifted.date());
        }
    }

    /// Picks `cell`'s day, keeping the working time of day. Disabled days are ignored.
    ///
    /// The day is checked against the current restrictions, not the cell's own
    /// flag, which may come from a grid built before the restrictions changed.
    pub fn select_day(&mut self, cell: &DayCell) {
        if self.phase() != PickerPhase::OpenCalendarView {
            return;
        }
        if !self.is_day_enabled(cell.date) {
            debug!("select_day ignored: {} is disabled", cell.date);
            return;
        }
        self.state.working_date = Some(cell.date.and_time(self.state.working_time.to_naive_time()));
        self.enforce_time_restrictions();
    }

    /// Year view → calendar view, moving both the view and the working date to `year`.
    /// The working date stays where it was when its counterpart in `year` is disabled.
    pub fn select_year(&mut self, year: i32) {
        if self.phase() != PickerPhase::OpenYearView {
            return;
        }
        if let Some(view) = self.state.view_month.with_year(year) {
            self.state.view_month = view;
        }
        if let Some(working) = self.state.working_date {
            let moved = with_year_clamped(working, year);
            if self.is_day_enabled(moved.date()) {
                self.state.working_date = Some(moved);
            } else {
                debug!("select_year kept working date: {} is disabled", moved.date());
            }
        }
        self.state.view_mode = ViewMode::Calendar;
        self.enforce_time_restrictions();
    }

    /// Applies raw hour/minute values from the time fields.
    pub fn edit_time(&mut self, hour: f64, minute: f64) {
        if !self.state.is_open {
            return;
        }
        self.state.working_time = self.state.working_time.sanitize(hour, minute);
        self.enforce_time_restrictions();
    }

    /// Same as [`edit_time`](Self::edit_time) for unparsed field text.
    pub fn edit_time_text(&mut self, hour: &str, minute: &str) {
        if !self.state.is_open {
            return;
        }
        self.state.working_time = self.state.working_time.sanitize_text(hour, minute);
        self.enforce_time_restrictions();
    }

    pub fn wheel_adjust_time(&mut self, field: TimeField, direction: WheelDirection) {
        if !self.state.is_open {
            return;
        }
        self.state.working_time = self.state.working_time.wheel_adjust(field, direction);
        self.enforce_time_restrictions();
    }

    pub fn toggle_period(&mut self) {
        if !self.state.is_open {
            return;
        }
        self.state.working_time = self.state.working_time.toggle_period();
        self.enforce_time_restrictions();
    }

    /// Commits the working selection and closes.
    ///
    /// Returns the newly committed value, or `None` when no day was picked or the
    /// picked day is disabled under the current restrictions. The picker closes
    /// either way and the previous committed value is kept.
    pub fn confirm(&mut self) -> Option<NaiveDateTime> {
        if !self.state.is_open {
            return None;
        }
        let working = self
            .state
            .working_date
            .filter(|w| self.is_day_enabled(w.date()));
        let confirmed = working.map(|working| {
            let combined = working
                .date()
                .and_time(self.state.working_time.to_naive_time());
            let bounds = self.effective_bounds();
            clamp_time_of_day(self.restrictions(), combined, &bounds)
        });
        if let Some(value) = confirmed {
            self.state.committed_date = Some(value);
            debug!("picker confirmed {value}");
        }
        self.close();
        confirmed
    }

    /// Closes without touching the committed value.
    pub fn cancel(&mut self) {
        if !self.state.is_open {
            return;
        }
        debug!("picker cancelled");
        self.close();
    }

    fn is_day_enabled(&self, day: NaiveDate) -> bool {
        resolve_day_enabled(self.restrictions(), day, &self.effective_bounds())
    }

    fn close(&mut self) {
        self.state.is_open = false;
        self.state.view_mode = ViewMode::Calendar;
        self.state.working_date = None;
    }

    /// Re-applies the time window and date bounds to the working selection.
    ///
    /// With a working day, the day and the working time are combined, clamped and
    /// both written back. Without one, only the `min_time`/`max_time` window can
    /// apply, directly to the time fields.
    fn enforce_time_restrictions(&mut self) {
        let spec = self.config.restrictions.as_ref();
        match self.state.working_date {
            Some(working) => {
                let combined = working
                    .date()
                    .and_time(self.state.working_time.to_naive_time());
                let bounds = resolve_bounds(spec, self.now());
                let clamped = clamp_time_of_day(spec, combined, &bounds);
                self.state.working_date = Some(clamped);
                self.state.working_time = TimeOfDay::from_naive_time(clamped.time());
            }
            None => {
                if let Some(spec) = spec {
                    let minutes = self.state.working_time.minutes_since_midnight();
                    let clamped = spec.clamp_minutes(minutes);
                    if clamped != minutes {
                        self.state.working_time = TimeOfDay::from_minutes_since_midnight(clamped);
                    }
                }
            }
        }
    }
}
