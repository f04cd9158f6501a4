use super::theme::OneDark;
use chrono::{Datelike, NaiveDateTime};
use datepick_core::{DayCell, EffectiveBounds, TimeOfDay, render::WEEKDAY_LABELS};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: config.unwrap_or(RenderOptions { use_color: true }),
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// Month header, weekday row and one line per week.
    pub fn print_month(&self, label: &str, cells: &[DayCell]) {
        if self.opts.use_color {
            self.skin.print_text(&format!("# {label}"));
        } else {
            println!("{label}");
        }

        let header: Vec<String> = WEEKDAY_LABELS.iter().map(|d| format!(" {d} ")).collect();
        let header = header.join("");
        if self.opts.use_color {
            println!("{}", header.with(OneDark::BLUE));
        } else {
            println!("{header}");
        }

        for week in cells.chunks(7) {
            let line: String = week
                .iter()
                .map(|cell| format_cell(cell, self.opts.use_color))
                .collect();
            println!("{line}");
        }

        if !self.opts.use_color {
            println!("[d] selected  (d) today  dx disabled");
        }
    }

    pub fn print_time(&self, time: &TimeOfDay) {
        let text = datepick_core::render::format_time(time);
        if self.opts.use_color {
            println!("Time: {}", text.with(OneDark::GREEN));
        } else {
            println!("Time: {text}");
        }
    }

    pub fn print_bounds(&self, bounds: &EffectiveBounds) {
        let show = |v: Option<NaiveDateTime>| {
            v.map(|v| v.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unbounded".to_string())
        };
        println!("Earliest: {}", show(bounds.min_date));
        println!("Latest:   {}", show(bounds.max_date));
    }

    pub fn print_selection(&self, value: NaiveDateTime) {
        let text = value.format("%A, %d %b %Y %I:%M %p").to_string();
        if self.opts.use_color {
            println!("Selected: {}", text.with(OneDark::YELLOW).bold());
        } else {
            println!("Selected: {text}");
        }
    }
}

/// Four columns per day. Without colors the flags are spelled out with brackets.
fn format_cell(cell: &DayCell, use_color: bool) -> String {
    let day = format!("{:>2}", cell.date.day());
    if use_color {
        let text = format!(" {day} ");
        let styled = if cell.is_disabled {
            text.with(OneDark::GUTTER).crossed_out()
        } else if !cell.is_current_month {
            text.with(OneDark::COMMENT)
        } else if cell.is_today {
            text.with(OneDark::YELLOW).bold()
        } else {
            text.with(OneDark::FG)
        };
        if cell.is_selected {
            styled.negative().to_string()
        } else {
            styled.to_string()
        }
    } else {
        let (open, close) = if cell.is_selected {
            ('[', ']')
        } else if cell.is_today {
            ('(', ')')
        } else if cell.is_disabled {
            (' ', 'x')
        } else {
            (' ', ' ')
        };
        format!("{open}{day}{close}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn mk_cell(day: u32) -> DayCell {
        DayCell {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            is_current_month: true,
            is_today: false,
            is_selected: false,
            is_disabled: false,
        }
    }

    #[test]
    fn plain_cells_mark_flags() {
        assert_eq!(format_cell(&mk_cell(5), false), "  5 ");
        let selected = DayCell {
            is_selected: true,
            is_today: true,
            ..mk_cell(12)
        };
        assert_eq!(format_cell(&selected, false), "[12]");
        let today = DayCell {
            is_today: true,
            ..mk_cell(10)
        };
        assert_eq!(format_cell(&today, false), "(10)");
        let disabled = DayCell {
            is_disabled: true,
            ..mk_cell(9)
        };
        assert_eq!(format_cell(&disabled, false), "  9x");
    }
}
