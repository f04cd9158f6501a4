pub mod config;
pub mod controller;
pub mod dates;
pub mod grid;
pub mod render;
pub mod restrictions;
pub mod time_of_day;

pub use config::Config;
pub use controller::{PickerPhase, PickerState, SelectionController, ViewMode};
pub use grid::{DayCell, build_month};
pub use restrictions::{
    EffectiveBounds, RestrictionSpec, clamp_time_of_day, resolve_bounds, resolve_day_enabled,
};
pub use time_of_day::{Period, TimeField, TimeOfDay, WheelDirection};
