//! Embassy task implementations

mod touch;
mod ui;

pub use touch::touch_task;
pub use ui::{ui_task, PanelDisplay};
