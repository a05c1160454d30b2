//! Charts module - Scales, tooltips, animation and static rendering

mod renderer;
mod scale;
mod tooltip;
mod transition;

pub use renderer::{ChartRenderer, RenderError, INACTIVE_LABEL, MARKER_FILL, MARKER_STROKE};
pub use scale::{LinearScale, NICE_TICK_COUNT};
pub use tooltip::{format_value, metric_line, tooltip_text};
pub use transition::{ease_cubic_in_out, Transition};
