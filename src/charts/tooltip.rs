//! Tooltip text for hovered markers.

use crate::data::{Metric, Record, ValueStyle};

/// Format a metric value the way the axis reads it.
pub fn format_value(metric: Metric, value: f64) -> String {
    match metric.value_style() {
        ValueStyle::Percent => format!("{}%", value),
        ValueStyle::Currency => format!("${}", value),
        ValueStyle::Plain => format!("{}", value),
    }
}

/// One `"<prefix> <value>"` tooltip line.
pub fn metric_line(metric: Metric, value: f64) -> String {
    format!("{} {}", metric.tooltip_prefix(), format_value(metric, value))
}

/// Hover content: label, X metric, Y metric (always a percentage).
pub fn tooltip_text(record: &Record, x_metric: Metric, y_metric: Metric) -> String {
    format!(
        "{}\n{}\n{} {}%",
        record.state,
        metric_line(x_metric, record.value(x_metric)),
        y_metric.tooltip_prefix(),
        record.value(y_metric)
    )
}
