//! View State Module
//! Axis selection plus the scales derived from it, and the pure update step
//! applied when an axis label is clicked.

use crate::charts::LinearScale;
use crate::data::{Axis, Dataset, Metric};
use tracing::debug;

/// Request to show `metric` on `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisCommand {
    pub axis: Axis,
    pub metric: Metric,
}

impl AxisCommand {
    pub fn new(axis: Axis, metric: Metric) -> Self {
        Self { axis, metric }
    }
}

/// Outcome of [`ViewState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Metric already selected; nothing to redraw.
    Unchanged,
    /// Metric does not belong to that axis.
    Rejected,
    /// Selection and scale of this axis changed.
    Retargeted(Axis),
}

/// Selected metric per axis and the matching scales.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub x_metric: Metric,
    pub y_metric: Metric,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    plot_width: f64,
    plot_height: f64,
}

impl ViewState {
    /// Default selection for a freshly loaded dataset.
    pub fn initial(dataset: &Dataset, plot_width: f64, plot_height: f64) -> Self {
        let x_metric = Metric::default_for(Axis::Horizontal);
        let y_metric = Metric::default_for(Axis::Vertical);
        Self {
            x_metric,
            y_metric,
            x_scale: LinearScale::for_metric(
                dataset,
                x_metric,
                Axis::Horizontal,
                plot_width,
                plot_height,
            ),
            y_scale: LinearScale::for_metric(
                dataset,
                y_metric,
                Axis::Vertical,
                plot_width,
                plot_height,
            ),
            plot_width,
            plot_height,
        }
    }

    pub fn metric(&self, axis: Axis) -> Metric {
        match axis {
            Axis::Horizontal => self.x_metric,
            Axis::Vertical => self.y_metric,
        }
    }

    pub fn scale(&self, axis: Axis) -> &LinearScale {
        match axis {
            Axis::Horizontal => &self.x_scale,
            Axis::Vertical => &self.y_scale,
        }
    }

    /// Whether a label should be drawn as active.
    pub fn is_active(&self, metric: Metric) -> bool {
        self.metric(metric.axis()) == metric
    }

    /// Labels of one axis pool with their active flag.
    pub fn labels(&self, axis: Axis) -> Vec<(Metric, bool)> {
        Metric::pool(axis)
            .iter()
            .map(|&m| (m, self.is_active(m)))
            .collect()
    }

    /// Apply a command and return the next state. Only the commanded axis is
    /// rescaled.
    pub fn apply(&self, dataset: &Dataset, command: AxisCommand) -> (ViewState, Update) {
        if command.metric.axis() != command.axis {
            return (self.clone(), Update::Rejected);
        }
        if self.metric(command.axis) == command.metric {
            return (self.clone(), Update::Unchanged);
        }

        let mut next = self.clone();
        let scale = LinearScale::for_metric(
            dataset,
            command.metric,
            command.axis,
            self.plot_width,
            self.plot_height,
        );
        match command.axis {
            Axis::Horizontal => {
                next.x_metric = command.metric;
                next.x_scale = scale;
            }
            Axis::Vertical => {
                next.y_metric = command.metric;
                next.y_scale = scale;
            }
        }
        debug!(axis = ?command.axis, metric = command.metric.column(), "axis retargeted");
        (next, Update::Retargeted(command.axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn dataset() -> Dataset {
        let row = |abbr: &str, p: f64, a: f64, i: f64, h: f64, o: f64, s: f64| Record {
            state: abbr.into(),
            abbr: abbr.into(),
            poverty: p,
            age: a,
            income: i,
            healthcare: h,
            obesity: o,
            smokes: s,
        };
        Dataset::new(vec![
            row("AL", 19.3, 38.6, 42830.0, 13.9, 33.5, 21.1),
            row("AK", 11.2, 33.3, 71583.0, 15.0, 29.7, 19.9),
            row("AZ", 18.2, 36.9, 50068.0, 14.4, 28.9, 16.3),
        ])
        .unwrap()
    }

    fn active_count(state: &ViewState, axis: Axis) -> usize {
        state.labels(axis).iter().filter(|(_, on)| *on).count()
    }

    #[test]
    fn initial_selection_is_poverty_vs_healthcare() {
        let state = ViewState::initial(&dataset(), 820.0, 380.0);
        assert_eq!(state.x_metric, Metric::Poverty);
        assert_eq!(state.y_metric, Metric::Healthcare);
        assert_eq!(state.x_scale.range, (0.0, 820.0));
        assert_eq!(state.y_scale.range, (380.0, 0.0));
    }

    #[test]
    fn same_metric_is_a_no_op() {
        let ds = dataset();
        let state = ViewState::initial(&ds, 820.0, 380.0);
        let (next, update) = state.apply(&ds, AxisCommand::new(Axis::Horizontal, Metric::Poverty));
        assert_eq!(update, Update::Unchanged);
        assert_eq!(next, state);
    }

    #[test]
    fn metric_from_other_pool_is_rejected() {
        let ds = dataset();
        let state = ViewState::initial(&ds, 820.0, 380.0);
        let (next, update) = state.apply(&ds, AxisCommand::new(Axis::Horizontal, Metric::Smokes));
        assert_eq!(update, Update::Rejected);
        assert_eq!(next, state);
    }

    #[test]
    fn only_the_commanded_axis_changes() {
        let ds = dataset();
        let state = ViewState::initial(&ds, 820.0, 380.0);
        let (next, update) = state.apply(&ds, AxisCommand::new(Axis::Horizontal, Metric::Income));
        assert_eq!(update, Update::Retargeted(Axis::Horizontal));
        assert_eq!(next.x_metric, Metric::Income);
        assert_eq!(next.x_scale.domain, (42000.0, 72000.0));
        assert_eq!(next.y_metric, state.y_metric);
        assert_eq!(next.y_scale, state.y_scale);
    }

    #[test]
    fn one_active_label_per_pool_after_many_clicks() {
        let ds = dataset();
        let mut state = ViewState::initial(&ds, 820.0, 380.0);
        let commands = [
            AxisCommand::new(Axis::Horizontal, Metric::Age),
            AxisCommand::new(Axis::Vertical, Metric::Obesity),
            AxisCommand::new(Axis::Vertical, Metric::Obesity),
            AxisCommand::new(Axis::Horizontal, Metric::Healthcare),
            AxisCommand::new(Axis::Horizontal, Metric::Income),
            AxisCommand::new(Axis::Vertical, Metric::Smokes),
        ];
        for command in commands {
            state = state.apply(&ds, command).0;
            assert_eq!(active_count(&state, Axis::Horizontal), 1);
            assert_eq!(active_count(&state, Axis::Vertical), 1);
        }
        assert!(state.is_active(Metric::Income));
        assert!(state.is_active(Metric::Smokes));
    }

    #[test]
    fn round_trip_restores_scale() {
        let ds = dataset();
        let initial = ViewState::initial(&ds, 820.0, 380.0);
        let direct = initial
            .apply(&ds, AxisCommand::new(Axis::Vertical, Metric::Obesity))
            .0;
        let round_trip = initial
            .apply(&ds, AxisCommand::new(Axis::Vertical, Metric::Obesity))
            .0
            .apply(&ds, AxisCommand::new(Axis::Vertical, Metric::Smokes))
            .0
            .apply(&ds, AxisCommand::new(Axis::Vertical, Metric::Obesity))
            .0;
        assert_eq!(round_trip, direct);
    }
}
