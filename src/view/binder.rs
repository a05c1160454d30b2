//! Binds dataset records to positioned marks through the current scales.

use crate::charts::{tooltip_text, LinearScale};
use crate::data::Dataset;
use crate::view::ViewState;

/// One marker with its abbreviation label.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub abbr: String,
    /// Pixels from the left edge of the plot area.
    pub x: f64,
    /// Pixels from the top edge of the plot area.
    pub y: f64,
    pub tooltip: String,
}

impl Mark {
    /// Marks with a non-numeric source value have no position.
    pub fn is_drawable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Everything needed to draw the plot area at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    /// Same order as the dataset records.
    pub marks: Vec<Mark>,
}

impl Frame {
    /// Index of the topmost drawable mark within `radius` of a plot-area point.
    pub fn hit_test(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        self.marks
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, m)| m.is_drawable())
            .find(|(_, m)| (m.x - x).powi(2) + (m.y - y).powi(2) <= radius * radius)
            .map(|(i, _)| i)
    }
}

/// Project every record through the state's scales.
pub fn bind(dataset: &Dataset, state: &ViewState) -> Frame {
    let marks = dataset
        .records()
        .iter()
        .map(|record| Mark {
            abbr: record.abbr.clone(),
            x: state.x_scale.project(record.value(state.x_metric)),
            y: state.y_scale.project(record.value(state.y_metric)),
            tooltip: tooltip_text(record, state.x_metric, state.y_metric),
        })
        .collect();

    Frame {
        x_scale: state.x_scale,
        y_scale: state.y_scale,
        marks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;

    fn record(abbr: &str, poverty: f64, healthcare: f64) -> Record {
        Record {
            state: abbr.into(),
            abbr: abbr.into(),
            poverty,
            age: 35.0,
            income: 50000.0,
            healthcare,
            obesity: 30.0,
            smokes: 20.0,
        }
    }

    #[test]
    fn nan_value_is_not_drawable() {
        let ds = Dataset::new(vec![record("AA", 10.0, 5.0), record("BB", f64::NAN, 15.0)]).unwrap();
        let frame = bind(&ds, &ViewState::initial(&ds, 100.0, 100.0));
        assert!(frame.marks[0].is_drawable());
        assert!(!frame.marks[1].is_drawable());
        assert!(frame.marks[1].tooltip.contains("In Poverty: NaN%"));
    }

    #[test]
    fn hit_test_finds_nearby_mark() {
        let ds = Dataset::new(vec![record("AA", 10.0, 5.0), record("BB", 20.0, 15.0)]).unwrap();
        let frame = bind(&ds, &ViewState::initial(&ds, 100.0, 100.0));
        // AA sits at the bottom-left corner, BB at the top-right.
        assert_eq!(frame.hit_test(3.0, 97.0, 10.0), Some(0));
        assert_eq!(frame.hit_test(95.0, 4.0, 10.0), Some(1));
        assert_eq!(frame.hit_test(50.0, 50.0, 10.0), None);
    }
}
