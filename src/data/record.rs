//! Record Module
//! Typed rows of the demographic dataset and the fixed metric catalogue.

/// Screen axis a metric can be mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// How a metric value is printed in tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// `12.3%`
    Percent,
    /// `$45000`
    Currency,
    /// `38.6`
    Plain,
}

/// One numeric column usable as an axis dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Poverty,
    Age,
    Income,
    Healthcare,
    Obesity,
    Smokes,
}

const HORIZONTAL_POOL: [Metric; 3] = [Metric::Poverty, Metric::Age, Metric::Income];
const VERTICAL_POOL: [Metric; 3] = [Metric::Healthcare, Metric::Smokes, Metric::Obesity];

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Poverty,
        Metric::Age,
        Metric::Income,
        Metric::Healthcare,
        Metric::Obesity,
        Metric::Smokes,
    ];

    /// Metrics selectable on an axis, in label order.
    pub fn pool(axis: Axis) -> &'static [Metric] {
        match axis {
            Axis::Horizontal => &HORIZONTAL_POOL,
            Axis::Vertical => &VERTICAL_POOL,
        }
    }

    /// Metric shown on an axis before any interaction.
    pub fn default_for(axis: Axis) -> Metric {
        match axis {
            Axis::Horizontal => Metric::Poverty,
            Axis::Vertical => Metric::Healthcare,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Metric::Poverty | Metric::Age | Metric::Income => Axis::Horizontal,
            Metric::Healthcare | Metric::Obesity | Metric::Smokes => Axis::Vertical,
        }
    }

    /// CSV header name.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Poverty => "poverty",
            Metric::Age => "age",
            Metric::Income => "income",
            Metric::Healthcare => "healthcare",
            Metric::Obesity => "obesity",
            Metric::Smokes => "smokes",
        }
    }

    /// Clickable axis label text.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Poverty => "In Poverty (%)",
            Metric::Age => "Age (Median)",
            Metric::Income => "Household Income (Median)",
            Metric::Healthcare => "Lacks Healthcare (%)",
            Metric::Obesity => "Obese (%)",
            Metric::Smokes => "Smokes (%)",
        }
    }

    pub fn tooltip_prefix(self) -> &'static str {
        match self {
            Metric::Poverty => "In Poverty:",
            Metric::Age => "Age:",
            Metric::Income => "HH Income:",
            Metric::Healthcare => "W/O Healthcare:",
            Metric::Obesity => "Obese:",
            Metric::Smokes => "Smokes:",
        }
    }

    pub fn value_style(self) -> ValueStyle {
        match self {
            Metric::Income => ValueStyle::Currency,
            Metric::Age => ValueStyle::Plain,
            _ => ValueStyle::Percent,
        }
    }
}

/// One observation unit (a state).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub state: String,
    pub abbr: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub obesity: f64,
    pub smokes: f64,
}

impl Record {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Poverty => self.poverty,
            Metric::Age => self.age,
            Metric::Income => self.income,
            Metric::Healthcare => self.healthcare,
            Metric::Obesity => self.obesity,
            Metric::Smokes => self.smokes,
        }
    }
}

/// Non-empty, load-ordered collection of records.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Returns `None` for an empty record list.
    pub fn new(records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `[min, max]` of a metric ignoring non-finite values.
    pub fn extent(&self, metric: Metric) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|r| r.value(metric))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(abbr: &str, poverty: f64) -> Record {
        Record {
            state: abbr.to_string(),
            abbr: abbr.to_string(),
            poverty,
            age: 38.0,
            income: 50000.0,
            healthcare: 10.0,
            obesity: 30.0,
            smokes: 18.0,
        }
    }

    #[test]
    fn pools_are_disjoint_and_cover_all_metrics() {
        let h = Metric::pool(Axis::Horizontal);
        let v = Metric::pool(Axis::Vertical);
        assert!(h.iter().all(|m| !v.contains(m)));
        assert_eq!(h.len() + v.len(), Metric::ALL.len());
        for m in Metric::ALL {
            assert!(Metric::pool(m.axis()).contains(&m));
        }
    }

    #[test]
    fn defaults_belong_to_their_pool() {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            assert_eq!(Metric::default_for(axis).axis(), axis);
        }
    }

    #[test]
    fn tooltip_prefixes() {
        assert_eq!(Metric::Poverty.tooltip_prefix(), "In Poverty:");
        assert_eq!(Metric::Age.tooltip_prefix(), "Age:");
        assert_eq!(Metric::Income.tooltip_prefix(), "HH Income:");
        assert_eq!(Metric::Healthcare.tooltip_prefix(), "W/O Healthcare:");
    }

    #[test]
    fn extent_skips_nan() {
        let ds = Dataset::new(vec![
            record("AL", 19.3),
            record("AK", f64::NAN),
            record("AZ", 11.2),
        ])
        .unwrap();
        assert_eq!(ds.extent(Metric::Poverty), Some((11.2, 19.3)));
    }

    #[test]
    fn extent_of_all_nan_is_none() {
        let ds = Dataset::new(vec![record("AL", f64::NAN)]).unwrap();
        assert_eq!(ds.extent(Metric::Poverty), None);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(Dataset::new(Vec::new()).is_none());
    }
}
