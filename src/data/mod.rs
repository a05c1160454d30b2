//! Data module - CSV loading and typed records

mod loader;
mod record;

pub use loader::{DataLoader, LoaderError};
pub use record::{Axis, Dataset, Metric, Record, ValueStyle};
