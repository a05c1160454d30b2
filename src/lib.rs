//! State Scatter - Interactive demographic scatterplot
//!
//! Loads a table of per-state indicators and plots one against another.
//! Axis selection is an explicit [`view::ViewState`] updated by the pure
//! [`view::ViewState::apply`]; drawing happens in a separate step.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod view;
