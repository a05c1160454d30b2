//! View module - selection state, update step and mark binding

mod binder;
mod state;

pub use binder::{bind, Frame, Mark};
pub use state::{AxisCommand, Update, ViewState};
