//! Pure transformations from raw sentiment documents to view models.

mod assemble;
mod delta;
mod error;
mod series;
mod tone;

pub use assemble::{Dashboard, ViewModel, assemble};
pub use delta::QoQPoint;
pub use series::ChartPoint;
