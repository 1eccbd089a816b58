//! Data module - metrics, records and CSV loading

mod loader;
mod metric;
mod record;

pub use loader::{DataLoader, LoaderError, ABBR_COLUMN, STATE_COLUMN};
pub use metric::{Axis, Metric, ValueFormat};
pub use record::{parse_number, Record};
