//! Layout engine for timesheet charts.
//!
//! A chart is a date range, a stack of label bands (years, months, dated
//! text markers), project rows with one milestone per sub-row, and holiday
//! markers. [`Timesheet::layout`] turns it into positioned rectangles, text
//! runs and lines for a rendering surface to paint, asking a
//! [`TextMetrics`] provider for text sizes where placement depends on them.

pub mod error;
pub mod io;
pub mod layout;
pub mod model;

pub use error::LayoutError;
pub use io::{ChartDocument, ChartFileError};
pub use layout::{Primitive, TextMetrics, Timesheet};
