pub mod file;

pub use file::{export_layout, load_chart, save_chart, ChartDocument, ChartFileError};
