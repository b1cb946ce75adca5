pub mod composer;
pub mod labels;
pub mod metrics;
pub mod milestone;
pub mod primitive;
pub mod projects;

pub use composer::Timesheet;
pub use labels::LabelBandLayout;
pub use metrics::{AverageCharMetrics, MeasureCache, TextMetrics, TextSize};
pub use milestone::{MilestoneLabeler, MilestoneLayout, TimeLabelPlacement};
pub use primitive::{Line, Primitive, Rect, RectKind, TextRun};
pub use projects::ProjectLayout;
