pub mod dates;
pub mod holiday;
pub mod label;
pub mod project;
pub mod style;
pub mod timeline;

pub use holiday::Holiday;
pub use label::{LabelConfig, LabelKind, LabelMarker, LabelRow};
pub use project::{Milestone, Project, ProjectConfig};
pub use style::{Font, FontStyle, FontWeight, RectStyle, TextAlign, VisualLabelPattern, VisualProjectPattern};
pub use timeline::{CalendarGrid, CalendarMonth, DateRange};
