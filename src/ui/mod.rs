pub mod canvas;
pub mod dialogs;
pub mod metrics;
pub mod theme;
pub mod toolbar;
