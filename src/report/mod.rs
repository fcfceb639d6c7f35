pub mod generator;
pub mod stats;
pub mod view;

pub use generator::generate_report;
pub use stats::{format_duration, saturating_sum, CategoryFilter};
pub use view::{Report, ReportView};
