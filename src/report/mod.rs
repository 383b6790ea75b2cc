pub mod grid;

pub use grid::{write_report, write_report_file};
