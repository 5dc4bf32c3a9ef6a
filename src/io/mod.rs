pub mod reporting;
pub mod tables;
