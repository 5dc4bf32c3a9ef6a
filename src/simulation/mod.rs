pub mod aging;
pub mod config;
pub mod engine;
