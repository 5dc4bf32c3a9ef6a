pub mod costs;
pub mod distribution;
pub mod policy;
