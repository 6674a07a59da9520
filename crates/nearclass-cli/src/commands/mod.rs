pub mod build;
pub mod config;
pub mod depts;
pub mod fetch;
pub mod rank;
