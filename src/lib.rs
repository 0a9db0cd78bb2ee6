// src/lib.rs
pub mod config;
pub mod driver;
pub mod error;
pub mod fetch;
pub mod process;
pub mod schema;
pub mod sport;
pub mod translate;
