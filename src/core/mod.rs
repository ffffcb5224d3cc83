//! Configuration, data model and storage adapters

pub mod config;
pub mod models;
pub mod records;
pub mod ssm;
