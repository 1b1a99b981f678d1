pub mod catalog;
pub mod cell;
pub mod context;
pub mod converter;
pub mod engine;
pub mod layout;
pub mod report;
pub mod tables;
pub mod types;
