pub mod analytics;
pub mod binder;
pub mod charts;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod filter;
pub mod layout;
pub mod web;
