//! disksched library: application logic for the disk-scheduling simulator.

pub mod app;
pub mod config;
pub mod errors;
