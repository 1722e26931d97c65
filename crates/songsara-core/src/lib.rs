pub mod config;
pub mod logging;

pub mod download;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod naming;
pub mod progress;
pub mod runner;
