//! Configuration loading and management.
//!
//! The weekday baseline table, daytime window, rounding granularity and
//! margin tolerance are all injected through [`HoursConfig`] rather than
//! fixed in code.
//!
//! # Example
//!
//! ```no_run
//! use punch_hours::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Daytime starts at {}", loader.config().windows.daytime_start);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, MARGIN_DAYS_ENV, ROUNDING_MINUTES_ENV};
pub use types::{BaselineHours, HoursConfig, TimeWindows};
