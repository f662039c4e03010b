//! Work-hour reports from employee clock punches.
//!
//! This crate turns raw time-clock punches into half-month reports: hours
//! per employee and per day, split into daytime, nighttime and Sunday
//! hours, with daily overtime measured against a per-weekday baseline.
//!
//! The entry point is [`calculation::compute_period_report`]; an axum
//! router exposing it over HTTP lives in [`api`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
