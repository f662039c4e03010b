//! HTTP API for punch-hour reports.
//!
//! A single `POST /report` endpoint takes a half-month period and a list of
//! punch rows and returns the computed [`HoursReport`](crate::models::HoursReport).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PunchRequest, ReportRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
