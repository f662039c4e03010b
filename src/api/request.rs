//! Request types for the `/report` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{PeriodRequest, RawPunch};
use crate::parsing::CellValue;

/// Request body for `POST /report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The half-month to report on.
    pub period: PeriodRequest,
    /// Punch rows as exported by the time clock.
    #[serde(default)]
    pub punches: Vec<PunchRequest>,
}

/// One punch row.
///
/// Date and time accept either text or a spreadsheet number, so rows can be
/// forwarded from a sheet export without reformatting. Unparseable or
/// missing values do not fail the request; the row is skipped and counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// Employee display name. A missing name is treated like a blank one.
    #[serde(default)]
    pub name: String,
    /// Punch date, e.g. `"10/01/2024"` or `"2024-01-10"`.
    #[serde(default)]
    pub date: Option<CellValue>,
    /// Punch time, e.g. `"8:00 a. m."`, `"20:15"` or a day fraction.
    #[serde(default)]
    pub time: Option<CellValue>,
    /// State label such as `"entrada"` or `"out"`.
    #[serde(default)]
    pub state: Option<String>,
}

impl From<PunchRequest> for RawPunch {
    fn from(req: PunchRequest) -> Self {
        let empty = CellValue::Text(String::new());
        RawPunch::from_cells(
            req.name,
            req.date.as_ref().unwrap_or(&empty),
            req.time.as_ref().unwrap_or(&empty),
            req.state.unwrap_or_default(),
        )
    }
}
