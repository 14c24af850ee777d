//! Report trigger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ask the backend to generate and mail a report starting at `date_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub date_from: NaiveDate,
}

/// Acknowledgement of a queued report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAccepted {
    pub code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_is_iso() {
        let req = ReportRequest {
            date_from: NaiveDate::from_ymd_opt(2022, 1, 31).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            serde_json::json!({"date_from": "2022-01-31"})
        );
    }
}
