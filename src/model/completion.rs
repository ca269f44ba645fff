// Completions - the append-only log of who did what, when.
// Never deleted and never flagged; reconciliation reads it but does not
// consume it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub child_name: String,
    pub chore_id: u32,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_completion_json_field_names() {
        let completion = Completion {
            child_name: "Sam".to_string(),
            chore_id: 1,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&completion).unwrap();
        assert_eq!(json["childName"], "Sam");
        assert_eq!(json["choreId"], 1);
        assert!(json["timestamp"].is_string());
    }
}
