use serde::Serialize;

/// Status of a bulk card-generation job as reported by the polling endpoint.
///
/// Serialized with a `status` tag so the wire values are exactly
/// `not_started`, `running`, `completed`, `cancelled` and `error`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchStatus {
    NotStarted,
    Running { progress: u32 },
    Completed,
    Cancelled,
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_to_snake_case_tags() {
        let running = serde_json::to_value(BatchStatus::Running { progress: 40 }).unwrap();
        assert_eq!(running, serde_json::json!({"status": "running", "progress": 40}));

        let cancelled = serde_json::to_value(BatchStatus::Cancelled).unwrap();
        assert_eq!(cancelled, serde_json::json!({"status": "cancelled"}));

        let error = serde_json::to_value(BatchStatus::Error {
            message: "boom".into(),
        })
        .unwrap();
        assert_eq!(error, serde_json::json!({"status": "error", "message": "boom"}));

        let idle = serde_json::to_value(BatchStatus::NotStarted).unwrap();
        assert_eq!(idle, serde_json::json!({"status": "not_started"}));
    }
}
