use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A unit of work tracked by the service.
///
/// Ids are assigned sequentially by the store and never reused; `created_at`
/// is set once at creation. Serializes with camelCase keys and an RFC 3339
/// timestamp, matching the frontend contract.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/tasks`.
///
/// `description` is optional at the wire level so a missing field surfaces as
/// a 400 problem response rather than a deserialization rejection.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`. A missing or blank description leaves the
/// stored value unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// RFC7807-style error payload used at service edges.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn task_serializes_camel_case_with_rfc3339_timestamp() {
        let task = Task {
            id: 7,
            description: "Buy milk".into(),
            is_completed: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        };
        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(value["id"], 7);
        assert_eq!(value["description"], "Buy milk");
        assert_eq!(value["isCompleted"], false);
        assert_eq!(value["createdAt"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn create_request_tolerates_missing_description() {
        let req: CreateTaskRequest = serde_json::from_str("{}").expect("decode empty body");
        assert!(req.description.is_none());
    }

    #[test]
    fn problem_details_omits_empty_detail() {
        let problem = ProblemDetails {
            r#type: "about:blank".into(),
            title: "Not Found".into(),
            status: 404,
            detail: None,
        };
        let value = serde_json::to_value(&problem).expect("serialize problem");
        assert!(value.get("detail").is_none());
        assert_eq!(value["status"], 404);
    }
}
