//! Academic query domain model.
//!
//! Queries form shallow threads: a root message plus direct replies. The
//! root row carries the thread status; replies are rows pointing at the
//! root via `parent_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::access::Role;

/// Lifecycle of a query thread.
///
/// - `Open`: created by a student, no replies yet.
/// - `Replied`: the latest reply came from the student.
/// - `Responded`: the latest reply came from faculty.
/// - `Resolved`: closed by the student. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    Open,
    Replied,
    Responded,
    Resolved,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Open => "Open",
            QueryStatus::Replied => "Replied",
            QueryStatus::Responded => "Responded",
            QueryStatus::Resolved => "Resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Open" => Some(QueryStatus::Open),
            "Replied" => Some(QueryStatus::Replied),
            "Responded" => Some(QueryStatus::Responded),
            "Resolved" => Some(QueryStatus::Resolved),
            _ => None,
        }
    }

    /// Resolved threads accept no further replies or status changes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryStatus::Resolved)
    }
}

/// Error raised when a thread mutation violates the lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryLifecycleError {
    #[error("Query is resolved and no longer accepts changes")]
    AlreadyResolved,
    #[error("Only the student who opened the query may resolve it")]
    NotThreadOwner,
}

/// Status the root moves to after a reply from the given role.
///
/// Errors if the thread is already resolved.
pub fn status_after_reply(
    current: QueryStatus,
    author_role: Role,
) -> Result<QueryStatus, QueryLifecycleError> {
    if current.is_terminal() {
        return Err(QueryLifecycleError::AlreadyResolved);
    }
    Ok(if author_role == Role::Student {
        QueryStatus::Replied
    } else {
        QueryStatus::Responded
    })
}

/// A query row. Roots have `parent_id == None`; replies point at the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicQuery {
    pub id: Uuid,
    /// Human-readable code like `AQ2026-004213`, assigned to roots only.
    pub query_id: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: QueryStatus,
    pub student_id: Uuid,
    pub faculty_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Formats the human-readable code for a root query.
pub fn format_query_code(year: i32, serial: u32) -> String {
    format!("AQ{}-{:06}", year, serial % 1_000_000)
}

/// Request payload for opening a query thread.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueryRequest {
    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,

    /// Faculty member the query is addressed to, if any.
    pub faculty_id: Option<Uuid>,
}

/// Request payload for replying to a thread.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

/// A root query with its replies in chronological order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryThread {
    #[serde(flatten)]
    pub root: AcademicQuery,
    pub replies: Vec<AcademicQuery>,
}

/// Response for listing query threads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueriesResponse {
    pub queries: Vec<QueryThread>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            QueryStatus::Open,
            QueryStatus::Replied,
            QueryStatus::Responded,
            QueryStatus::Resolved,
        ] {
            assert_eq!(QueryStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QueryStatus::parse("open"), None);
        assert_eq!(QueryStatus::parse("Closed"), None);
    }

    #[test]
    fn test_only_resolved_is_terminal() {
        assert!(QueryStatus::Resolved.is_terminal());
        assert!(!QueryStatus::Open.is_terminal());
        assert!(!QueryStatus::Replied.is_terminal());
        assert!(!QueryStatus::Responded.is_terminal());
    }

    #[test]
    fn test_student_reply_marks_replied() {
        let next = status_after_reply(QueryStatus::Open, Role::Student).unwrap();
        assert_eq!(next, QueryStatus::Replied);

        let next = status_after_reply(QueryStatus::Responded, Role::Student).unwrap();
        assert_eq!(next, QueryStatus::Replied);
    }

    #[test]
    fn test_faculty_reply_marks_responded() {
        let next = status_after_reply(QueryStatus::Open, Role::Faculty).unwrap();
        assert_eq!(next, QueryStatus::Responded);

        let next = status_after_reply(QueryStatus::Replied, Role::Faculty).unwrap();
        assert_eq!(next, QueryStatus::Responded);
    }

    #[test]
    fn test_reply_to_resolved_thread_is_rejected() {
        let result = status_after_reply(QueryStatus::Resolved, Role::Student);
        assert_eq!(result, Err(QueryLifecycleError::AlreadyResolved));

        let result = status_after_reply(QueryStatus::Resolved, Role::Faculty);
        assert_eq!(result, Err(QueryLifecycleError::AlreadyResolved));
    }

    #[test]
    fn test_format_query_code() {
        assert_eq!(format_query_code(2026, 4213), "AQ2026-004213");
        assert_eq!(format_query_code(2026, 0), "AQ2026-000000");
        // Serial wraps at six digits
        assert_eq!(format_query_code(2026, 1_234_567), "AQ2026-234567");
    }

    #[test]
    fn test_status_serde_uses_capitalized_names() {
        let json = serde_json::to_string(&QueryStatus::Responded).unwrap();
        assert_eq!(json, "\"Responded\"");

        let status: QueryStatus = serde_json::from_str("\"Open\"").unwrap();
        assert_eq!(status, QueryStatus::Open);
    }

    #[test]
    fn test_thread_serialization_flattens_root() {
        let root = AcademicQuery {
            id: Uuid::new_v4(),
            query_id: Some("AQ2026-000001".to_string()),
            subject: "Grading".to_string(),
            message: "When will grades be out?".to_string(),
            status: QueryStatus::Open,
            student_id: Uuid::new_v4(),
            faculty_id: None,
            parent_id: None,
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let thread = QueryThread {
            root,
            replies: vec![],
        };
        let json = serde_json::to_string(&thread).unwrap();
        assert!(json.contains("\"queryId\":\"AQ2026-000001\""));
        assert!(json.contains("\"replies\":[]"));
    }
}
