//! Report configuration, generated data, and view tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A saved report definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub id: Uuid,
    pub name: String,
    pub report_type: String,
    pub description: Option<String>,
    /// Free-form report parameters.
    pub config: serde_json::Value,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A generated snapshot of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub id: Uuid,
    pub report_config_id: Uuid,
    pub data: serde_json::Value,
    pub generated_by: Uuid,
    pub generated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A recorded report view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub id: Uuid,
    pub report_config_id: Uuid,
    pub viewed_by: Uuid,
    pub viewed_at: DateTime<Utc>,
    /// Seconds the report stayed open, when the client reports it.
    pub view_duration: Option<i32>,
}

/// Request payload for creating a report config.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportConfigRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Report type must be 1-50 characters"))]
    pub report_type: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default = "default_config")]
    pub config: serde_json::Value,
}

fn default_config() -> serde_json::Value {
    serde_json::json!({})
}

/// Request payload for updating a report config (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportConfigRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub config: Option<serde_json::Value>,

    pub is_active: Option<bool>,
}

/// Request payload for recording a report view.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordViewRequest {
    #[validate(range(min = 0, max = 86400, message = "View duration must be 0-86400 seconds"))]
    pub view_duration: Option<i32>,
}

/// Aggregated counts included in generated summary reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSummary {
    pub users_by_role: Vec<CountByKey>,
    pub queries_by_status: Vec<CountByKey>,
    pub complaints_by_status: Vec<CountByKey>,
}

/// A single `GROUP BY` bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountByKey {
    pub key: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_request_defaults_config_to_empty_object() {
        let json = r#"{"name": "Monthly summary", "reportType": "summary"}"#;
        let req: CreateReportConfigRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.config, serde_json::json!({}));
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateReportConfigRequest {
            name: "Summary".to_string(),
            report_type: "summary".to_string(),
            description: None,
            config: serde_json::json!({"window": "30d"}),
        };
        assert!(req.validate().is_ok());

        let nameless = CreateReportConfigRequest {
            name: String::new(),
            ..req
        };
        assert!(nameless.validate().is_err());
    }

    #[test]
    fn test_record_view_duration_bounds() {
        let ok = RecordViewRequest {
            view_duration: Some(120),
        };
        assert!(ok.validate().is_ok());

        let negative = RecordViewRequest {
            view_duration: Some(-1),
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_portal_summary_serialization() {
        let summary = PortalSummary {
            users_by_role: vec![CountByKey {
                key: "Student".to_string(),
                count: 420,
            }],
            queries_by_status: vec![],
            complaints_by_status: vec![],
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"usersByRole\""));
        assert!(json.contains("\"key\":\"Student\""));
        assert!(json.contains("\"count\":420"));
    }
}
