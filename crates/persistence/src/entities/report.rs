//! Report entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::report::{ReportConfig, ReportData, ReportView};

/// Database row mapping for the reports_config table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportConfigEntity {
    pub id: Uuid,
    pub name: String,
    pub report_type: String,
    pub description: Option<String>,
    pub config: serde_json::Value,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReportConfigEntity> for ReportConfig {
    fn from(entity: ReportConfigEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            report_type: entity.report_type,
            description: entity.description,
            config: entity.config,
            is_active: entity.is_active,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the reports_data table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportDataEntity {
    pub id: Uuid,
    pub report_config_id: Uuid,
    pub data: serde_json::Value,
    pub generated_by: Uuid,
    pub generated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<ReportDataEntity> for ReportData {
    fn from(entity: ReportDataEntity) -> Self {
        Self {
            id: entity.id,
            report_config_id: entity.report_config_id,
            data: entity.data,
            generated_by: entity.generated_by,
            generated_at: entity.generated_at,
            expires_at: entity.expires_at,
        }
    }
}

/// Database row mapping for the report_views table.
#[derive(Debug, Clone, FromRow)]
pub struct ReportViewEntity {
    pub id: Uuid,
    pub report_config_id: Uuid,
    pub viewed_by: Uuid,
    pub viewed_at: DateTime<Utc>,
    pub view_duration: Option<i32>,
}

impl From<ReportViewEntity> for ReportView {
    fn from(entity: ReportViewEntity) -> Self {
        Self {
            id: entity.id,
            report_config_id: entity.report_config_id,
            viewed_by: entity.viewed_by,
            viewed_at: entity.viewed_at,
            view_duration: entity.view_duration,
        }
    }
}
