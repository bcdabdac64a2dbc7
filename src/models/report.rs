//! Report model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::analytics::Report;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportRecord {
    pub id: Uuid,
    /// Epoch milliseconds of the observation
    pub timestamp: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub report_type: String,
    pub lat: f64,
    pub lon: f64,
    pub direction: Option<String>,
    pub description: Option<String>,
    pub validated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReport {
    #[validate(range(min = 0))]
    pub timestamp: i64,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64))]
    pub report_type: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    pub direction: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateReportResponse {
    pub status: &'static str,
    pub id: Uuid,
}

impl From<ReportRecord> for Report {
    fn from(record: ReportRecord) -> Self {
        Report {
            id: record.id,
            lat: record.lat,
            lon: record.lon,
            timestamp: record.timestamp,
            report_type: record.report_type,
            direction: record.direction,
            description: record.description,
        }
    }
}

impl ReportRecord {
    pub async fn create(pool: &PgPool, data: CreateReport) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ReportRecord>(
            r#"
            INSERT INTO reports (id, timestamp, "type", lat, lon, direction, description, validated, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, false, NOW())
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(data.timestamp)
        .bind(&data.report_type)
        .bind(data.lat)
        .bind(data.lon)
        .bind(&data.direction)
        .bind(&data.description)
        .fetch_one(pool)
        .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ReportRecord>("SELECT * FROM reports ORDER BY timestamp ASC")
            .fetch_all(pool)
            .await
    }

    /// Current snapshot of every report, ready for the analytics pipeline
    pub async fn snapshot(pool: &PgPool) -> Result<Vec<Report>, sqlx::Error> {
        Ok(Self::list_all(pool).await?.into_iter().map(Report::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(lat: f64, lon: f64, report_type: &str) -> CreateReport {
        CreateReport {
            timestamp: 1_700_000_000_000,
            report_type: report_type.to_string(),
            lat,
            lon,
            direction: Some("North".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_valid_report() {
        assert!(payload(50.45, 30.52, "drone").validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_coordinates() {
        assert!(payload(91.0, 30.52, "drone").validate().is_err());
        assert!(payload(50.45, -181.0, "drone").validate().is_err());
    }

    #[test]
    fn test_rejects_empty_type() {
        assert!(payload(50.45, 30.52, "").validate().is_err());
    }

    #[test]
    fn test_payload_uses_type_field() {
        let json = r#"{"timestamp": 1, "type": "troop", "lat": 1.0, "lon": 2.0, "direction": null, "description": "column"}"#;
        let parsed: CreateReport = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.report_type, "troop");
        assert_eq!(parsed.description.as_deref(), Some("column"));
    }
}
