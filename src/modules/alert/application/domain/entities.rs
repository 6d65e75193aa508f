use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 255;
pub const MAX_LOCATION_LEN: usize = 255;

// ============================================================================
// Level
// ============================================================================

/// Severity of a report. Ordered by `rank`, never alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl AlertLevel {
    pub fn rank(self) -> u8 {
        match self {
            AlertLevel::High => 3,
            AlertLevel::Medium => 2,
            AlertLevel::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AlertLevel::Low),
            "medium" => Ok(AlertLevel::Medium),
            "high" => Ok(AlertLevel::High),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Pending,
    Verified,
    Dismissed,
}

impl AlertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Pending => "pending",
            AlertStatus::Verified => "verified",
            AlertStatus::Dismissed => "dismissed",
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, AlertStatus::Pending)
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AlertStatus::Pending),
            "verified" => Ok(AlertStatus::Verified),
            "dismissed" => Ok(AlertStatus::Dismissed),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

// ============================================================================
// Alert
// ============================================================================

/// Map enrichment only. The query engine never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub level: AlertLevel,
    pub status: AlertStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub created_by: Uuid,
    pub verified_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Creation input
// ============================================================================

/// Raw report as submitted. Every field is optional here so that a missing
/// field surfaces as a validation error rather than a JSON parse failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewAlertInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub level: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlertValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("level must be one of high, medium, low (got '{0}')")]
    InvalidLevel(String),

    #[error("coordinates must have lat in [-90, 90] and lng in [-180, 180]")]
    InvalidCoordinates,
}

/// A report that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    title: String,
    description: String,
    location: String,
    level: AlertLevel,
    coordinates: Option<Coordinates>,
    created_by: Uuid,
}

impl NewAlert {
    pub fn validate(input: NewAlertInput, created_by: Uuid) -> Result<Self, AlertValidationError> {
        let title = required("title", input.title)?;
        let description = required("description", input.description)?;
        let location = required("location", input.location)?;
        let level = required("level", input.level)?;

        max_len("title", &title, MAX_TITLE_LEN)?;
        max_len("location", &location, MAX_LOCATION_LEN)?;

        let level = level
            .to_lowercase()
            .parse::<AlertLevel>()
            .map_err(|_| AlertValidationError::InvalidLevel(level))?;

        if let Some(coordinates) = input.coordinates {
            if !coordinates.is_valid() {
                return Err(AlertValidationError::InvalidCoordinates);
            }
        }

        Ok(Self {
            title,
            description,
            location,
            level,
            coordinates: input.coordinates,
            created_by,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn level(&self) -> AlertLevel {
        self.level
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn created_by(&self) -> Uuid {
        self.created_by
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, AlertValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AlertValidationError::MissingField(field))
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), AlertValidationError> {
    if value.chars().count() > max {
        return Err(AlertValidationError::TooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewAlertInput {
        NewAlertInput {
            title: Some("Armed group sighted".to_string()),
            description: Some("Six men moving north".to_string()),
            location: Some("Panyagor".to_string()),
            level: Some("high".to_string()),
            coordinates: None,
        }
    }

    #[test]
    fn level_rank_orders_by_severity() {
        assert!(AlertLevel::High.rank() > AlertLevel::Medium.rank());
        assert!(AlertLevel::Medium.rank() > AlertLevel::Low.rank());
    }

    #[test]
    fn validate_accepts_complete_input() {
        let creator = Uuid::new_v4();
        let alert = NewAlert::validate(input(), creator).unwrap();

        assert_eq!(alert.title(), "Armed group sighted");
        assert_eq!(alert.level(), AlertLevel::High);
        assert_eq!(alert.created_by(), creator);
    }

    #[test]
    fn validate_trims_and_accepts_uppercase_level() {
        let mut raw = input();
        raw.title = Some("  Fire detected  ".to_string());
        raw.level = Some("MEDIUM".to_string());

        let alert = NewAlert::validate(raw, Uuid::new_v4()).unwrap();
        assert_eq!(alert.title(), "Fire detected");
        assert_eq!(alert.level(), AlertLevel::Medium);
    }

    #[test]
    fn validate_rejects_missing_and_blank_fields() {
        let mut raw = input();
        raw.description = None;
        assert_eq!(
            NewAlert::validate(raw, Uuid::new_v4()),
            Err(AlertValidationError::MissingField("description"))
        );

        let mut raw = input();
        raw.location = Some("   ".to_string());
        assert_eq!(
            NewAlert::validate(raw, Uuid::new_v4()),
            Err(AlertValidationError::MissingField("location"))
        );
    }

    #[test]
    fn validate_rejects_level_outside_closed_set() {
        let mut raw = input();
        raw.level = Some("info".to_string());

        assert_eq!(
            NewAlert::validate(raw, Uuid::new_v4()),
            Err(AlertValidationError::InvalidLevel("info".to_string()))
        );
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let mut raw = input();
        raw.coordinates = Some(Coordinates {
            lat: 95.0,
            lng: 31.5,
        });

        assert_eq!(
            NewAlert::validate(raw, Uuid::new_v4()),
            Err(AlertValidationError::InvalidCoordinates)
        );
    }

    #[test]
    fn validate_rejects_overlong_title() {
        let mut raw = input();
        raw.title = Some("x".repeat(MAX_TITLE_LEN + 1));

        assert!(matches!(
            NewAlert::validate(raw, Uuid::new_v4()),
            Err(AlertValidationError::TooLong { field: "title", .. })
        ));
    }

    #[test]
    fn status_and_level_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(AlertStatus::Dismissed).unwrap(),
            serde_json::json!("dismissed")
        );
        assert_eq!(
            serde_json::to_value(AlertLevel::Medium).unwrap(),
            serde_json::json!("medium")
        );
    }
}
