//! Drone verification and SMS broadcast vocabulary.
//!
//! Both side channels are external collaborators; only the request shapes
//! and their validation live here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::entities::{AlertLevel, UnknownVariant};

pub const LOCATION_PLACEHOLDER: &str = "[LOCATION]";

// ============================================================================
// Drone teams
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DroneTeam {
    /// UN mission drone unit
    #[default]
    Unmiss,
    County,
    Police,
}

impl DroneTeam {
    pub fn as_str(self) -> &'static str {
        match self {
            DroneTeam::Unmiss => "unmiss",
            DroneTeam::County => "county",
            DroneTeam::Police => "police",
        }
    }
}

impl fmt::Display for DroneTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DroneTeam {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unmiss" => Ok(DroneTeam::Unmiss),
            "county" => Ok(DroneTeam::County),
            "police" => Ok(DroneTeam::Police),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

// ============================================================================
// Regions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Panyagor,
    Poktap,
    /// Duk border
    Duk,
    Makuach,
    /// Eastern corridor
    Eastern,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Panyagor,
        Region::Poktap,
        Region::Duk,
        Region::Makuach,
        Region::Eastern,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Panyagor => "panyagor",
            Region::Poktap => "poktap",
            Region::Duk => "duk",
            Region::Makuach => "makuach",
            Region::Eastern => "eastern",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or(UnknownVariant(wanted))
    }
}

// ============================================================================
// SMS broadcast
// ============================================================================

/// Stock wording per level. `[LOCATION]` is left in place when no location
/// is supplied.
pub fn level_template(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::High => "URGENT ALERT: Armed individuals reported in [LOCATION]. Seek shelter immediately. Security forces have been notified.",
        AlertLevel::Medium => "CAUTION: Suspicious activity reported near [LOCATION]. Stay vigilant and report unusual activities.",
        AlertLevel::Low => "NOTICE: Recent security concerns in [LOCATION] have been addressed. Situation is being monitored.",
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BroadcastInput {
    #[serde(default)]
    pub message: Option<String>,
    pub level: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    /// Fill an empty message from the level template.
    #[serde(default)]
    pub use_template: bool,
    /// Substituted into `[LOCATION]` when the template is used.
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BroadcastValidationError {
    #[error("message is required")]
    MissingMessage,

    #[error("level is required")]
    MissingLevel,

    #[error("level must be one of high, medium, low (got '{0}')")]
    InvalidLevel(String),

    #[error("at least one region must be selected")]
    MissingRegions,

    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsBroadcast {
    message: String,
    level: AlertLevel,
    regions: Vec<Region>,
}

impl SmsBroadcast {
    pub fn validate(input: BroadcastInput) -> Result<Self, BroadcastValidationError> {
        let raw_level = input
            .level
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(BroadcastValidationError::MissingLevel)?;
        let level: AlertLevel = raw_level
            .to_lowercase()
            .parse()
            .map_err(|_| BroadcastValidationError::InvalidLevel(raw_level.to_string()))?;

        let mut message = input.message.unwrap_or_default().trim().to_string();
        if message.is_empty() && input.use_template {
            message = level_template(level).to_string();
            if let Some(location) = input.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
                message = message.replace(LOCATION_PLACEHOLDER, location);
            }
        }
        if message.is_empty() {
            return Err(BroadcastValidationError::MissingMessage);
        }

        let mut regions = input
            .regions
            .iter()
            .map(|r| {
                r.parse::<Region>()
                    .map_err(|_| BroadcastValidationError::UnknownRegion(r.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        regions.sort();
        regions.dedup();
        if regions.is_empty() {
            return Err(BroadcastValidationError::MissingRegions);
        }

        Ok(Self {
            message,
            level,
            regions,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> AlertLevel {
        self.level
    }

    /// Sorted, no duplicates.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}
