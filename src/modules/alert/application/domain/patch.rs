use serde_json::{Map, Value};

use super::entities::AlertStatus;
use super::state_machine::Transition;

/// Fields fixed at creation time or owned by the server.
pub const IMMUTABLE_FIELDS: &[&str] = &[
    "id",
    "title",
    "description",
    "location",
    "level",
    "coordinates",
    "created_at",
    "created_by",
    "verified_by",
    "updated_at",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("field '{0}' cannot be changed after creation")]
    ImmutableField(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("status is required")]
    MissingStatus,

    #[error("status must be 'verified' or 'dismissed' (got '{0}')")]
    InvalidStatus(String),
}

/// The only mutation an alert accepts after creation: a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub transition: Transition,
}

impl StatusPatch {
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, PatchError> {
        // immutable-field violations are reported before anything else
        if let Some(field) = body
            .keys()
            .find(|k| IMMUTABLE_FIELDS.contains(&k.as_str()))
        {
            return Err(PatchError::ImmutableField(field.clone()));
        }

        if let Some(field) = body.keys().find(|k| k.as_str() != "status") {
            return Err(PatchError::UnknownField(field.clone()));
        }

        let raw = match body.get("status") {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(PatchError::InvalidStatus(other.to_string())),
            None => return Err(PatchError::MissingStatus),
        };

        raw.parse::<AlertStatus>()
            .ok()
            .and_then(Transition::into_status)
            .map(|transition| StatusPatch { transition })
            .ok_or_else(|| PatchError::InvalidStatus(raw.to_string()))
    }
}
