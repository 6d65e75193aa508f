//! Alert status lifecycle.
//!
//! ```text
//!            verify
//! pending ───────────▶ verified   (terminal)
//!    │
//!    └──────────────▶ dismissed  (terminal)
//!            dismiss
//! ```
//!
//! Only `admin` and `responder` may fire a transition. Nothing leaves a
//! terminal state, so a status-change notification fires at most once per
//! alert.

use serde::{Deserialize, Serialize};

use crate::auth::application::domain::entities::UserRole;

use super::entities::AlertStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Verify,
    Dismiss,
}

impl Transition {
    pub fn target(self) -> AlertStatus {
        match self {
            Transition::Verify => AlertStatus::Verified,
            Transition::Dismiss => AlertStatus::Dismissed,
        }
    }

    /// The transition that leads into `status`, if any.
    pub fn into_status(status: AlertStatus) -> Option<Self> {
        match status {
            AlertStatus::Verified => Some(Transition::Verify),
            AlertStatus::Dismissed => Some(Transition::Dismiss),
            AlertStatus::Pending => None,
        }
    }

    pub fn from_verdict(verified: bool) -> Self {
        if verified {
            Transition::Verify
        } else {
            Transition::Dismiss
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("role '{0}' is not allowed to verify or dismiss alerts")]
    Forbidden(UserRole),

    #[error("alert is already {from}; only pending alerts can change status")]
    InvalidTransition { from: AlertStatus },
}

impl AlertStatus {
    /// Authorization is checked before the source state.
    pub fn apply(self, transition: Transition, actor: UserRole) -> Result<AlertStatus, TransitionError> {
        if !actor.can_review_alerts() {
            return Err(TransitionError::Forbidden(actor));
        }

        match self {
            AlertStatus::Pending => Ok(transition.target()),
            from @ (AlertStatus::Verified | AlertStatus::Dismissed) => {
                Err(TransitionError::InvalidTransition { from })
            }
        }
    }
}
