use serde::Serialize;
use utoipa::ToSchema;

/// Error envelope returned by every failing endpoint. Successful responses
/// carry their payload bare.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    #[schema(example = "ALERT_NOT_FOUND")]
    pub code: String,

    /// Human-readable error message
    #[schema(example = "Alert not found")]
    pub message: String,
}
