use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::login_user::AuthToken;
use crate::auth::application::use_cases::register_user::{RegisterRequest, RegisterUserError};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequestDto {
    #[schema(example = "reporter@example.com")]
    pub email: String,

    /// 8 to 128 characters
    #[schema(example = "SecurePass123!")]
    pub password: String,

    #[schema(example = "Nyandeng Akol")]
    pub name: String,
}

/// Register a new account
///
/// New accounts always get the `user` role.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = AuthToken),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (
            status = 409,
            description = "Email already registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_ALREADY_EXISTS",
                    "message": "Email already registered"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match RegisterRequest::new(dto.email, dto.password, dto.name) {
        Ok(req) => req,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.register_user_use_case.execute(request).await {
        Ok(token) => ApiResponse::created(token),

        Err(RegisterUserError::EmailAlreadyExists) => {
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", "Email already registered")
        }

        Err(e) => {
            error!(error = %e, "Registration failed");
            ApiResponse::internal_error()
        }
    }
}
