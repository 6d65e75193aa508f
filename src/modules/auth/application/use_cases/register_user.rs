use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::{
    NewUser, PasswordHasher, TokenProvider, TokenSubject, UserQuery, UserRepository,
    UserRepositoryError,
};

use super::login_user::AuthToken;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

// ========================= Register Request =========================
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    email: String,
    password: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterRequestError {
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Password must be between 8 and 128 characters")]
    PasswordLength,
    #[error("Name cannot be empty")]
    EmptyName,
}

impl RegisterRequest {
    pub fn new(email: String, password: String, name: String) -> Result<Self, RegisterRequestError> {
        let email = email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            return Err(RegisterRequestError::InvalidEmailFormat);
        }

        let len = password.chars().count();
        if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
            return Err(RegisterRequestError::PasswordLength);
        }

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RegisterRequestError::EmptyName);
        }

        Ok(Self {
            email,
            password,
            name,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<'de> Deserialize<'de> for RegisterRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RegisterRequestHelper {
            email: String,
            password: String,
            name: String,
        }

        let helper = RegisterRequestHelper::deserialize(deserializer)?;
        RegisterRequest::new(helper.email, helper.password, helper.name)
            .map_err(serde::de::Error::custom)
    }
}

// ====================== Register Error =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Email already registered")]
    EmailAlreadyExists,
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ============================ Use Case =============================
#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(&self, request: RegisterRequest) -> Result<AuthToken, RegisterUserError>;
}

#[derive(Clone)]
pub struct RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl<Q, R> RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q, R> IRegisterUserUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, request: RegisterRequest) -> Result<AuthToken, RegisterUserError> {
        // the unique index is the real guard; this just skips a wasted hash
        if let Ok(Some(_)) = self.query.find_by_email(request.email()).await {
            return Err(RegisterUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create_user(NewUser {
                email: request.email().to_string(),
                password_hash,
                name: request.name().to_string(),
                role: UserRole::User,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => RegisterUserError::EmailAlreadyExists,
                UserRepositoryError::DatabaseError(msg) => RegisterUserError::RepositoryError(msg),
            })?;

        let token = self
            .token_provider
            .generate_access_token(&TokenSubject {
                user_id: user.id,
                email: user.email,
                role: user.role,
            })
            .map_err(|e| RegisterUserError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthToken { token })
    }
}
