use crate::modules::auth::application::domain::entities::{User, UserRole};
use async_trait::async_trait;
use std::fmt;

/// Row to insert. The id and timestamps are assigned by the adapter.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;
}

#[derive(Debug)]
pub enum UserRepositoryError {
    UserAlreadyExists,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRepositoryError::UserAlreadyExists => write!(f, "User already exists"),
            UserRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
