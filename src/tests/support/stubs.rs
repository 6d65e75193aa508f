use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Actor, UserRole};
use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TokenSubject,
};
use crate::auth::application::use_cases::login_user::{
    AuthToken, ILoginUserUseCase, LoginError, LoginRequest,
};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterRequest, RegisterUserError,
};

#[derive(Default, Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<AuthToken, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRegisterUserUseCase;

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(&self, _request: RegisterRequest) -> Result<AuthToken, RegisterUserError> {
        unimplemented!("Not used in this test")
    }
}

/// Accepts any bearer token and reports the configured caller.
#[derive(Clone)]
pub struct StubTokenProvider {
    pub caller: Actor,
}

impl StubTokenProvider {
    pub fn new(caller: Actor) -> Self {
        Self { caller }
    }

    pub fn with_role(role: UserRole) -> Self {
        Self::new(Actor {
            user_id: Uuid::new_v4(),
            role,
        })
    }
}

impl TokenProvider for StubTokenProvider {
    fn generate_access_token(&self, _subject: &TokenSubject) -> Result<String, TokenError> {
        unimplemented!("Not used in route tests")
    }

    fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
        Ok(TokenClaims {
            sub: self.caller.user_id,
            email: "caller@example.com".to_string(),
            role: self.caller.role,
            iss: "test".to_string(),
            exp: 9_999_999_999,
            iat: 0,
            nbf: 0,
        })
    }
}
