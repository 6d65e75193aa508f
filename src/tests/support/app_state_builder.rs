use crate::alert::application::alert_use_cases::AlertUseCases;
use crate::auth::application::use_cases::{
    login_user::ILoginUserUseCase, register_user::IRegisterUserUseCase,
};
use crate::tests::support::alert_fixtures::{
    in_memory_alert_use_cases, InMemoryAlertRepository, RecordingPublisher,
};
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    login_user: Option<Arc<dyn ILoginUserUseCase + Send + Sync>>,
    register_user: Option<Arc<dyn IRegisterUserUseCase + Send + Sync>>,
    alert: Option<AlertUseCases>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            login_user: Some(Arc::new(StubLoginUserUseCase)),
            register_user: Some(Arc::new(StubRegisterUserUseCase)),
            alert: Some(in_memory_alert_use_cases(
                &InMemoryAlertRepository::default(),
                &RecordingPublisher::default(),
            )),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Some(Arc::new(uc));
        self
    }

    pub fn with_register_user(
        mut self,
        uc: impl IRegisterUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.register_user = Some(Arc::new(uc));
        self
    }

    pub fn with_alert(mut self, use_cases: AlertUseCases) -> Self {
        self.alert = Some(use_cases);
        self
    }

    /// Real alert services over an in-memory store.
    pub fn with_alert_store(
        self,
        repo: &InMemoryAlertRepository,
        events: &RecordingPublisher,
    ) -> Self {
        self.with_alert(in_memory_alert_use_cases(repo, events))
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            login_user_use_case: self.login_user.expect("login_user not set"),
            register_user_use_case: self.register_user.expect("register_user not set"),
            alert: self.alert.expect("alert use cases not set"),
        })
    }
}
