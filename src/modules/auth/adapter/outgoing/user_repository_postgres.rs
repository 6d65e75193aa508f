use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::user_repository::{
    NewUser, UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::ActiveModel as UserActiveModel;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email.trim().to_lowercase()),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            role: Set(user.role.as_str().to_string()),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::UserAlreadyExists;
            }
            UserRepositoryError::DatabaseError(e.to_string())
        })?;

        User::try_from(inserted).map_err(UserRepositoryError::DatabaseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserRole;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::Model as UserModel;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn new_user() -> NewUser {
        NewUser {
            email: "Garang@Example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            name: "Garang Kuol".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let now = chrono::Utc::now();
        let user_id = Uuid::new_v4();

        let mock_user_model = UserModel {
            id: user_id,
            email: "garang@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            name: "Garang Kuol".to_string(),
            role: "user".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![mock_user_model]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(db));

        let user = repository.create_user(new_user()).await.unwrap();

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "garang@example.com");
        assert_eq!(user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_key_error() {
        let mock_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint".to_string(),
            )])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(mock_db));

        let result = repository.create_user(new_user()).await;

        assert!(matches!(result, Err(UserRepositoryError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_create_user_database_error() {
        let mock_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection timeout".to_string())])
            .into_connection();

        let repository = UserRepositoryPostgres::new(Arc::new(mock_db));

        match repository.create_user(new_user()).await.unwrap_err() {
            UserRepositoryError::DatabaseError(msg) => assert!(msg.contains("connection timeout")),
            other => panic!("Expected DatabaseError variant, got {:?}", other),
        }
    }
}
