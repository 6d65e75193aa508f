use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::alert::application::domain::entities::{Alert, AlertStatus, NewAlert};
use crate::alert::application::ports::outgoing::{AlertRepository, AlertRepositoryError};

use super::sea_orm_entity::alerts::{
    ActiveModel as AlertActiveModel, Column as AlertColumn, Entity as AlertEntity,
    Model as AlertModel,
};

#[derive(Clone, Debug)]
pub struct AlertRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AlertRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_error(e: sea_orm::DbErr) -> AlertRepositoryError {
    AlertRepositoryError::DatabaseError(e.to_string())
}

fn to_alert(model: AlertModel) -> Result<Alert, AlertRepositoryError> {
    Alert::try_from(model).map_err(AlertRepositoryError::DatabaseError)
}

#[async_trait]
impl AlertRepository for AlertRepositoryPostgres {
    async fn create(&self, alert: NewAlert) -> Result<Alert, AlertRepositoryError> {
        let coordinates = alert.coordinates();

        let active = AlertActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(alert.title().to_string()),
            description: Set(alert.description().to_string()),
            location: Set(alert.location().to_string()),
            level: Set(alert.level().as_str().to_string()),
            status: Set(AlertStatus::Pending.as_str().to_string()),
            latitude: Set(coordinates.map(|c| c.lat)),
            longitude: Set(coordinates.map(|c| c.lng)),
            created_by: Set(alert.created_by()),
            verified_by: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active.insert(&*self.db).await.map_err(db_error)?;
        to_alert(inserted)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Alert, AlertRepositoryError> {
        let model = AlertEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_error)?
            .ok_or(AlertRepositoryError::NotFound)?;

        to_alert(model)
    }

    async fn list(&self) -> Result<Vec<Alert>, AlertRepositoryError> {
        AlertEntity::find()
            .all(&*self.db)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(to_alert)
            .collect()
    }

    async fn transition_status(
        &self,
        id: Uuid,
        target: AlertStatus,
        verified_by: Uuid,
    ) -> Result<Alert, AlertRepositoryError> {
        // UPDATE .. WHERE id = $1 AND status = 'pending' RETURNING *
        let updated = AlertEntity::update_many()
            .col_expr(AlertColumn::Status, Expr::value(target.as_str()))
            .col_expr(AlertColumn::VerifiedBy, Expr::value(verified_by))
            .filter(AlertColumn::Id.eq(id))
            .filter(AlertColumn::Status.eq(AlertStatus::Pending.as_str()))
            .exec_with_returning(&*self.db)
            .await
            .map_err(db_error)?;

        match updated.into_iter().next() {
            Some(model) => to_alert(model),
            None => {
                let current = self.get_by_id(id).await?;
                Err(AlertRepositoryError::StatusConflict {
                    current: current.status,
                })
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), AlertRepositoryError> {
        let result = AlertEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(AlertRepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::application::domain::entities::{AlertLevel, Coordinates, NewAlertInput};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn model(id: Uuid, status: &str, verified_by: Option<Uuid>) -> AlertModel {
        let now = Utc::now().fixed_offset();
        AlertModel {
            id,
            title: "Armed group spotted near Panyagor".to_string(),
            description: "Group of 5-7 armed individuals".to_string(),
            location: "Eastern Panyagor".to_string(),
            level: "high".to_string(),
            status: status.to_string(),
            latitude: Some(7.15),
            longitude: Some(31.4),
            created_by: Uuid::new_v4(),
            verified_by,
            created_at: now,
            updated_at: now,
        }
    }

    fn repo(db: MockDatabase) -> AlertRepositoryPostgres {
        AlertRepositoryPostgres::new(Arc::new(db.into_connection()))
    }

    #[tokio::test]
    async fn test_create_alert_success() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id, "pending", None)]]);

        let new_alert = NewAlert::validate(
            NewAlertInput {
                title: Some("Armed group spotted near Panyagor".to_string()),
                description: Some("Group of 5-7 armed individuals".to_string()),
                location: Some("Eastern Panyagor".to_string()),
                level: Some("high".to_string()),
                coordinates: Some(Coordinates { lat: 7.15, lng: 31.4 }),
            },
            Uuid::new_v4(),
        )
        .unwrap();

        let alert = repo(db).create(new_alert).await.unwrap();

        assert_eq!(alert.id, id);
        assert_eq!(alert.level, AlertLevel::High);
        assert_eq!(alert.status, AlertStatus::Pending);
        assert_eq!(alert.coordinates, Some(Coordinates { lat: 7.15, lng: 31.4 }));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<AlertModel>::new()]);

        let result = repo(db).get_by_id(Uuid::new_v4()).await;
        assert_eq!(result.unwrap_err(), AlertRepositoryError::NotFound);
    }

    #[tokio::test]
    async fn test_list_rejects_corrupt_row() {
        let mut bad = model(Uuid::new_v4(), "pending", None);
        bad.level = "severe".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(Uuid::new_v4(), "verified", Some(Uuid::new_v4())), bad]]);

        let result = repo(db).list().await;
        assert!(matches!(result, Err(AlertRepositoryError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_list_returns_all_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            model(Uuid::new_v4(), "pending", None),
            model(Uuid::new_v4(), "dismissed", Some(Uuid::new_v4())),
        ]]);

        let alerts = repo(db).list().await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].status, AlertStatus::Dismissed);
    }

    #[tokio::test]
    async fn test_transition_status_success() {
        let id = Uuid::new_v4();
        let reviewer = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(id, "verified", Some(reviewer))]]);

        let alert = repo(db)
            .transition_status(id, AlertStatus::Verified, reviewer)
            .await
            .unwrap();

        assert_eq!(alert.status, AlertStatus::Verified);
        assert_eq!(alert.verified_by, Some(reviewer));
    }

    #[tokio::test]
    async fn test_transition_status_lost_race_reports_current() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([
            // conditional update matched nothing
            Vec::<AlertModel>::new(),
            // re-read
            vec![model(id, "dismissed", Some(Uuid::new_v4()))],
        ]);

        let result = repo(db)
            .transition_status(id, AlertStatus::Verified, Uuid::new_v4())
            .await;

        assert_eq!(
            result.unwrap_err(),
            AlertRepositoryError::StatusConflict {
                current: AlertStatus::Dismissed
            }
        );
    }

    #[tokio::test]
    async fn test_transition_status_missing_alert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<AlertModel>::new(), Vec::<AlertModel>::new()]);

        let result = repo(db)
            .transition_status(Uuid::new_v4(), AlertStatus::Dismissed, Uuid::new_v4())
            .await;

        assert_eq!(result.unwrap_err(), AlertRepositoryError::NotFound);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ]);
        let repo = repo(db);

        assert!(repo.delete(Uuid::new_v4()).await.is_ok());
        assert_eq!(
            repo.delete(Uuid::new_v4()).await.unwrap_err(),
            AlertRepositoryError::NotFound
        );
    }

    #[tokio::test]
    async fn test_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection timeout".to_string())]);

        match repo(db).get_by_id(Uuid::new_v4()).await.unwrap_err() {
            AlertRepositoryError::DatabaseError(msg) => assert!(msg.contains("connection timeout")),
            other => panic!("expected DatabaseError, got {:?}", other),
        }
    }
}
