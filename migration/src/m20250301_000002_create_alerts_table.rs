use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users_table::Users;

/// Reviewer references are restricted like creator references: a resolved
/// alert must keep its `verified_by`.
fn alerts_table() -> TableCreateStatement {
    Table::create()
        .table(Alerts::Table)
        .if_not_exists()
        .col(ColumnDef::new(Alerts::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Alerts::Title).string_len(255).not_null())
        .col(ColumnDef::new(Alerts::Description).text().not_null())
        .col(ColumnDef::new(Alerts::Location).string_len(255).not_null())
        .col(
            ColumnDef::new(Alerts::Level)
                .string_len(10)
                .not_null()
                .check(Expr::col(Alerts::Level).is_in(["low", "medium", "high"])),
        )
        .col(
            ColumnDef::new(Alerts::Status)
                .string_len(10)
                .not_null()
                .default("pending")
                .check(
                    Expr::col(Alerts::Status)
                        .is_in(["pending", "verified", "dismissed"]),
                ),
        )
        .col(ColumnDef::new(Alerts::Latitude).double().null())
        .col(ColumnDef::new(Alerts::Longitude).double().null())
        .col(ColumnDef::new(Alerts::CreatedBy).uuid().not_null())
        .col(ColumnDef::new(Alerts::VerifiedBy).uuid().null())
        .col(
            ColumnDef::new(Alerts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Alerts::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_alerts_created_by")
                .from(Alerts::Table, Alerts::CreatedBy)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_alerts_verified_by")
                .from(Alerts::Table, Alerts::VerifiedBy)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(alerts_table()).await?;

        // ============================================
        // ROW INVARIANTS
        // ============================================

        // verified_by is set exactly when the alert has left pending
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE alerts
                ADD CONSTRAINT chk_alerts_reviewer
                CHECK ((status = 'pending') = (verified_by IS NULL));
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE alerts
                ADD CONSTRAINT chk_alerts_coordinates
                CHECK (
                    (latitude IS NULL AND longitude IS NULL)
                    OR (latitude BETWEEN -90 AND 90 AND longitude BETWEEN -180 AND 180)
                );
                "#,
            )
            .await?;

        // ============================================
        // INDEXES
        // ============================================

        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_created_at")
                    .table(Alerts::Table)
                    .col(Alerts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alerts_status")
                    .table(Alerts::Table)
                    .col(Alerts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_alerts_updated_at
                BEFORE UPDATE ON alerts
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_alerts_updated_at ON alerts")
            .await?;

        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Alerts {
    Table,
    Id,
    Title,
    Description,
    Location,
    Level,
    Status,
    Latitude,
    Longitude,
    CreatedBy,
    VerifiedBy,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_references_are_restricted() {
        let sql = alerts_table().to_string(PostgresQueryBuilder);

        assert_eq!(sql.matches("ON DELETE RESTRICT").count(), 2);
        assert!(!sql.contains("SET NULL"));
    }
}
