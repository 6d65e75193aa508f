use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    /// `admin` | `user` | `responder`, guarded by a CHECK constraint.
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = String;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse()
            .map_err(|e| format!("user {}: {}", model.id, e))?;

        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            role,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}
