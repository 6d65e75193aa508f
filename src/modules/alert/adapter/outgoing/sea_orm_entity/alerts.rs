use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::alert::application::domain::entities::{Alert, Coordinates};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    /// `low` | `medium` | `high`
    pub level: String,
    /// `pending` | `verified` | `dismissed`
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_by: Uuid,
    pub verified_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Alert {
    type Error = String;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let level = model
            .level
            .parse()
            .map_err(|e| format!("alert {}: level {}", model.id, e))?;
        let status = model
            .status
            .parse()
            .map_err(|e| format!("alert {}: status {}", model.id, e))?;

        let coordinates = match (model.latitude, model.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };

        Ok(Alert {
            id: model.id,
            title: model.title,
            description: model.description,
            location: model.location,
            level,
            status,
            coordinates,
            created_by: model.created_by,
            verified_by: model.verified_by,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}
