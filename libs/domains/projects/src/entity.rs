use crate::models::ProjectStatus;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the projects table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub link: String,
    pub technologies: Json, // JSONB field
    pub status: ProjectStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub preview: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from SeaORM Model to domain Project
impl From<Model> for crate::models::Project {
    fn from(model: Model) -> Self {
        let technologies: Vec<String> =
            serde_json::from_value(model.technologies.clone()).unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            link: model.link,
            technologies,
            status: model.status,
            preview: model.preview,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain CreateProject to SeaORM ActiveModel
impl From<crate::models::CreateProject> for ActiveModel {
    fn from(input: crate::models::CreateProject) -> Self {
        let now = chrono::Utc::now();

        ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(input.title),
            description: Set(input.description),
            link: Set(input.link),
            technologies: Set(serde_json::json!(input.technologies)),
            status: Set(input.status),
            preview: Set(input.preview),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
