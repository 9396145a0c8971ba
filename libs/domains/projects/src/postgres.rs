use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::ProjectResult,
    models::{CreateProject, Project, ProjectFilter, UpdateProject},
    repository::ProjectRepository,
};

/// PostgreSQL implementation of ProjectRepository
pub struct PgProjectRepository {
    db: DatabaseConnection,
}

impl PgProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn create(&self, input: CreateProject) -> ProjectResult<Project> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(project_id = %model.id, "Created project");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let mut query = entity::Entity::find().order_by_desc(entity::Column::CreatedAt);

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }
        if let Some(offset) = filter.offset {
            query = query.offset(offset);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProject) -> ProjectResult<Option<Project>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut project: Project = model.into();
        project.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(project.id),
            title: Set(project.title.clone()),
            description: Set(project.description.clone()),
            link: Set(project.link.clone()),
            technologies: Set(serde_json::json!(project.technologies)),
            status: Set(project.status),
            preview: Set(project.preview.clone()),
            created_at: Set(project.created_at.into()),
            updated_at: Set(project.updated_at.into()),
        };

        let updated_model = active_model.update(&self.db).await?;

        tracing::info!(project_id = %id, "Updated project");
        Ok(Some(updated_model.into()))
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(project_id = %id, "Deleted project");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
