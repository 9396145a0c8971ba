use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProjectResult;
use crate::models::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Repository trait for Project persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Insert a new project
    async fn create(&self, input: CreateProject) -> ProjectResult<Project>;

    /// Get a project by ID
    async fn get_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>>;

    /// List projects matching the filter, newest first
    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>>;

    /// Replace an existing project, returning `None` when it does not exist
    async fn update(&self, id: Uuid, input: UpdateProject) -> ProjectResult<Option<Project>>;

    /// Delete a project by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> ProjectResult<bool>;
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, input: CreateProject) -> ProjectResult<Project> {
        let project = Project::new(input);
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());

        tracing::info!(project_id = %project.id, "Created project");
        Ok(project)
    }

    async fn get_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;

        let mut result: Vec<Project> = projects
            .values()
            .filter(|p| filter.status.is_none_or(|status| p.status == status))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = filter.offset.unwrap_or(0) as usize;
        let mut result: Vec<Project> = result.into_iter().skip(offset).collect();
        if let Some(limit) = filter.limit {
            result.truncate(limit as usize);
        }

        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateProject) -> ProjectResult<Option<Project>> {
        let mut projects = self.projects.write().await;

        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };

        project.apply_update(input);
        let updated = project.clone();

        tracing::info!(project_id = %id, "Updated project");
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> ProjectResult<bool> {
        if self.projects.write().await.remove(&id).is_some() {
            tracing::info!(project_id = %id, "Deleted project");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
