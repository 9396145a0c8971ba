use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProjectError, ProjectResult};
use crate::media::{ImageUpload, MediaStore};
use crate::models::{Project, ProjectFilter, ProjectInput};
use crate::repository::ProjectRepository;
use crate::revalidate::{REVALIDATE_PATHS, RevalidationNotifier};

/// Service layer for project business logic.
///
/// Coordinates the repository, the media store and the cache
/// revalidation notifier so handlers stay thin.
#[derive(Clone)]
pub struct ProjectService<R, M, N>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    repository: Arc<R>,
    media: Arc<M>,
    notifier: Arc<N>,
}

impl<R, M, N> ProjectService<R, M, N>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    pub fn new(repository: R, media: M, notifier: N) -> Self {
        Self {
            repository: Arc::new(repository),
            media: Arc::new(media),
            notifier: Arc::new(notifier),
        }
    }

    /// Create a project, uploading the preview image first when present.
    pub async fn create_project(
        &self,
        input: ProjectInput,
        image: Option<ImageUpload>,
    ) -> ProjectResult<Project> {
        input.validate()?;

        let preview = match image {
            Some(image) => Some(self.media.upload(image).await?),
            None => None,
        };

        let project = self.repository.create(input.into_create(preview)).await?;

        self.notifier.notify(&REVALIDATE_PATHS);
        Ok(project)
    }

    /// Get a project by ID
    pub async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// List projects matching the filter, newest first
    pub async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        self.repository.list(filter).await
    }

    /// Replace a project's fields with the submitted ones.
    ///
    /// When a new image is uploaded the old preview object is removed
    /// only after the replacement is stored, so a failed upload never
    /// leaves the project without an image.
    pub async fn update_project(
        &self,
        id: Uuid,
        input: ProjectInput,
        image: Option<ImageUpload>,
    ) -> ProjectResult<Project> {
        input.validate()?;

        let existing = self.get_project(id).await?;

        let new_preview = match image {
            Some(image) => Some(self.media.upload(image).await?),
            None => None,
        };
        let replaced_preview = new_preview.is_some();

        let updated = self
            .repository
            .update(id, input.into_update(new_preview))
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        if replaced_preview {
            if let Some(old_url) = existing.preview.as_deref() {
                if updated.preview.as_deref() != Some(old_url) {
                    self.delete_media_best_effort(old_url).await;
                }
            }
        }

        self.notifier.notify(&REVALIDATE_PATHS);
        Ok(updated)
    }

    /// Delete a project and, best effort, its preview image.
    ///
    /// Returns the deleted project.
    pub async fn delete_project(&self, id: Uuid) -> ProjectResult<Project> {
        let existing = self.get_project(id).await?;

        if !self.repository.delete(id).await? {
            return Err(ProjectError::NotFound(id));
        }

        if let Some(preview) = existing.preview.as_deref() {
            self.delete_media_best_effort(preview).await;
        }

        self.notifier.notify(&REVALIDATE_PATHS);
        Ok(existing)
    }

    /// Remove a stored image, logging instead of failing.
    ///
    /// An orphaned object in the bucket is preferable to failing the
    /// mutation that already committed.
    async fn delete_media_best_effort(&self, url: &str) {
        if let Err(e) = self.media.delete(url).await {
            warn!(url = %url, error = %e, "Failed to delete preview image");
        }
    }
}
