use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Publication status of a portfolio project
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "project_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectStatus {
    /// Shown on the landing page
    #[default]
    #[sea_orm(string_value = "featured")]
    Featured,
    /// Moved to the archive page
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Portfolio project entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Unique identifier
    pub id: Uuid,
    /// Project title
    pub title: String,
    /// Short description shown on cards
    pub description: String,
    /// Absolute URL to the live project or repository
    pub link: String,
    /// Technology labels, split from the submitted comma-separated string
    pub technologies: Vec<String>,
    /// Publication status
    pub status: ProjectStatus,
    /// Public URL of the preview image, if one was uploaded
    pub preview: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Raw form fields submitted when creating or updating a project.
///
/// `technologies` arrives as a single comma-separated string and is
/// split into labels after validation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 55))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    #[validate(url, length(min = 1))]
    pub link: String,
    #[validate(length(min = 1, max = 200))]
    pub technologies: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Validated data for inserting a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
    pub status: ProjectStatus,
    pub preview: Option<String>,
}

/// Validated data for replacing an existing project.
///
/// `preview` is `Some` only when a new image was uploaded; `None`
/// keeps the stored preview URL.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub title: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
    pub status: ProjectStatus,
    pub preview: Option<String>,
}

/// Query parameters accepted by the list endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectFilter {
    /// Only return projects with this status
    pub status: Option<ProjectStatus>,
    /// Maximum number of projects to return
    pub limit: Option<u64>,
    /// Number of projects to skip
    pub offset: Option<u64>,
}

/// Split a comma-separated technologies string into trimmed labels.
///
/// Empty entries (from doubled or trailing commas) are dropped.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl ProjectInput {
    /// Convert into insert data after validation, attaching the preview URL.
    pub fn into_create(self, preview: Option<String>) -> CreateProject {
        CreateProject {
            technologies: split_technologies(&self.technologies),
            title: self.title,
            description: self.description,
            link: self.link,
            status: self.status,
            preview,
        }
    }

    /// Convert into replacement data after validation.
    pub fn into_update(self, preview: Option<String>) -> UpdateProject {
        UpdateProject {
            technologies: split_technologies(&self.technologies),
            title: self.title,
            description: self.description,
            link: self.link,
            status: self.status,
            preview,
        }
    }
}

impl Project {
    /// Create a new project from validated insert data
    pub fn new(input: CreateProject) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            link: input.link,
            technologies: input.technologies,
            status: input.status,
            preview: input.preview,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored fields with the submitted ones.
    ///
    /// The preview URL is only replaced when the update carries a new one.
    pub fn apply_update(&mut self, update: UpdateProject) {
        self.title = update.title;
        self.description = update.description;
        self.link = update.link;
        self.technologies = update.technologies;
        self.status = update.status;
        if let Some(preview) = update.preview {
            self.preview = Some(preview);
        }
        self.updated_at = Utc::now();
    }
}
