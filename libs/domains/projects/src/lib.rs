//! Projects Domain
//!
//! Portfolio project management: CRUD over the projects table, preview
//! image storage, and frontend cache revalidation after mutations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (multipart forms in, JSON out)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, upload-then-persist orchestration
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────┐
//! │ Repository │ Media │ Notify │  ← Traits + Postgres/Supabase/webhook impls
//! └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_projects::{
//!     handlers,
//!     media::InMemoryMediaStore,
//!     repository::InMemoryProjectRepository,
//!     revalidate::RecordingNotifier,
//!     service::ProjectService,
//! };
//!
//! let service = Arc::new(ProjectService::new(
//!     InMemoryProjectRepository::new(),
//!     InMemoryMediaStore::new(),
//!     RecordingNotifier::new(),
//! ));
//!
//! let router = handlers::public_router(service.clone())
//!     .merge(handlers::admin_router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod revalidate;
pub mod service;

// Re-export commonly used types
pub use error::{ProjectError, ProjectResult};
pub use media::{ImageUpload, InMemoryMediaStore, MediaStore, SupabaseConfig, SupabaseMediaStore};
pub use models::{
    CreateProject, Project, ProjectFilter, ProjectInput, ProjectStatus, UpdateProject,
};
pub use postgres::PgProjectRepository;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use revalidate::{
    REVALIDATE_PATHS, RecordingNotifier, RevalidateConfig, RevalidationNotifier,
    WebhookRevalidationNotifier,
};
pub use service::ProjectService;
