use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    ApiResponse, AuditEvent, AuditOutcome, IDENTITY_HEADER, UuidPath,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::media::{ImageUpload, MediaStore};
use crate::models::{Project, ProjectFilter, ProjectInput, ProjectStatus};
use crate::repository::ProjectRepository;
use crate::revalidate::RevalidationNotifier;
use crate::service::ProjectService;

const TAG: &str = "projects";

/// OpenAPI documentation for the projects API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        get_project,
        create_project,
        update_project,
        delete_project,
    ),
    components(
        schemas(Project, ProjectInput, ProjectStatus),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Portfolio project endpoints")
    )
)]
pub struct ApiDoc;

/// Read-only routes, served without authentication
pub fn public_router<R, M, N>(service: Arc<ProjectService<R, M, N>>) -> Router
where
    R: ProjectRepository + 'static,
    M: MediaStore + 'static,
    N: RevalidationNotifier + 'static,
{
    Router::new()
        .route("/", get(list_projects))
        .route("/{id}", get(get_project))
        .with_state(service)
}

/// Mutation routes; the app wraps these with the admin guard
pub fn admin_router<R, M, N>(service: Arc<ProjectService<R, M, N>>) -> Router
where
    R: ProjectRepository + 'static,
    M: MediaStore + 'static,
    N: RevalidationNotifier + 'static,
{
    Router::new()
        .route("/", post(create_project))
        .route("/{id}", put(update_project).delete(delete_project))
        .with_state(service)
}

/// Read the submitted multipart form into project fields and an
/// optional image upload.
///
/// Text fields map onto `ProjectInput` by name; the file arrives under
/// `file_field` ("image" on create, "preview" on update). Unknown
/// fields are ignored.
async fn parse_project_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<(ProjectInput, Option<ImageUpload>), ProjectError> {
    let mut title = String::new();
    let mut description = String::new();
    let mut link = String::new();
    let mut technologies = String::new();
    let mut status = ProjectStatus::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProjectError::InvalidForm(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == file_field {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ProjectError::InvalidForm(e.to_string()))?;

            // Browsers submit an empty part when no file was chosen
            if !data.is_empty() {
                image = Some(ImageUpload { data, content_type });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ProjectError::InvalidForm(e.to_string()))?;

        match name.as_str() {
            "title" => title = value,
            "description" => description = value,
            "link" => link = value,
            "technologies" => technologies = value,
            "status" => {
                status = ProjectStatus::try_from(value.as_str()).map_err(|_| {
                    ProjectError::InvalidForm(format!("unknown status '{}'", value))
                })?;
            }
            _ => {}
        }
    }

    Ok((
        ProjectInput {
            title,
            description,
            link,
            technologies,
            status,
        },
        image,
    ))
}

fn audit_mutation(action: &'static str, id: Uuid, headers: &HeaderMap) {
    let actor = headers
        .get(IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    AuditEvent::new(
        actor,
        action,
        Some(format!("project:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(headers))
    .with_user_agent(extract_user_agent(headers))
    .log();
}

/// List projects, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProjectFilter),
    responses(
        (status = 200, description = "Projects matching the filter, newest first", body = ApiResponse<Vec<Project>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R, M, N>(
    State(service): State<Arc<ProjectService<R, M, N>>>,
    Query(filter): Query<ProjectFilter>,
) -> ProjectResult<Json<ApiResponse<Vec<Project>>>>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    let projects = service.list_projects(filter).await?;
    Ok(Json(ApiResponse::new(projects)))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project found", body = ApiResponse<Project>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R, M, N>(
    State(service): State<Arc<ProjectService<R, M, N>>>,
    UuidPath(id): UuidPath,
) -> ProjectResult<Json<ApiResponse<Project>>>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    let project = service.get_project(id).await?;
    Ok(Json(ApiResponse::new(project)))
}

/// Create a project from a multipart form.
///
/// Text fields: title, description, link, technologies, status.
/// The optional preview image is submitted under `image`.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(content = ProjectInput, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Project created", body = ApiResponse<Project>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R, M, N>(
    State(service): State<Arc<ProjectService<R, M, N>>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ProjectResult<impl IntoResponse>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    let (input, image) = parse_project_form(multipart, "image").await?;
    let project = service.create_project(input, image).await?;

    audit_mutation("project.create", project.id, &headers);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            project,
            "Project created successfully",
        )),
    ))
}

/// Replace a project from a multipart form.
///
/// Same text fields as create; a replacement preview image is
/// submitted under `preview`.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body(content = ProjectInput, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<Project>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_project<R, M, N>(
    State(service): State<Arc<ProjectService<R, M, N>>>,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
    multipart: Multipart,
) -> ProjectResult<Json<ApiResponse<Project>>>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    let (input, image) = parse_project_form(multipart, "preview").await?;
    let project = service.update_project(id, input, image).await?;

    audit_mutation("project.update", id, &headers);

    Ok(Json(ApiResponse::with_message(
        project,
        "Project updated successfully",
    )))
}

/// Delete a project and its preview image
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted", body = ApiResponse<Project>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_project<R, M, N>(
    State(service): State<Arc<ProjectService<R, M, N>>>,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
) -> ProjectResult<Json<ApiResponse<Project>>>
where
    R: ProjectRepository,
    M: MediaStore,
    N: RevalidationNotifier,
{
    let project = service.delete_project(id).await?;

    audit_mutation("project.delete", id, &headers);

    Ok(Json(ApiResponse::with_message(
        project,
        "Project deleted successfully",
    )))
}
