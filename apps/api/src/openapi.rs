use utoipa::OpenApi;

/// Combined OpenAPI documentation served at /swagger-ui
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        description = "Backend for the portfolio site: project management with preview images"
    ),
    components(schemas(axum_helpers::ErrorResponse)),
    nest(
        (path = "/api/project", api = domain_projects::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
