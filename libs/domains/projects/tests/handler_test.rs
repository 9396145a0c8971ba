//! Handler tests for the projects domain.
//!
//! These exercise the HTTP layer over the in-memory repository and
//! media store: multipart parsing, response envelopes, status codes,
//! and error responses. Auth middleware and full app routing are
//! covered by the api app's tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_projects::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

type TestService = ProjectService<InMemoryProjectRepository, InMemoryMediaStore, RecordingNotifier>;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn test_app() -> (Router, Arc<TestService>, RecordingNotifier) {
    // The notifier and media store share state with their clones, so
    // tests can observe what the handlers did
    let notifier = RecordingNotifier::new();
    let service = Arc::new(ProjectService::new(
        InMemoryProjectRepository::new(),
        InMemoryMediaStore::new(),
        notifier.clone(),
    ));

    let app = handlers::public_router(service.clone()).merge(handlers::admin_router(service.clone()));
    (app, service, notifier)
}

/// Build a multipart/form-data body from text fields and an optional file part.
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, content_type, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\nContent-Type: {}\r\n\r\n",
                name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn valid_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("title", "Portfolio Site"),
        ("description", "Personal portfolio"),
        ("link", "https://example.com/portfolio"),
        ("technologies", "Rust, Axum, PostgreSQL"),
        ("status", "featured"),
    ]
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_project_returns_201_with_envelope() {
    let (app, _service, _notifier) = test_app();

    let request = multipart_request("POST", "/", multipart_body(&valid_fields(), None));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Project created successfully");
    assert_eq!(body["data"]["title"], "Portfolio Site");
    assert_eq!(
        body["data"]["technologies"],
        serde_json::json!(["Rust", "Axum", "PostgreSQL"])
    );
    assert_eq!(body["data"]["status"], "featured");
    assert!(body["data"]["preview"].is_null());
}

#[tokio::test]
async fn create_project_with_image_sets_preview() {
    let (app, service, _notifier) = test_app();

    let body = multipart_body(
        &valid_fields(),
        Some(("image", "image/png", b"\x89PNG fake image data")),
    );
    let response = app.oneshot(multipart_request("POST", "/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    let preview = body["data"]["preview"].as_str().unwrap();
    assert!(preview.contains("project_"));

    let projects = service.list_projects(ProjectFilter::default()).await.unwrap();
    assert_eq!(projects[0].preview.as_deref(), Some(preview));
}

#[tokio::test]
async fn create_project_validates_fields() {
    let (app, service, _notifier) = test_app();

    // Empty title and a relative link
    let fields = vec![
        ("title", ""),
        ("description", "d"),
        ("link", "/relative"),
        ("technologies", "Rust"),
    ];
    let response = app
        .oneshot(multipart_request("POST", "/", multipart_body(&fields, None)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["error"].is_string());
    assert!(body["details"]["title"].is_array());
    assert!(body["details"]["link"].is_array());

    assert!(service.list_projects(ProjectFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_project_rejects_unknown_status() {
    let (app, _service, _notifier) = test_app();

    let mut fields = valid_fields();
    fields.retain(|(name, _)| *name != "status");
    fields.push(("status", "published"));

    let response = app
        .oneshot(multipart_request("POST", "/", multipart_body(&fields, None)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_project_rejects_unsupported_image_type() {
    let (app, _service, _notifier) = test_app();

    let body = multipart_body(&valid_fields(), Some(("image", "image/gif", b"GIF89a")));
    let response = app.oneshot(multipart_request("POST", "/", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_project_returns_200() {
    let (app, service, _notifier) = test_app();

    let created = service
        .create_project(
            ProjectInput {
                title: "Fetch Me".to_string(),
                description: "d".to_string(),
                link: "https://example.com".to_string(),
                technologies: "Rust".to_string(),
                status: ProjectStatus::Featured,
            },
            None,
        )
        .await
        .unwrap();

    let request = Request::builder()
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], created.id.to_string());
    assert_eq!(body["data"]["title"], "Fetch Me");
}

#[tokio::test]
async fn get_missing_project_returns_404() {
    let (app, _service, _notifier) = test_app();

    let request = Request::builder()
        .uri(format!("/{}", uuid::Uuid::now_v7()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn get_with_malformed_id_returns_400() {
    let (app, _service, _notifier) = test_app();

    let request = Request::builder()
        .uri("/not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_projects_returns_newest_first() {
    let (app, service, _notifier) = test_app();

    for title in ["first", "second"] {
        service
            .create_project(
                ProjectInput {
                    title: title.to_string(),
                    description: "d".to_string(),
                    link: "https://example.com".to_string(),
                    technologies: "Rust".to_string(),
                    status: ProjectStatus::Featured,
                },
                None,
            )
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "second");
    assert_eq!(data[1]["title"], "first");
}

#[tokio::test]
async fn list_projects_filters_by_status_query() {
    let (app, service, _notifier) = test_app();

    for (title, status) in [("live", ProjectStatus::Featured), ("old", ProjectStatus::Archived)] {
        service
            .create_project(
                ProjectInput {
                    title: title.to_string(),
                    description: "d".to_string(),
                    link: "https://example.com".to_string(),
                    technologies: "Rust".to_string(),
                    status,
                },
                None,
            )
            .await
            .unwrap();
    }

    let request = Request::builder()
        .uri("/?status=archived")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "old");
}

#[tokio::test]
async fn update_project_replaces_fields() {
    let (app, service, _notifier) = test_app();

    let created = service
        .create_project(
            ProjectInput {
                title: "Before".to_string(),
                description: "d".to_string(),
                link: "https://example.com".to_string(),
                technologies: "Rust".to_string(),
                status: ProjectStatus::Featured,
            },
            None,
        )
        .await
        .unwrap();

    let fields = vec![
        ("title", "After"),
        ("description", "updated description"),
        ("link", "https://example.com/v2"),
        ("technologies", "Rust, Axum"),
        ("status", "archived"),
    ];
    let response = app
        .oneshot(multipart_request(
            "PUT",
            &format!("/{}", created.id),
            multipart_body(&fields, None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Project updated successfully");
    assert_eq!(body["data"]["title"], "After");
    assert_eq!(body["data"]["status"], "archived");
}

#[tokio::test]
async fn update_missing_project_returns_404() {
    let (app, _service, _notifier) = test_app();

    let response = app
        .oneshot(multipart_request(
            "PUT",
            &format!("/{}", uuid::Uuid::now_v7()),
            multipart_body(&valid_fields(), None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_project_returns_deleted_record() {
    let (app, service, _notifier) = test_app();

    let created = service
        .create_project(
            ProjectInput {
                title: "Doomed".to_string(),
                description: "d".to_string(),
                link: "https://example.com".to_string(),
                technologies: "Rust".to_string(),
                status: ProjectStatus::Featured,
            },
            None,
        )
        .await
        .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Project deleted successfully");
    assert_eq!(body["data"]["id"], created.id.to_string());

    // Gone afterwards
    let request = Request::builder()
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_notify_revalidation_paths() {
    let (app, _service, notifier) = test_app();

    let response = app
        .oneshot(multipart_request("POST", "/", multipart_body(&valid_fields(), None)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let calls = notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], REVALIDATE_PATHS.map(String::from).to_vec());
}
