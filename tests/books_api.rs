//! HTTP API tests for the `/books` resource, run against the full router
//! with the in-memory backend.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use shelf_app::{
    modules::authors::{models::NewAuthor, repository::AuthorRepository},
    Storage,
};
use shelf_kernel::settings::{SeedAuthor, Settings, StorageBackend};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    author_id: Uuid,
}

impl TestApp {
    async fn new() -> Self {
        let storage = Storage::in_memory();
        let author_id = storage
            .authors
            .create_author(
                NewAuthor::new("Frank", Some("Herbert".into()), "frank@example.com").unwrap(),
            )
            .await
            .unwrap();

        let registry = shelf_app::build_registry(&storage);
        let router = shelf_http::build_router(&registry, &Settings::default());

        Self { router, author_id }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    async fn create(&self, title: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/books",
                Some(json!({ "title": title, "authorId": self.author_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn count(&self) -> usize {
        let (_, body) = self.send(Method::GET, "/books", None).await;
        body.as_array().unwrap().len()
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/healthz", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/books",
            Some(json!({ "title": "Dune", "authorId": app.author_id })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Book is created successfully");
    let id = body["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());

    let (status, book) = app.send(Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(book.is_object(), "single record, not an array");
    assert_eq!(book["id"], id);
    assert_eq!(book["title"], "Dune");
    assert_eq!(book["authorId"], app.author_id.to_string());
    assert!(book["description"].is_null());
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let app = TestApp::new().await;

    let first = app.create("Dune").await;
    let second = app.create("Dune Messiah").await;
    let third = app.create("Dune").await;

    assert_ne!(first, second);
    assert_ne!(first, third);
    assert_ne!(second, third);
}

#[tokio::test]
async fn test_create_without_title_is_rejected_without_insert() {
    let app = TestApp::new().await;

    for body in [
        json!({ "authorId": app.author_id }),
        json!({ "title": "", "authorId": app.author_id }),
        json!({ "title": null, "authorId": app.author_id }),
    ] {
        let (status, error) = app.send(Method::POST, "/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["message"], "title is required");
    }

    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_create_without_author_id_is_rejected_without_insert() {
    let app = TestApp::new().await;

    let (status, error) = app
        .send(Method::POST, "/books", Some(json!({ "title": "Dune" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["message"], "authorId is required");
    assert_eq!(error["error"]["details"][0]["field"], "authorId");
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_create_with_malformed_body_is_bad_request() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_create_with_unknown_author_is_internal_error() {
    let app = TestApp::new().await;

    let (status, error) = app
        .send(
            Method::POST,
            "/books",
            Some(json!({ "title": "Orphan", "authorId": Uuid::new_v4() })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["error"]["message"], "Failed to create book");
    assert_eq!(app.count().await, 0);
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let (status, error) = app.send(Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error["error"]["message"],
        format!("Book with id {id} does not exist!")
    );

    let (status, _) = app.send(Method::GET, "/books/123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_repeat_delete() {
    let app = TestApp::new().await;
    let id = app.create("Dune").await;
    app.create("Children of Dune").await;

    let (status, body) = app.send(Method::DELETE, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book Deleted");
    assert_eq!(app.count().await, 1);

    let (status, error) = app.send(Method::DELETE, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error["error"]["message"],
        format!("Book with id {id} does not exist!")
    );

    let (status, _) = app.send(Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_matches_title_substring_case_insensitively() {
    let app = TestApp::new().await;
    for title in ["Harry Potter", "the harry diaries", "Hairy Tale"] {
        app.create(title).await;
    }

    let (status, body) = app.send(Method::GET, "/books?search=Harry", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Harry Potter", "the harry diaries"]);

    let (_, body) = app.send(Method::GET, "/books?search=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_without_search_returns_everything() {
    let app = TestApp::new().await;
    assert_eq!(app.count().await, 0);

    app.create("Dune").await;
    app.create("Emma").await;

    let (status, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_openapi_document_lists_book_routes() {
    let app = TestApp::new().await;

    let (status, spec) = app.send(Method::GET, "/docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/books"]["get"].is_object());
    assert!(spec["paths"]["/books"]["post"].is_object());
    assert!(spec["paths"]["/books/{id}"]["delete"].is_object());
    assert!(spec["components"]["schemas"]["Author"].is_object());
}

#[tokio::test]
async fn test_duplicate_search_parameter_uses_error_envelope() {
    let app = TestApp::new().await;

    let (status, error) = app.send(Method::GET, "/books?search=a&search=b", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "bad_request");
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("search"));
}

#[tokio::test]
async fn test_memory_backend_serves_books_for_seeded_authors() {
    const SEEDED_ID: &str = "0b6f2a7e-5d0c-4f43-9a51-1b2a3c4d5e6f";

    let mut settings = Settings::default();
    settings.database.backend = StorageBackend::Memory;
    settings.database.seed_authors = vec![
        SeedAuthor {
            id: Some(SEEDED_ID.to_string()),
            first_name: "Frank".to_string(),
            last_name: Some("Herbert".to_string()),
            email: "frank@example.com".to_string(),
        },
        SeedAuthor {
            id: None,
            first_name: "Ursula".to_string(),
            last_name: None,
            email: "ursula@example.com".to_string(),
        },
    ];

    let storage = Storage::connect(&settings.database).await.unwrap();
    let registry = shelf_app::build_registry(&storage);
    let app = TestApp {
        router: shelf_http::build_router(&registry, &settings),
        author_id: Uuid::parse_str(SEEDED_ID).unwrap(),
    };

    let (status, body) = app
        .send(
            Method::POST,
            "/books",
            Some(json!({ "title": "Dune", "authorId": SEEDED_ID })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let id = body["id"].as_str().unwrap();
    let (status, book) = app.send(Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["authorId"], app.author_id.to_string());
}

#[tokio::test]
async fn test_invalid_seed_author_fails_startup() {
    let mut settings = Settings::default();
    settings.database.backend = StorageBackend::Memory;
    settings.database.seed_authors = vec![SeedAuthor {
        id: Some("42".to_string()),
        first_name: "Frank".to_string(),
        last_name: None,
        email: "frank@example.com".to_string(),
    }];

    let err = Storage::connect(&settings.database).await.err().unwrap();
    assert!(err.to_string().contains("invalid id"));
}
