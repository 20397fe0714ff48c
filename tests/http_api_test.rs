use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bookshop::server::{self, AppState};
use bookshop::{app, ServiceConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE: &str = "/odata/v4/catalog";

fn router_for(config_toml: &str) -> Router {
    let config = ServiceConfig::from_toml_str(config_toml).unwrap();
    let service = app::build_service(&config).unwrap();
    let users = app::build_users(&config);
    server::router(AppState::new(service, users), &config.service.base_path)
}

fn memory_router() -> Router {
    router_for("[data]\nsource = \"memory\"\n")
}

fn secured_router() -> Router {
    router_for(
        r#"
[data]
source = "memory"

[auth]
enabled = true

[[auth.users]]
name = "alice"
token = "alice-token"
roles = ["Admin"]

[[auth.users]]
name = "vic"
token = "vic-token"
roles = ["Viewer"]

[[auth.users]]
name = "eve"
token = "eve-token"
roles = ["Editor"]
"#,
    )
}

async fn get(app: Router, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let response = app.oneshot(builder.body(Body::empty())?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_read_books_collection() -> Result<()> {
    let (status, body) = get(memory_router(), &format!("{}/Books", BASE), None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["@odata.context"], json!("$metadata#Books"));
    let books = body["value"].as_array().unwrap();
    assert_eq!(books.len(), 5);

    let discounts: Vec<Value> = books.iter().map(|b| b["discount"].clone()).collect();
    assert_eq!(discounts, vec![json!(0), json!(0), json!(5), json!(15), json!(15)]);
    Ok(())
}

#[tokio::test]
async fn test_query_options_do_not_filter() -> Result<()> {
    let uri = format!("{}/Books?$top=1&$filter=price%20gt%20100&$select=title", BASE);
    let (status, body) = get(memory_router(), &uri, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"].as_array().unwrap().len(), 5);
    assert!(body["value"][0].get("price").is_some());
    Ok(())
}

#[tokio::test]
async fn test_read_single_book_by_key() -> Result<()> {
    let (status, body) = get(memory_router(), &format!("{}/Books(251)", BASE), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["@odata.context"], json!("$metadata#Books/$entity"));
    assert_eq!(body["title"], json!("The Raven"));
    assert_eq!(body["discount"], json!(5));

    let (status, body) = get(memory_router(), &format!("{}/Books(ID=252)", BASE), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount"], json!(15));
    Ok(())
}

#[tokio::test]
async fn test_unknown_key_and_entity_are_404() -> Result<()> {
    let (status, body) = get(memory_router(), &format!("{}/Books(1)", BASE), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("404"));

    let (status, _) = get(memory_router(), &format!("{}/Authors", BASE), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_service_document() -> Result<()> {
    let (status, body) = get(memory_router(), BASE, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"][0]["name"], json!("Books"));
    Ok(())
}

#[tokio::test]
async fn test_service_document_with_trailing_slash() -> Result<()> {
    let (status, body) = get(memory_router(), &format!("{}/", BASE), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["@odata.context"], json!("$metadata"));
    assert_eq!(body["value"][0]["url"], json!("Books"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_entity_is_404_before_auth() -> Result<()> {
    let (status, body) = get(secured_router(), &format!("{}/Authors", BASE), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("404"));

    let (status, _) = get(secured_router(), &format!("{}/Books", BASE), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_auth_disabled_allows_anonymous() -> Result<()> {
    let (status, _) = get(memory_router(), &format!("{}/Books", BASE), Some("whatever")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_auth_enabled_requires_reader_role() -> Result<()> {
    let uri = format!("{}/Books", BASE);

    let (status, body) = get(secured_router(), &uri, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("401"));

    let (status, body) = get(secured_router(), &uri, Some("eve-token")).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], json!("Not authorized"));

    let (status, _) = get(secured_router(), &uri, Some("alice-token")).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(secured_router(), &format!("{}/Books(201)", BASE), Some("vic-token")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_missing_seed_file_is_500() -> Result<()> {
    let app = router_for("[data]\nsource = \"csv\"\npath = \"/no/such/dir/Books.csv\"\n");
    let (status, body) = get(app, &format!("{}/Books", BASE), None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], json!("500"));
    Ok(())
}

#[tokio::test]
async fn test_root_base_path() -> Result<()> {
    let app = router_for("[service]\nbase_path = \"/\"\n\n[data]\nsource = \"memory\"\n");
    let (status, body) = get(app, "/Books", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"].as_array().unwrap().len(), 5);
    Ok(())
}
