//! End-to-end tests for the HTTP execution pipeline against a mock server.

use cellforge_http::{HttpError, HttpExecutor};
use cellforge_model::{
    ApiKeyPlacement, AuthConfig, ColumnDef, ColumnType, HttpMethod, HttpRequestConfig, Row,
};
use futures::future::AbortHandle;
use indexmap::IndexMap;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base_config(url: String) -> HttpRequestConfig {
    HttpRequestConfig {
        id: "req1".into(),
        name: "lookup".into(),
        url,
        method: HttpMethod::Get,
        auth: AuthConfig::None,
        headers: IndexMap::new(),
        body: None,
        inputs: vec![],
        response_mapping: IndexMap::new(),
    }
}

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("domain", "Domain", ColumnType::Text),
        ColumnDef::new("industry", "Industry", ColumnType::Text),
        ColumnDef::new("size", "Size", ColumnType::Number),
    ]
}

fn row() -> Row {
    let mut r = Row::with_id("r1");
    r.set("domain", "acme.com");
    r
}

#[tokio::test]
async fn test_url_templating_and_response_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies/acme.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "industry": "Robotics",
            "details": {"employees": 250}
        })))
        .mount(&server)
        .await;

    let mut config = base_config(format!("{}/companies//domain", server.uri()));
    config
        .response_mapping
        .insert("industry".into(), "Industry".into());
    config
        .response_mapping
        .insert("details.employees".into(), "Size".into());

    let executor = HttpExecutor::new().unwrap();
    let outcome = executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap();

    assert_eq!(outcome.raw["industry"], "Robotics");
    assert_eq!(
        outcome.updates.get("industry").map(String::as_str),
        Some("Robotics")
    );
    assert_eq!(outcome.updates.get("size").map(String::as_str), Some("250"));
}

#[tokio::test]
async fn test_bearer_auth_and_body_templating() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/enrich"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"domain": "acme.com"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let mut config = base_config(format!("{}/enrich", server.uri()));
    config.method = HttpMethod::Post;
    config.auth = AuthConfig::Bearer {
        token: "tok-123".into(),
    };
    config.body = Some(r#"{"domain": "/domain"}"#.into());

    let executor = HttpExecutor::new().unwrap();
    let outcome = executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap();
    assert_eq!(outcome.raw["ok"], true);
}

#[tokio::test]
async fn test_api_key_in_query_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("api_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let mut config = base_config(format!("{}/data", server.uri()));
    config.auth = AuthConfig::ApiKey {
        key: "secret".into(),
        placement: ApiKeyPlacement::Query("api_key".into()),
    };

    let executor = HttpExecutor::new().unwrap();
    // The mock only matches when the key arrives as a query parameter; a
    // stray header would not satisfy the expectation either way.
    executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_api_key_in_header_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let mut config = base_config(format!("{}/data", server.uri()));
    config.auth = AuthConfig::ApiKey {
        key: "secret".into(),
        placement: ApiKeyPlacement::Header("X-Api-Key".into()),
    };

    let executor = HttpExecutor::new().unwrap();
    let outcome = executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap();
    // URL must not have grown a query string.
    assert!(outcome.updates.is_empty());
}

#[tokio::test]
async fn test_get_never_carries_a_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let mut config = base_config(format!("{}/data", server.uri()));
    config.body = Some(r#"{"should": "be dropped"}"#.into());

    let executor = HttpExecutor::new().unwrap();
    executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_2xx_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let config = base_config(format!("{}/data", server.uri()));
    let executor = HttpExecutor::new().unwrap();
    let err = executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap_err();

    match err {
        HttpError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_response_kept_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("just text"))
        .mount(&server)
        .await;

    let config = base_config(format!("{}/plain", server.uri()));
    let executor = HttpExecutor::new().unwrap();
    let outcome = executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap();
    assert_eq!(outcome.raw, serde_json::json!("just text"));
}

#[tokio::test]
async fn test_missing_url_is_config_error() {
    let config = base_config(String::new());
    let executor = HttpExecutor::new().unwrap();
    let err = executor
        .execute(&config, &row(), &columns(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Config(_)));
}

#[tokio::test]
async fn test_abort_signal_cancels() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let config = base_config(format!("{}/slow", server.uri()));
    let executor = HttpExecutor::new().unwrap();

    let (handle, registration) = AbortHandle::new_pair();
    let row = row();
    let columns = columns();
    let call = executor.execute(&config, &row, &columns, Some(registration));
    handle.abort();

    let err = call.await.unwrap_err();
    assert!(matches!(err, HttpError::Cancelled));
}

#[tokio::test]
async fn test_renamed_header_silently_detaches_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"industry": "Robotics"})),
        )
        .mount(&server)
        .await;

    let mut config = base_config(format!("{}/data", server.uri()));
    config
        .response_mapping
        .insert("industry".into(), "Industry".into());

    // Simulate a later rename of the target column.
    let mut cols = columns();
    cols[1].header = "Sector".into();

    let executor = HttpExecutor::new().unwrap();
    let outcome = executor.execute(&config, &row(), &cols, None).await.unwrap();
    assert!(outcome.updates.is_empty());
}
