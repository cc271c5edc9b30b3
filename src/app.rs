use axum::routing::post;
use axum::Router;

use crate::routes;

/// Path of the mocked PointClickCare token endpoint.
pub const TOKEN_PATH: &str = "/api/v1/auth/token";

/// Build the application router.
pub fn router() -> Router {
    Router::new().route(TOKEN_PATH, post(routes::token::token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(req: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router().oneshot(req).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    fn expected() -> Value {
        json!({
            "access_token": "mock_pcc_access_token_12345",
            "token_type": "Bearer",
            "expires_in": 3600
        })
    }

    #[tokio::test]
    async fn test_empty_body() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(TOKEN_PATH)
            .body(Body::empty())
            .unwrap();

        let (status, content_type, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(
            body,
            br#"{"access_token":"mock_pcc_access_token_12345","token_type":"Bearer","expires_in":3600}"#
        );
    }

    #[tokio::test]
    async fn test_json_body_is_ignored() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(TOKEN_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"foo":"bar"}"#))
            .unwrap();

        let (status, _, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, expected());
    }

    #[tokio::test]
    async fn test_form_body_without_content_type() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(TOKEN_PATH)
            .body(Body::from(
                "grant_type=client_credentials&client_id=abc&client_secret=xyz",
            ))
            .unwrap();

        let (status, _, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, expected());
        assert_eq!(value["expires_in"].as_u64(), Some(3600));
    }

    #[tokio::test]
    async fn test_malformed_json_is_ignored() {
        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{TOKEN_PATH}?scope=everything"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Basic Zm9vOmJhcg==")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, _, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, expected());
    }

    #[tokio::test]
    async fn test_get_not_allowed() {
        let req = Request::builder()
            .method(Method::GET)
            .uri(TOKEN_PATH)
            .body(Body::empty())
            .unwrap();

        let (status, _, _) = send(req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/refresh")
            .body(Body::empty())
            .unwrap();

        let (status, _, _) = send(req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
