use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// JSON body extractor whose rejections use the API's `{ "error": ... }` shape
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl From<AppJsonRejection> for AppError {
    fn from(rejection: AppJsonRejection) -> Self {
        let rejection = rejection.0;
        match rejection {
            JsonRejection::JsonDataError(err) => {
                AppError::BadRequest(format!("Request body has the wrong shape: {}", err.body_text()))
            }
            JsonRejection::JsonSyntaxError(err) => {
                AppError::BadRequest(format!("Request body is not valid JSON: {}", err.body_text()))
            }
            JsonRejection::MissingJsonContentType(_) => {
                AppError::BadRequest("Content-Type must be application/json".to_string())
            }
            JsonRejection::BytesRejection(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                AppError::PayloadTooLarge("Request body is too large".to_string())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::DefaultBodyLimit, routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    async fn accept(AppJson(payload): AppJson<Payload>) -> String {
        payload.name
    }

    fn server(limit: usize) -> TestServer {
        let app = Router::new()
            .route("/echo", post(accept))
            .layer(DefaultBodyLimit::max(limit));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        server(1024)
            .post("/echo")
            .json(&json!({ "name": "cat.png" }))
            .await
            .assert_text("cat.png");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let response = server(1024)
            .post("/echo")
            .text("{\"name\":")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Request body is not valid JSON"));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let response = server(1024).post("/echo").text("{\"name\":\"x\"}").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Content-Type must be application/json" }));
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let response = server(16)
            .post("/echo")
            .json(&json!({ "name": "a-very-long-filename-well-past-the-limit.png" }))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        response.assert_json(&json!({ "error": "Request body is too large" }));
    }
}
