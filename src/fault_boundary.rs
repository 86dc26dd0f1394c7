//! Outermost request stage turning unhandled failures into a uniform 500 response.

use std::{any::Any, panic::AssertUnwindSafe};

use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Message returned to clients whenever a request fails unexpectedly.
pub const FAULT_MESSAGE: &str = "An error occurred while processing the request.";

/// Response extension flagging a failure no handler translated.
///
/// Carries the failure detail so it can be logged; it is never sent to the client.
#[derive(Debug, Clone)]
pub struct UnhandledFailure(pub String);

/// Body of the response produced by the fault boundary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FaultBody {
    /// Fixed, client-safe description of the failure.
    #[serde(rename = "Message")]
    pub message: String,
}

/// Delegate to the rest of the stack and replace any unhandled failure, including
/// a panic, with the fixed 500 response.
pub async fn fault_boundary(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let panic = panic_message(panic.as_ref());
            error!(%method, %uri, %panic, "request handler panicked");
            return fault_response();
        }
    };

    if let Some(UnhandledFailure(detail)) = response.extensions().get::<UnhandledFailure>() {
        error!(%method, %uri, error = %detail, "unhandled failure while processing request");
        return fault_response();
    }

    response
}

fn fault_response() -> Response {
    let body = Json(FaultBody {
        message: FAULT_MESSAGE.to_owned(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::to_bytes, middleware, routing::get};
    use tower::ServiceExt;

    use crate::error::AppError;

    async fn failing() -> Result<&'static str, AppError> {
        Err(AppError::Unhandled("database exploded".into()))
    }

    async fn panicking() -> &'static str {
        panic!("handler bug")
    }

    async fn rejected() -> Result<&'static str, AppError> {
        Err(AppError::BadRequest("nope".into()))
    }

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route("/failing", get(failing))
            .route("/panicking", get(panicking))
            .route("/rejected", get(rejected))
            .layer(middleware::from_fn(fault_boundary))
    }

    async fn call(path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn passes_successful_responses_through() {
        assert_eq!(call("/ok").await, (StatusCode::OK, "fine".to_owned()));
    }

    #[tokio::test]
    async fn replaces_unhandled_failures_with_the_fixed_body() {
        let (status, body) = call("/failing").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            r#"{"Message":"An error occurred while processing the request."}"#
        );
        assert!(!body.contains("database exploded"));
    }

    #[tokio::test]
    async fn converts_panics_into_the_fixed_body() {
        let (status, body) = call("/panicking").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let parsed: FaultBody = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.message, FAULT_MESSAGE);
    }

    #[tokio::test]
    async fn leaves_client_errors_untouched() {
        let (status, body) = call("/rejected").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"message":"bad request: nope"}"#);
    }
}
