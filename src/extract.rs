//! Request extractors whose rejections go through [`ApiError`], so malformed
//! bodies, query strings and paths get the JSON error envelope.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum_macros::{FromRequest, FromRequestParts};

use crate::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, extract::FromRequest, http::Request};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TitleOnly {
        #[allow(dead_code)]
        title: String,
    }

    #[tokio::test]
    async fn json_rejection_becomes_bad_request() {
        let request = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let Err(err) = Json::<TitleOnly>::from_request(request, &()).await else {
            panic!("body without title was accepted");
        };

        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("title"));
    }
}
