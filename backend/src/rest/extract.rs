use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use shared::Parent;

use crate::error::AppError;
use crate::AppState;

/// The parent behind the request's bearer token.
///
/// Rejects with `Forbidden` when the header is missing, malformed, or names
/// no open session.
pub struct CurrentParent(pub Parent);

#[async_trait]
impl FromRequestParts<AppState> for CurrentParent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::forbidden("missing authorization header"))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::forbidden("malformed authorization header"))?;

        let parent = state.auth_service.authenticate(token.trim()).await?;
        Ok(CurrentParent(parent))
    }
}

/// JSON body extractor that keeps rejections inside the error envelope.
///
/// A missing field or unparseable body is an `InvalidInput` like any other
/// bad request, not a bare 422 from the framework.
pub struct Json<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(AppError::invalid_input(rejection.body_text())),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
