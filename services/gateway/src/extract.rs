use crate::error::AppError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use cardio_types::ids::SessionId;
use serde::de::DeserializeOwned;

/// Session id from the `{id}` path segment; malformed ids are invalid input
#[derive(Debug, Clone, Copy)]
pub struct SessionPath(pub SessionId);

impl<S> FromRequestParts<S> for SessionPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(session_id) = Path::<SessionId>::from_request_parts(parts, state).await?;
        Ok(SessionPath(session_id))
    }
}

/// JSON body whose decode failures use the gateway's error body
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
