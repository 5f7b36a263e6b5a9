use axum::http::StatusCode;
use database::{principal::Principal, services::user::UserService};
use sea_orm::DatabaseConnection;
use tower_oauth2_resource_server::claims::DefaultClaims;

pub mod course;
pub mod health;
pub mod review;
pub mod root;
pub mod social;

/// Resolve the acting principal from the validated token claims
///
/// A token whose subject has no account yet is rejected the same way as a
/// missing token.
pub(crate) async fn require_principal(
    db: &DatabaseConnection,
    claims: &DefaultClaims,
) -> Result<Principal, StatusCode> {
    let sub = claims.sub.as_ref().ok_or(StatusCode::UNAUTHORIZED)?;

    UserService::resolve_principal(db, sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)
}
