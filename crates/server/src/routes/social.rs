use crate::{
    dtos::course::{JoinRequest, ToggleResponse, ViewerResponse},
    routes::require_principal,
};
use axum::{Extension, Json, extract::Path, http::StatusCode};
use database::{
    db::create_connection,
    entities::{course_rates, courses},
    services::{
        membership::{MembershipService, Toggle},
        review::ReviewService,
    },
};
use sea_orm::{DatabaseConnection, EntityTrait, prelude::Uuid};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Follow a course
#[utoipa::path(
    put,
    path = "/courses/{id}/follow",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn follow(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::follow(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::FollowCount).await
}

/// Stop following a course
#[utoipa::path(
    delete,
    path = "/courses/{id}/follow",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn unfollow(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::unfollow(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::FollowCount).await
}

/// Recommend a course
#[utoipa::path(
    put,
    path = "/courses/{id}/upvote",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn upvote(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::upvote(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::UpvoteCount).await
}

/// Withdraw a recommendation
#[utoipa::path(
    delete,
    path = "/courses/{id}/upvote",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn un_upvote(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::un_upvote(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::UpvoteCount).await
}

/// Recommend against a course
#[utoipa::path(
    put,
    path = "/courses/{id}/downvote",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn downvote(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::downvote(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::DownvoteCount).await
}

/// Withdraw a recommendation against a course
#[utoipa::path(
    delete,
    path = "/courses/{id}/downvote",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn un_downvote(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::un_downvote(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::DownvoteCount).await
}

/// Enroll into a class section of a course
#[utoipa::path(
    put,
    path = "/courses/{id}/join",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = JoinRequest,
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn join(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
    Json(body): Json<JoinRequest>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::join(&db, id, body.class_id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::JoinCount).await
}

/// Withdraw from a course's classes
#[utoipa::path(
    delete,
    path = "/courses/{id}/join",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Toggle applied", body = ToggleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn quit(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = MembershipService::quit(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    toggle_response(&db, id, toggle, course_rates::Column::JoinCount).await
}

/// Get everything the caller currently holds on a course
#[utoipa::path(
    get,
    path = "/courses/{id}/social",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Caller's state on the course", body = ViewerResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Social"
)]
pub async fn get_social_state(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ViewerResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let state = MembershipService::social_state(&db, id, principal.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let reviewed = ReviewService::find_for_user(&db, id, principal.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .is_some();

    Ok(Json(ViewerResponse::new(state, reviewed)))
}

async fn ensure_course_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), StatusCode> {
    courses::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map(|_| ())
        .ok_or(StatusCode::NOT_FOUND)
}

/// Report the toggle outcome together with its refreshed counter
async fn toggle_response(
    db: &DatabaseConnection,
    course_id: Uuid,
    toggle: Toggle,
    counter: course_rates::Column,
) -> Result<Json<ToggleResponse>, StatusCode> {
    let count = MembershipService::counter_value(db, course_id, counter)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(ToggleResponse {
        changed: toggle.changed(),
        count,
    }))
}
