use crate::{
    dtos::review::{ChangedResponse, ReviewRequest, ReviewResponse},
    routes::require_principal,
};
use axum::{Extension, Json, extract::Path, http::StatusCode};
use database::{
    db::create_connection,
    entities::courses,
    services::review::{ReviewDraft, ReviewService},
};
use models::rating::ReviewScores;
use sea_orm::{DatabaseConnection, EntityTrait, prelude::Uuid};
use tower_oauth2_resource_server::claims::DefaultClaims;

/// Write a review of a course
#[utoipa::path(
    post,
    path = "/courses/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ReviewResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Caller already reviewed this course"),
        (status = 422, description = "Scores out of range"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;
    let draft = validated_draft(body)?;

    let created = ReviewService::create(&db, id, principal, draft)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match created {
        Some(review) => Ok(Json(review.into())),
        None => Err(StatusCode::CONFLICT),
    }
}

/// Edit the caller's review of a course
#[utoipa::path(
    put,
    path = "/courses/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course or review not found"),
        (status = 422, description = "Scores out of range"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn update_review(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;
    let draft = validated_draft(body)?;

    let updated = ReviewService::update(&db, id, principal, draft)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match updated {
        Some(review) => Ok(Json(review.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Delete the caller's review of a course
#[utoipa::path(
    delete,
    path = "/courses/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Deletion outcome", body = ChangedResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ChangedResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let toggle = ReviewService::delete(&db, id, principal)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(ChangedResponse {
        changed: toggle.changed(),
    }))
}

/// Get the caller's own review of a course
#[utoipa::path(
    get,
    path = "/courses/{id}/reviews/mine",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Caller's review", body = ReviewResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 404, description = "Course or review not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn get_own_review(
    Path(id): Path<Uuid>,
    Extension(claims): Extension<DefaultClaims>,
) -> Result<Json<ReviewResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    ensure_course_exists(&db, id).await?;
    let principal = require_principal(&db, &claims).await?;

    let review = ReviewService::find_for_user(&db, id, principal.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match review {
        Some(review) => Ok(Json(review.into())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

fn validated_draft(body: ReviewRequest) -> Result<ReviewDraft, StatusCode> {
    let scores = ReviewScores::new(
        body.difficulty,
        body.homework,
        body.grading,
        body.gain,
        body.rate,
    )
    .map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?;

    Ok(ReviewDraft {
        scores,
        title: body.title,
        content: body.content,
    })
}

async fn ensure_course_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), StatusCode> {
    courses::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .map(|_| ())
        .ok_or(StatusCode::NOT_FOUND)
}
