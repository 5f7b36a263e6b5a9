use crate::dtos::course::{
    ClassResponse, CourseQueryParams, CourseResponse, CourseSummaryResponse,
    PaginatedCoursesResponse, PaginationMeta, TeacherResponse, TimeLocationResponse,
};
use axum::{
    Json,
    extract::{Path, Query},
    http::StatusCode,
};
use database::{
    db::create_connection,
    entities::{course_classes, courses, departments, time_locations},
    services::course::{CourseDetail, CourseService},
};
use models::schedule::slots_display;
use sea_orm::{EntityTrait, QueryOrder, prelude::Uuid};
use serde_json::json;

/// Get paginated list of courses
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = PaginatedCoursesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<PaginatedCoursesResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let per_page = params.effective_per_page();
    let (courses, total_items) = CourseService::get_courses_paginated(
        &db,
        params.page,
        per_page,
        params.search,
        params.courseries,
        params.department,
    )
    .await
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let course_responses = courses
        .into_iter()
        .map(|course| CourseSummaryResponse {
            id: course.id.to_string(),
            name: course.name,
            dept_id: course.dept_id.map(|id| id.to_string()),
        })
        .collect();

    let pagination = PaginationMeta::new(params.page, per_page, total_items);

    Ok(Json(PaginatedCoursesResponse {
        courses: course_responses,
        pagination,
    }))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(Path(id): Path<Uuid>) -> Result<Json<CourseResponse>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let detail = CourseService::get_course_by_id(&db, id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match detail {
        Some(detail) => Ok(Json(convert_to_course_response(detail))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Get courses sharing this course's name
#[utoipa::path(
    get,
    path = "/courses/{id}/related",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Courses with the same name", body = [CourseSummaryResponse]),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_related_courses(
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseSummaryResponse>>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let course = courses::Entity::find_by_id(id)
        .one(&db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let related = CourseService::related_courses(&db, &course.name)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(summaries_excluding(related, id)))
}

/// Get past offerings sharing this course's series number
#[utoipa::path(
    get,
    path = "/courses/{id}/history",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Courses whose offerings share the series number", body = [CourseSummaryResponse]),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_history_courses(
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseSummaryResponse>>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let detail = CourseService::get_course_by_id(&db, id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    // No series number on record means no history to look up
    let Some(courseries) = detail.profile().courseries else {
        return Ok(Json(vec![]));
    };

    let history = CourseService::history_courses(&db, &courseries)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(summaries_excluding(history, id)))
}

/// Get available departments for filtering
#[utoipa::path(
    get,
    path = "/courses/filters",
    responses(
        (status = 200, description = "Filter options retrieved successfully"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_filters() -> Result<Json<serde_json::Value>, StatusCode> {
    let db = create_connection()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let departments = departments::Entity::find()
        .order_by_asc(departments::Column::Name)
        .all(&db)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let departments: Vec<_> = departments
        .into_iter()
        .map(|dept| {
            json!({
                "id": dept.id.to_string(),
                "name": dept.name,
            })
        })
        .collect();

    Ok(Json(json!({ "departments": departments })))
}

/// The course itself never appears in its own related/history listings
fn summaries_excluding(courses: Vec<courses::Model>, id: Uuid) -> Vec<CourseSummaryResponse> {
    courses
        .into_iter()
        .filter(|course| course.id != id)
        .map(|course| CourseSummaryResponse {
            id: course.id.to_string(),
            name: course.name,
            dept_id: course.dept_id.map(|dept| dept.to_string()),
        })
        .collect()
}

/// Helper function to convert the assembled course detail to an API response
fn convert_to_course_response(detail: CourseDetail) -> CourseResponse {
    let profile = detail.profile();
    let rating = detail.rating_summary();

    let terms = detail.terms.iter().map(|term| term.term.clone()).collect();

    let teachers = detail
        .teachers
        .iter()
        .map(|teacher| TeacherResponse {
            id: teacher.id.to_string(),
            name: teacher.name.clone(),
        })
        .collect();

    let classes = detail
        .classes
        .iter()
        .map(|(class, slots)| convert_to_class_response(class, slots))
        .collect();

    CourseResponse {
        id: detail.course.id.to_string(),
        name: detail.course.name.clone(),
        department: detail.department.as_ref().map(|dept| dept.name.clone()),
        profile: profile.into(),
        terms,
        teachers,
        classes,
        rating: rating.into(),
    }
}

fn convert_to_class_response(
    class: &course_classes::Model,
    slots: &[time_locations::Model],
) -> ClassResponse {
    let meeting_slots: Vec<_> = slots.iter().map(time_locations::Model::slot).collect();

    let time_location_responses = slots
        .iter()
        .zip(&meeting_slots)
        .map(|(model, slot)| TimeLocationResponse {
            weekday: model.weekday,
            begin_hour: model.begin_hour,
            num_hours: model.num_hours,
            location: model.location.clone(),
            note: model.note.clone(),
            display: slot.time_location_display(),
        })
        .collect();

    ClassResponse {
        id: class.id.to_string(),
        term: class.term.clone(),
        section: class.section.clone(),
        time_locations: time_location_responses,
        schedule: slots_display(&meeting_slots),
    }
}
