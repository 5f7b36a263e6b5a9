use crate::routes::{course, health, review, root, social};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        course::get_courses,
        course::get_course_by_id,
        course::get_course_filters,
        course::get_related_courses,
        course::get_history_courses,
        social::follow,
        social::unfollow,
        social::upvote,
        social::un_upvote,
        social::downvote,
        social::un_downvote,
        social::join,
        social::quit,
        social::get_social_state,
        review::create_review,
        review::update_review,
        review::delete_review,
        review::get_own_review
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Social", description = "Follow, vote and enrollment toggles"),
        (name = "Reviews", description = "Course review endpoints"),
        (name = "Health", description = "Service health endpoints"),
    ),
    info(
        title = "Course Hub API",
        version = "1.0.0",
        description = "Course catalog, rating and review API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
