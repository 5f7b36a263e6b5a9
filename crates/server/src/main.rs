use axum::{
    Router,
    routing::{get, post, put},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod doc;
mod dtos;
mod routes;
mod utils;

#[tokio::main]
async fn main() {
    env_logger::init();
    dotenvy::dotenv().ok();

    let issuer_url = std::env::var("OIDC_ISSUER_URL").expect("OIDC_ISSUER_URL must be set");
    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(&issuer_url)
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    // Everything mutating or caller-specific sits behind token validation;
    // the catalog stays readable anonymously.
    let protected = Router::new()
        .route(
            "/courses/{id}/follow",
            put(routes::social::follow).delete(routes::social::unfollow),
        )
        .route(
            "/courses/{id}/upvote",
            put(routes::social::upvote).delete(routes::social::un_upvote),
        )
        .route(
            "/courses/{id}/downvote",
            put(routes::social::downvote).delete(routes::social::un_downvote),
        )
        .route(
            "/courses/{id}/join",
            put(routes::social::join).delete(routes::social::quit),
        )
        .route("/courses/{id}/social", get(routes::social::get_social_state))
        .route(
            "/courses/{id}/reviews",
            post(routes::review::create_review)
                .put(routes::review::update_review)
                .delete(routes::review::delete_review),
        )
        .route(
            "/courses/{id}/reviews/mine",
            get(routes::review::get_own_review),
        )
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route("/courses", get(routes::course::get_courses))
        .route("/courses/filters", get(routes::course::get_course_filters))
        .route("/courses/{id}", get(routes::course::get_course_by_id))
        .route(
            "/courses/{id}/related",
            get(routes::course::get_related_courses),
        )
        .route(
            "/courses/{id}/history",
            get(routes::course::get_history_courses),
        )
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", doc::ApiDoc::openapi()))
        .layer(CompressionLayer::new());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Running axum on http://localhost:3000");

    axum::serve(listener, app)
        .with_graceful_shutdown(utils::shutdown::shutdown_signal())
        .await
        .unwrap();
}
