use axum::http::StatusCode;

/// Plain-text banner confirming the API is reachable at the root path
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "coursehub API")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_serves_banner() {
        let (status, body) = root().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "coursehub API");
    }
}
