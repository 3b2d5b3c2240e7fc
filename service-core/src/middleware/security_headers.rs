use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

fn is_api_route(path: &str) -> bool {
    path.starts_with("/api/") || path == "/metrics"
}

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let api_route = is_api_route(req.uri().path());

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        header::HeaderValue::from_static("no-referrer"),
    );

    if api_route {
        // JSON and metrics responses never load subresources.
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        );
    } else {
        // Static site pages load their own scripts, styles, images and JSON content.
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 img-src 'self' data:; \
                 connect-src 'self'; \
                 frame-ancestors 'self'",
            ),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("SAMEORIGIN"),
        );
    }

    response
}
