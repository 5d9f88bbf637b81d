//! Path traversal guard
//!
//! The route rule resolver matches on literal path segments; a `.` or `..`
//! segment could otherwise be used to dodge a rule and land on the read
//! fallback. Requests carrying such segments are rejected before any route
//! matching happens.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

fn has_dot_segments(path: &str) -> bool {
    path.split('/').any(|seg| seg == "." || seg == "..")
}

pub async fn path_guard_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if has_dot_segments(request.uri().path()) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_dot_segments() {
        assert!(has_dot_segments("/api/leads/../organizations"));
        assert!(has_dot_segments("/api/./leads"));
        assert!(has_dot_segments("/api/leads/./42"));
        assert!(!has_dot_segments("/api/leads/42"));
        assert!(!has_dot_segments("/api/attachments/report.v2.pdf")); // dots within a segment are fine
    }
}
