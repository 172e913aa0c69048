//! Double-submit CSRF protection
//!
//! Safe requests get an `XSRF-TOKEN` cookie seeded; state-changing requests
//! must echo the cookie value back in the `X-XSRF-TOKEN` header.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::error::{AppError, ErrorCode};

use crate::util::random_token;

pub const CSRF_COOKIE: &str = "XSRF-TOKEN";
pub const CSRF_HEADER: &str = "X-XSRF-TOKEN";

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// Whether a state-changing request carries a header token matching the
/// cookie token
fn verify(cookie: Option<&str>, header: Option<&str>) -> bool {
    match (cookie, header) {
        (Some(cookie), Some(header)) => !cookie.is_empty() && cookie == header,
        _ => false,
    }
}

/// Middleware enforcing the double-submit check
pub async fn csrf_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    if is_safe(request.method()) {
        // seed the token cookie so clients can echo it on the next write
        let jar = if jar.get(CSRF_COOKIE).is_none() {
            let mut cookie = Cookie::new(CSRF_COOKIE, random_token());
            cookie.set_path("/");
            cookie.set_same_site(SameSite::Lax);
            jar.add(cookie)
        } else {
            jar
        };
        let response = next.run(request).await;
        return (jar, response).into_response();
    }

    let cookie = jar.get(CSRF_COOKIE).map(|c| c.value());
    let header = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());

    if verify(cookie, header) {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "CSRF token missing or mismatched");
        AppError::new(ErrorCode::CsrfRejected).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_methods() {
        assert!(is_safe(&Method::GET));
        assert!(is_safe(&Method::HEAD));
        assert!(!is_safe(&Method::POST));
        assert!(!is_safe(&Method::DELETE));
    }

    #[test]
    fn test_verify_requires_matching_pair() {
        assert!(verify(Some("tok"), Some("tok")));
        assert!(!verify(Some("tok"), Some("other")));
        assert!(!verify(Some("tok"), None));
        assert!(!verify(None, Some("tok")));
        assert!(!verify(Some(""), Some("")));
    }
}
