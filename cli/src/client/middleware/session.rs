//! Session middleware for sending the backend session with every request.

use async_trait::async_trait;
use http::{Extensions, HeaderValue};
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next, Result};

/// Middleware that attaches the backend session cookie to requests.
///
/// Stands in for the browser's "include credentials" behavior.
pub struct SessionMiddleware {
    cookie: Option<HeaderValue>,
}

impl SessionMiddleware {
    /// Create a session middleware; `None` sends requests without a cookie.
    #[must_use]
    pub fn new(session_cookie: Option<&str>) -> Self {
        let cookie = session_cookie.and_then(|value| {
            HeaderValue::from_str(value)
                .map_err(|e| tracing::warn!("Ignoring invalid session cookie: {e}"))
                .ok()
        });
        Self { cookie }
    }
}

#[async_trait]
impl Middleware for SessionMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if let Some(cookie) = &self.cookie {
            req.headers_mut().insert(http::header::COOKIE, cookie.clone());
        }

        tracing::debug!(method = %req.method(), url = %req.url(), "Sending request");
        let response = next.run(req, extensions).await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            tracing::warn!(
                "Received {} - the session may have expired",
                response.status()
            );
        }

        Ok(response)
    }
}
