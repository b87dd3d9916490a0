//! Visitor identity and per-request logging context.
//!
//! Every browser gets a random `visitor` cookie on its first request. The
//! middleware attaches the id as a [`Visitor`] request extension and runs
//! the rest of the request inside a `tracing` span carrying the request id,
//! viewer country, user agent and visitor id.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use rand::RngCore;
use time::{Duration, OffsetDateTime};
use tracing::{Instrument, info_span, warn};

/// Name of the visitor cookie.
const COOKIE_NAME: &str = "visitor";

/// Random bytes in a new visitor id.
const VISITOR_ID_BYTES: usize = 24;

/// Visitor cookie lifetime.
const COOKIE_LIFETIME_DAYS: i64 = 365;

/// The visitor making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    id: String,
    is_new: bool,
}

impl Visitor {
    /// A visitor seen before, identified by their cookie.
    pub fn returning(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_new: false,
        }
    }

    /// A first-time visitor with a freshly generated id.
    pub fn generate() -> Self {
        let mut bytes = [0u8; VISITOR_ID_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            id: URL_SAFE.encode(bytes),
            is_new: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Identify the visitor from request headers, generating an id if the
    /// cookie is missing.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        CookieJar::from_headers(headers)
            .get(COOKIE_NAME)
            .map(Cookie::value_trimmed)
            .filter(|v| !v.is_empty())
            .map(Self::returning)
            .unwrap_or_else(Self::generate)
    }

    /// Cookie persisting this visitor's id for a year from `now`.
    pub fn cookie(&self, now: OffsetDateTime) -> Cookie<'static> {
        Cookie::build((COOKIE_NAME, self.id.clone()))
            .path("/")
            .expires(now + Duration::days(COOKIE_LIFETIME_DAYS))
            .build()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Middleware assigning visitor identity and request logging context.
pub async fn track_visitor(mut req: Request, next: Next) -> Response {
    let headers = req.headers();
    let visitor = Visitor::from_headers(headers);

    let span = info_span!(
        "request",
        id = header_str(headers, "x-request-id"),
        country = header_str(headers, "cloudfront-viewer-country"),
        ua = header_str(headers, "user-agent"),
        visitor = visitor.id(),
    );

    req.extensions_mut().insert(visitor.clone());
    let mut response = next.run(req).instrument(span).await;

    if visitor.is_new() {
        let cookie = visitor.cookie(OffsetDateTime::now_utc());
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "could not build visitor cookie"),
        }
    }

    response
}
