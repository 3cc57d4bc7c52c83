//! Cookie-based session identity.
//!
//! Visitors are identified by an opaque `btk_session` cookie. The extractor
//! reuses an existing id or mints a fresh one; handlers attach the
//! `Set-Cookie` header only when the id is new.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderValue, COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "btk_session";

#[derive(Debug, Clone)]
pub struct SessionId {
    pub id: String,
    pub is_new: bool,
}

impl SessionId {
    /// `Set-Cookie` value when this request minted a new session.
    pub fn set_cookie_header(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        let value = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id
        );
        HeaderValue::from_str(&value).ok()
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let existing = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| is_safe_session_id(value));

        Ok(match existing {
            Some(id) => SessionId { id, is_new: false },
            None => SessionId {
                id: Uuid::new_v4().to_string(),
                is_new: true,
            },
        })
    }
}

/// Ids are minted as uuids; anything else smuggled through the cookie
/// (session ids end up in per-session file names) gets a fresh id instead.
fn is_safe_session_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= 64
        && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Attaches the `Set-Cookie` header when the session was minted on this
/// request.
pub fn with_session_cookie(body: impl IntoResponse, session: &SessionId) -> Response {
    let mut response = body.into_response();
    if let Some(cookie) = session.set_cookie_header() {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(request: Request<()>) -> SessionId {
        let (mut parts, _) = request.into_parts();
        SessionId::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reuses_existing_cookie() {
        let request = Request::builder()
            .header(COOKIE, "theme=dark; btk_session=abc-123")
            .body(())
            .unwrap();
        let session = extract(request).await;
        assert_eq!(session.id, "abc-123");
        assert!(!session.is_new);
        assert!(session.set_cookie_header().is_none());
    }

    #[tokio::test]
    async fn replaces_malformed_cookie_ids() {
        let request = Request::builder()
            .header(COOKIE, "btk_session=../../etc/passwd")
            .body(())
            .unwrap();
        let session = extract(request).await;
        assert!(session.is_new);
        assert_ne!(session.id, "../../etc/passwd");
    }

    #[tokio::test]
    async fn mints_a_new_id_without_cookie() {
        let request = Request::builder().body(()).unwrap();
        let session = extract(request).await;
        assert!(session.is_new);
        assert!(!session.id.is_empty());

        let header = session.set_cookie_header().unwrap();
        let header = header.to_str().unwrap();
        assert!(header.starts_with("btk_session="));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
    }
}
