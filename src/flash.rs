//! One-shot flash notices, carried in a short-lived cookie.
//!
//! A notice set while redirecting is displayed on the next rendered page and
//! cleared by that same response, so it is seen exactly once.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use cookie::Cookie;
use std::convert::Infallible;

/// Cookie name for the pending notice.
pub const FLASH_COOKIE: &str = "quillpost_notice";

/// Flash
///
/// Extractor yielding the pending notice, if any. Reading it does not clear
/// the cookie; the rendering handler attaches the removal via [`rendered`].
#[derive(Debug, Clone)]
pub struct Flash(pub Option<String>);

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash(cookie_value(&parts.headers, FLASH_COOKIE)))
    }
}

/// Scan the request's Cookie headers for a named, percent-encoded cookie.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for cookie in Cookie::split_parse_encoded(raw.to_owned()).flatten() {
            if cookie.name() == name {
                return Some(cookie.value().to_string());
            }
        }
    }
    None
}

/// Set-Cookie value carrying a notice to the next rendered page.
pub fn set_cookie(message: &str) -> String {
    Cookie::build((FLASH_COOKIE, message))
        .path("/")
        .http_only(true)
        .build()
        .encoded()
        .to_string()
}

/// Set-Cookie value removing a displayed notice.
pub fn clear_cookie() -> String {
    let mut removal = Cookie::build((FLASH_COOKIE, "")).path("/").build();
    removal.make_removal();
    removal.encoded().to_string()
}

/// Redirect to `to`, leaving `message` as the notice for the target page.
pub fn redirect_with(to: &str, message: &str) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, set_cookie(message))]),
        Redirect::to(to),
    )
        .into_response()
}

/// Wrap a rendered page body, clearing the notice cookie when the page
/// displayed one.
pub fn rendered(html: String, clear_notice: bool) -> Response {
    if clear_notice {
        (
            AppendHeaders([(header::SET_COOKIE, clear_cookie())]),
            axum::response::Html(html),
        )
            .into_response()
    } else {
        axum::response::Html(html).into_response()
    }
}
