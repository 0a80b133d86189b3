//! One-shot flash messages carried in a cookie across a redirect.
//!
//! The cookie holds base64url-encoded JSON. Redirects append to whatever is
//! still pending; the next HTML page shows the messages and clears the cookie.

use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "hrp_flash";

const COOKIE_ATTRS: &str = "Path=/; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Info,
    Success,
    Error,
}

impl FlashCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashCategory::Info => "info",
            FlashCategory::Success => "success",
            FlashCategory::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }
}

fn cookie_value(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value)
}

/// Whether the request carries a flash cookie at all, decodable or not.
pub fn has_pending(headers: &HeaderMap) -> bool {
    cookie_value(headers).is_some()
}

/// Messages pending in the request. Undecodable cookies yield nothing.
pub fn pending(headers: &HeaderMap) -> Vec<Flash> {
    cookie_value(headers).map(decode).unwrap_or_default()
}

pub fn encode(flashes: &[Flash]) -> String {
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

pub fn decode(value: &str) -> Vec<Flash> {
    URL_SAFE_NO_PAD
        .decode(value.trim())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

pub fn set_cookie(flashes: &[Flash]) -> Option<HeaderValue> {
    let cookie = format!("{FLASH_COOKIE}={}; {COOKIE_ATTRS}", encode(flashes));
    HeaderValue::from_str(&cookie).ok()
}

pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("hrp_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// `302 Found` to `location`, queueing `new` after any pending messages.
pub fn redirect_with(headers: &HeaderMap, location: &'static str, new: Vec<Flash>) -> Response {
    let mut flashes = pending(headers);
    flashes.extend(new);

    let mut response = (
        StatusCode::FOUND,
        [(LOCATION, HeaderValue::from_static(location))],
    )
        .into_response();
    if let Some(cookie) = set_cookie(&flashes) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}
