// ABOUTME: Security utilities for cookie handling on authenticated routes
// ABOUTME: Parses request cookies and builds Set-Cookie values for the session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! # Security utilities
//!
//! Cookie plumbing for the session layer. The session token travels in an
//! `HttpOnly` cookie, so browsers attach it automatically and page scripts
//! cannot read it.

/// Request cookie parsing and `Set-Cookie` construction
pub mod cookies {
    use crate::constants::{crypto, time_constants};
    use axum::http::HeaderMap;

    /// Extract a cookie value by name from request headers
    ///
    /// Handles multiple `Cookie` headers and multiple cookie pairs per header.
    #[must_use]
    pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
        headers
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| {
                let (key, value) = pair.trim().split_once('=')?;
                (key == name).then(|| value.to_string())
            })
            .next()
    }

    /// Build the `Set-Cookie` value installing the session token
    #[must_use]
    pub fn session_cookie(token: &str, expiry_hours: i64) -> String {
        let max_age = expiry_hours * time_constants::SECONDS_PER_HOUR;
        format!(
            "{}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}",
            crypto::SESSION_COOKIE
        )
    }

    /// Build the `Set-Cookie` value clearing the session token
    #[must_use]
    pub fn clear_session_cookie() -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
            crypto::SESSION_COOKIE
        )
    }

}
