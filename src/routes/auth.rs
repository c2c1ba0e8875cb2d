// ABOUTME: Authentication routes for registration, login, and logout
// ABOUTME: Renders the form pages and handles credential checks and session cookies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! Authentication routes
//!
//! Browser-facing registration and login. Successful logins set the session
//! cookie and redirect to the chat overview; failures re-render the form with
//! a generic error so credential probing learns nothing.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::constants::{limits, routes};
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::models::User;
use crate::routes::pages::{login_page, register_page};
use crate::security::cookies::{clear_session_cookie, session_cookie};
use crate::server::ServerResources;

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Account email address
    pub email: String,
    /// Account password
    pub password: String,
}

/// Registration form fields
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Display name shown in the chat interface
    pub name: String,
    /// Account email address
    pub email: String,
    /// Account password
    pub password: String,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                routes::LOGIN,
                get(Self::handle_login_page).post(Self::handle_login),
            )
            .route(
                routes::REGISTER,
                get(Self::handle_register_page).post(Self::handle_register),
            )
            .route(routes::LOGOUT, get(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle GET /login - render the login form
    async fn handle_login_page() -> Html<String> {
        Html(login_page(None, ""))
    }

    /// Handle POST /login - check credentials and set the session cookie
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<LoginForm>,
    ) -> Result<Response, AppError> {
        tracing::info!("User login attempt for email: {}", form.email);

        let Ok(user) = resources
            .database
            .get_user_by_email_required(&form.email)
            .await
        else {
            AppLogger::log_auth_event(&form.email, "login", false, Some("unknown email"));
            return Ok(Self::login_failure(&form.email));
        };

        // Verify password using spawn_blocking to avoid blocking async executor
        let password = form.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            tracing::warn!("Invalid password for user: {}", form.email);
            AppLogger::log_auth_event(&form.email, "login", false, Some("invalid password"));
            return Ok(Self::login_failure(&form.email));
        }

        resources.database.update_last_active(user.id).await?;
        let token = resources.auth_manager.issue_session(&user)?;

        tracing::info!("User logged in successfully: {} ({})", user.email, user.id);
        AppLogger::log_auth_event(&user.email, "login", true, None);

        let cookie = session_cookie(&token, resources.config.auth.session_expiry_hours);
        let mut response = Redirect::to(routes::CHAT).into_response();
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&cookie)
                .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?,
        );
        Ok(response)
    }

    /// Handle GET /register - render the registration form
    async fn handle_register_page() -> Html<String> {
        Html(register_page(None, "", ""))
    }

    /// Handle POST /register - create the account and send the user to login
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<RegisterForm>,
    ) -> Result<Response, AppError> {
        tracing::info!("User registration attempt for email: {}", form.email);

        let name = form.name.trim();

        // Validate email format
        if !Self::is_valid_email(&form.email) {
            return Ok(Self::register_failure(
                StatusCode::BAD_REQUEST,
                "Enter a valid email address",
                name,
                &form.email,
            ));
        }

        if name.chars().count() > limits::MAX_DISPLAY_NAME_CHARS {
            return Ok(Self::register_failure(
                StatusCode::BAD_REQUEST,
                "Display name is too long",
                "",
                &form.email,
            ));
        }

        // Check if user already exists
        if let Ok(Some(_)) = resources.database.get_user_by_email(&form.email).await {
            AppLogger::log_auth_event(&form.email, "register", false, Some("duplicate email"));
            return Ok(Self::register_failure(
                StatusCode::CONFLICT,
                "That email is already registered",
                name,
                &form.email,
            ));
        }

        let password_hash = bcrypt::hash(&form.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        let user = User::new(form.email.clone(), password_hash, name.to_string());
        let user_id = resources.database.create_user(&user).await?;

        tracing::info!("User registered successfully: {} ({})", form.email, user_id);
        AppLogger::log_auth_event(&form.email, "register", true, None);

        Ok(Redirect::to(routes::LOGIN).into_response())
    }

    /// Handle GET /logout - clear the session cookie
    async fn handle_logout() -> Result<Response, AppError> {
        let mut response = Redirect::to(routes::LOGIN).into_response();
        response.headers_mut().insert(
            header::SET_COOKIE,
            HeaderValue::from_str(&clear_session_cookie())
                .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?,
        );
        Ok(response)
    }

    fn login_failure(email_prefill: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Html(login_page(Some("Invalid email or password"), email_prefill)),
        )
            .into_response()
    }

    fn register_failure(
        status: StatusCode,
        error: &str,
        name_prefill: &str,
        email_prefill: &str,
    ) -> Response {
        (
            status,
            Html(register_page(Some(error), name_prefill, email_prefill)),
        )
            .into_response()
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        // Simple email validation
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false; // @ at start or end
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }
}
