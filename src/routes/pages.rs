// ABOUTME: Landing page route and shared HTML rendering for browser pages
// ABOUTME: Renders the minimal embedded pages served to unauthenticated visitors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

use std::sync::Arc;

use axum::{response::Html, routing::get, Router};

use crate::constants::routes;
use crate::server::ServerResources;

/// Landing page route handlers
pub struct PageRoutes;

impl PageRoutes {
    /// Create the landing page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::INDEX, get(Self::handle_index))
            .with_state(resources)
    }

    /// Handle GET / - landing page with login and register links
    async fn handle_index() -> Html<String> {
        Html(render_page(
            "Parley",
            r#"<h1>Parley</h1>
<p>A small chat service. Sign in to start a conversation.</p>
<p><a href="/login">Log in</a> or <a href="/register">create an account</a>.</p>"#,
        ))
    }
}

/// Wrap page body content in the shared HTML shell
pub(crate) fn render_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 28rem; margin: 4rem auto; padding: 0 1rem; color: #222; }}
label {{ display: block; margin-top: 0.75rem; }}
input {{ width: 100%; padding: 0.4rem; margin-top: 0.25rem; }}
button {{ margin-top: 1rem; padding: 0.5rem 1.25rem; }}
.error {{ color: #b00020; margin-top: 0.75rem; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Render the login form, optionally with an error and a prefilled email
pub(crate) fn login_page(error: Option<&str>, email_prefill: &str) -> String {
    let email = html_escape::encode_double_quoted_attribute(email_prefill);
    let body = format!(
        r#"<h1>Log in</h1>
<form method="post" action="{login}">
<label for="email">Email</label>
<input type="email" id="email" name="email" value="{email}" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">Log in</button>
</form>
{error}
<p>No account yet? <a href="{register}">Register</a>.</p>"#,
        login = routes::LOGIN,
        register = routes::REGISTER,
        error = error_banner(error),
    );
    render_page("Log in - Parley", &body)
}

/// Render the registration form, optionally with an error and prefilled fields
pub(crate) fn register_page(error: Option<&str>, name_prefill: &str, email_prefill: &str) -> String {
    let name = html_escape::encode_double_quoted_attribute(name_prefill);
    let email = html_escape::encode_double_quoted_attribute(email_prefill);
    let body = format!(
        r#"<h1>Create an account</h1>
<form method="post" action="{register}">
<label for="name">Name</label>
<input type="text" id="name" name="name" value="{name}" required>
<label for="email">Email</label>
<input type="email" id="email" name="email" value="{email}" required>
<label for="password">Password</label>
<input type="password" id="password" name="password" required>
<button type="submit">Register</button>
</form>
{error}
<p>Already registered? <a href="{login}">Log in</a>.</p>"#,
        register = routes::REGISTER,
        login = routes::LOGIN,
        error = error_banner(error),
    );
    render_page("Register - Parley", &body)
}

fn error_banner(error: Option<&str>) -> String {
    error.map_or_else(String::new, |text| {
        format!(r#"<p class="error">{}</p>"#, html_escape::encode_text(text))
    })
}
