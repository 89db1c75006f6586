//! Login, registration, and logout handlers.
//!
//! Form failures redirect back to the form with an `?error=` code rather
//! than rendering an error page, so a refresh never re-posts credentials.
//! Successful registration logs the new account straight in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// The `?error=` code carried on a failure redirect.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub current_user: Option<CurrentUser>,
}

/// Human text for an `?error=` code.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.",
        "email_taken" => "An account with this email already exists.",
        "invalid_email" => "That email address doesn't look right.",
        "password_mismatch" => "The passwords don't match.",
        "password_too_short" => "Password must be at least 8 characters.",
        "session" => "Could not start a session. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
    .to_string()
}

/// Write the identity into the session and tag the Sentry scope.
async fn start_session(session: &Session, user: User) -> Result<(), ()> {
    let current_user = CurrentUser::from(user);

    if let Err(e) = set_current_user(session, &current_user).await {
        tracing::error!("Failed to write session: {e}");
        return Err(());
    }

    set_sentry_user(&current_user.id, Some(current_user.email.as_str()));
    Ok(())
}

/// Render the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
        current_user: None,
    }
}

/// Authenticate a login form.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(user) => match start_session(&session, user).await {
            Ok(()) => Redirect::to("/").into_response(),
            Err(()) => Redirect::to("/auth/login?error=session").into_response(),
        },
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
    }
}

/// Render the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(error_message),
        current_user: None,
    }
}

/// Create an account from the registration form and log it in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }

    match AuthService::new(state.pool())
        .register(&form.email, &form.password)
        .await
    {
        Ok(user) => match start_session(&session, user).await {
            Ok(()) => Redirect::to("/").into_response(),
            Err(()) => Redirect::to("/auth/login?error=session").into_response(),
        },
        Err(AuthError::UserAlreadyExists) => {
            Redirect::to("/auth/register?error=email_taken").into_response()
        }
        Err(AuthError::InvalidEmail(_)) => {
            Redirect::to("/auth/register?error=invalid_email").into_response()
        }
        Err(AuthError::WeakPassword(_)) => {
            Redirect::to("/auth/register?error=password_too_short").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            Redirect::to("/auth/register?error=failed").into_response()
        }
    }
}

/// Log out: clear the identity, destroy the session, untag Sentry.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    clear_sentry_user();

    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_map_to_distinct_messages() {
        let known = [
            "credentials",
            "email_taken",
            "invalid_email",
            "password_mismatch",
            "password_too_short",
            "session",
        ];
        for code in known {
            assert_ne!(error_message(code), error_message("anything-else"));
        }
    }

    #[test]
    fn unknown_error_code_gets_a_generic_message() {
        assert_eq!(error_message("failed"), error_message("nonsense"));
    }
}
