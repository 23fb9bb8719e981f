use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tower_cookies::{Cookie, Cookies, cookie::SameSite, cookie::time::Duration};

use crate::{
    error::Result,
    pages,
    services::session as session_service,
    state::AppState,
};

/// The name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// The request payload for admin login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub secret: String,
}

/// Builds the session cookie.
fn session_cookie(token: String, ttl_hours: u64, production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(Duration::hours(ttl_hours as i64));
    cookie.set_path("/");
    if production {
        cookie.set_secure(true);
    }
    cookie
}

/// Serves the login form.
pub async fn login_form() -> Html<String> {
    Html(pages::login_page(None))
}

/// Handles admin login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(payload): Form<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt");

    if !session_service::compare_secret(&payload.secret, &state.config.admin_secret) {
        tracing::warn!("❌ Login rejected: bad credential");
        return Ok(Html(pages::login_page(Some("Wrong secret."))).into_response());
    }

    let ttl = StdDuration::from_secs(state.config.session_ttl_hours.saturating_mul(3600));
    let token = session_service::issue(state.store.as_ref(), ttl).await?;

    cookies.add(session_cookie(
        token,
        state.config.session_ttl_hours,
        state.config.production,
    ));

    tracing::info!("✅ Admin logged in, session issued");
    Ok(Redirect::to("/admin").into_response())
}

/// Handles admin logout.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<Response> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        session_service::revoke(state.store.as_ref(), cookie.value()).await?;
        tracing::info!("✅ Session revoked");
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);

    Ok(Redirect::to("/").into_response())
}
