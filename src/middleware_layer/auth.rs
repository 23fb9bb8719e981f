use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

use crate::{
    error::AppError,
    handlers::auth::SESSION_COOKIE,
    services::session as session_service,
    state::AppState,
};

/// A middleware that requires a live admin session.
///
/// Denials redirect to the login surface rather than erroring.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// The downstream `Response`, or a redirect to `/login`.
pub async fn require_admin(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request<Body>,
    next: Next,
) -> Response {
    tracing::debug!("🔐 Checking admin session...");

    let token = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());

    match session_service::authorize(state.store.as_ref(), token.as_deref()).await {
        Ok(()) => {
            tracing::debug!("✅ Admin session valid");
            next.run(request).await
        }
        Err(AppError::Unauthorized) => {
            tracing::warn!("❌ No live session, redirecting to login");
            Redirect::to("/login").into_response()
        }
        Err(e) => e.into_response(),
    }
}
