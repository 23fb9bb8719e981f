use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkpost::{config::Config, handlers, middleware_layer, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config).await?;
    tracing::info!("✅ AppState initialized");

    let public_routes = Router::new()
        .route("/", get(handlers::notes::show_latest))
        .route("/notes/{id}", get(handlers::notes::show_note))
        .route("/login", get(handlers::auth::login_form))
        .route("/login", post(handlers::auth::login))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/admin", get(handlers::notes::admin_index))
        .route("/admin/notes/new", get(handlers::notes::new_note_form))
        .route("/admin/notes", post(handlers::notes::create_note))
        .route("/admin/notes/{id}/edit", get(handlers::notes::edit_note_form))
        .route("/admin/notes/{id}", post(handlers::notes::update_note))
        .route("/admin/notes/{id}/delete", post(handlers::notes::delete_note))
        .route("/logout", post(handlers::auth::logout))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_admin,
        ))
        .with_state(state.clone());

    let app = Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
