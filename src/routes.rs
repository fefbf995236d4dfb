use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::CatalogResource;
use crate::handlers::{auth, catalog, health};
use crate::middleware;
use crate::models::{Developer, Game, Genre, Platform, Publisher};
use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public health checks
        .merge(health_routes())
        // Auth routes, rate limited per client IP
        .merge(auth_routes(state.clone()))
        // Catalog API, behind the API key
        .merge(api_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/livez", get(health::livez))
        .route("/readyz", get(health::readyz))
        .route("/startupz", get(health::startupz))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        // Logout additionally requires a valid session token
        .route(
            "/auth/logout",
            post(auth::logout)
                .layer(from_fn_with_state(state.clone(), middleware::require_session)),
        )
        .layer(from_fn_with_state(state, middleware::throttle))
}

fn api_routes(state: AppState) -> Router<AppState> {
    let api = Router::new()
        .route("/", get(api_root))
        .merge(resource_routes::<Platform>())
        .merge(resource_routes::<Game>())
        .merge(resource_routes::<Genre>())
        .merge(resource_routes::<Developer>())
        .merge(resource_routes::<Publisher>())
        .layer(from_fn_with_state(state, middleware::require_api_key));

    Router::new().nest("/api", api)
}

/// The five catalog resources share one route shape.
fn resource_routes<R: CatalogResource>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{}", R::COLLECTION),
            get(catalog::list::<R>).post(catalog::create::<R>),
        )
        .route(
            &format!("/{}/:id", R::COLLECTION),
            get(catalog::get::<R>)
                .put(catalog::update::<R>)
                .delete(catalog::remove::<R>),
        )
}

async fn api_root() -> &'static str {
    "It runs!"
}
