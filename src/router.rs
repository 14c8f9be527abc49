use std::time::Duration;

use axum::{
    Router,
    http::{
        HeaderName, HeaderValue, Method,
        header::{
            ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE,
            ORIGIN, SET_COOKIE,
        },
    },
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::db::SpacecraftStorage;
use crate::handlers::spacecraft::{
    create_spacecraft, delete_spacecraft, filter_spacecrafts, get_spacecraft, update_spacecraft,
};

/// Context shared by every handler. Built once in `main` and passed down.
#[derive(Clone)]
pub struct SpacedockState {
    pub storage: SpacecraftStorage,
}

impl SpacedockState {
    pub fn new(storage: SpacecraftStorage) -> Self {
        Self { storage }
    }
}

pub fn spacedock_router(state: SpacedockState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .route(
            "/spacecraft",
            get(get_spacecraft)
                .post(create_spacecraft)
                .delete(delete_spacecraft)
                .patch(update_spacecraft),
        )
        .route("/filter-spacecrafts", get(filter_spacecrafts));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins))
        .with_state(state)
}

/// Origins that fail to parse as header values are dropped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::GET,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            AUTHORIZATION,
            ACCEPT,
            ORIGIN,
            CACHE_CONTROL,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([SET_COOKIE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}
