pub mod assets;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;

use axum::{
    Router,
    routing::{get, post},
};
use foodgram_shopping::{
    ExportService, NoAgreement, Pluralize, RussianInflector, SqliteCartStore, UnitPluralizer,
    render::{FontFile, FontSource},
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::{assets::EmbeddedFont, config::ShoppingConfig};

pub use routes::AppState;

/// Builds the router with every route mounted.
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/recipes/download_shopping_cart",
            get(routes::download_shopping_cart),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(routes::add_to_cart).delete(routes::remove_from_cart),
        );

    Router::new()
        .route("/health", get(routes::health))
        .route("/ready", get(routes::ready))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Unit agreement for the configured locale.
pub fn pluralizer(config: &ShoppingConfig) -> Box<dyn Pluralize> {
    if config.locale == "none" {
        return Box::new(NoAgreement);
    }

    let pluralizer = config.plural_exceptions.iter().fold(
        UnitPluralizer::new(config.plural_threshold),
        |pluralizer, (word, [few, many])| pluralizer.exception(word, few, many),
    );

    Box::new(pluralizer.inflector(RussianInflector))
}

/// The font configured by path, or the one compiled into the binary.
pub fn font_source(config: &ShoppingConfig) -> Box<dyn FontSource> {
    match &config.font_path {
        Some(path) => Box::new(FontFile::new(path)),
        None => Box::new(EmbeddedFont::default()),
    }
}

pub fn export_service(read_db: SqlitePool, config: &ShoppingConfig) -> ExportService {
    ExportService::new(
        SqliteCartStore(read_db),
        pluralizer(config),
        font_source(config),
    )
}
