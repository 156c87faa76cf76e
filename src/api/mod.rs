//! REST API routes for Loomi

pub mod auth;
pub mod cart;
pub mod consent;
pub mod enrich;
pub mod generate;
pub mod playlists;
pub mod search;

use actix_cors::Cors;
use actix_web::{get, http::header, web, HttpResponse, Responder};
use sqlx::SqlitePool;

use crate::config::UserConfig;
use crate::core::{EnrichmentLib, GeneratorService, SearchLib};
use crate::stores::CartStore;

/// Shared services handed to every handler
pub struct AppState {
    pub pool: SqlitePool,
    pub generator: GeneratorService,
    pub search: SearchLib,
    pub enrichment: EnrichmentLib,
    pub carts: CartStore,
    /// JWT secret and password salt
    pub server_id: String,
    /// Smallest cart that may be generated from
    pub min_cart_songs: usize,
}

impl AppState {
    pub fn from_config(
        pool: SqlitePool,
        config: &UserConfig,
        carts_dir: Option<std::path::PathBuf>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            pool,
            generator: GeneratorService::from_config(config)?,
            search: SearchLib::new(&config.search)?,
            enrichment: EnrichmentLib::from_config(&config.spotify)?,
            carts: CartStore::new(carts_dir, config.generator.max_cart_songs),
            server_id: config.server_id.clone(),
            min_cart_songs: config.generator.min_cart_songs,
        })
    }
}

/// CORS policy: any origin, the headers browser clients send
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-client-info"),
            header::HeaderName::from_static("apikey"),
        ])
        .supports_credentials()
        .max_age(3600)
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Liveness
        .service(health)
        // Playlist generation from raw liked songs
        .service(web::scope("/generate-playlists").configure(generate::configure))
        // Catalog search
        .service(web::scope("/search").configure(search::configure))
        // Playlist cart
        .service(web::scope("/cart").configure(cart::configure))
        // Track metadata
        .service(web::scope("/enrich").configure(enrich::configure))
        // Saved playlists
        .service(web::scope("/playlists").configure(playlists::configure))
        // Auth routes
        .service(web::scope("/auth").configure(auth::configure))
        // Cookie consent
        .service(web::scope("/consent").configure(consent::configure));
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::web;

    use super::AppState;
    use crate::config::{SearchConfig, SpotifyConfig};
    use crate::core::generator::HeuristicGenerator;
    use crate::core::{EnrichmentLib, GeneratorService, SearchLib};
    use crate::db::UserTable;
    use crate::models::User;
    use crate::plugins::spotify::SpotifyPlugin;
    use crate::stores::CartStore;
    use crate::utils::auth::{create_jwt, UserIdentity};

    pub const TEST_SERVER_ID: &str = "test-server";

    /// State backed by an in-memory database, offline services only
    pub async fn state() -> web::Data<AppState> {
        let pool = crate::db::engine::test_pool().await;
        let spotify = SpotifyPlugin::new(&SpotifyConfig::default()).unwrap();

        web::Data::new(AppState {
            pool,
            generator: GeneratorService::new(Arc::new(HeuristicGenerator::with_seed(1)), None, true),
            search: SearchLib::new(&SearchConfig::default()).unwrap(),
            enrichment: EnrichmentLib::new(Arc::new(spotify), 16, Duration::ZERO),
            carts: CartStore::new(None, 10),
            server_id: TEST_SERVER_ID.to_string(),
            min_cart_songs: 5,
        })
    }

    /// Create a user and return it with an "Authorization" header value
    pub async fn login_as(state: &AppState, username: &str) -> (User, String) {
        let mut user = User::new(username.to_string(), String::new());
        user.id = UserTable::insert(&state.pool, &user).await.unwrap();

        let identity = UserIdentity {
            id: user.id,
            username: user.username.clone(),
        };
        let token = create_jwt(identity, &state.server_id, "access", 60).unwrap();
        (user, format!("Bearer {}", token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_preflight_allows_client_headers() {
        let app = test::init_service(App::new().wrap(cors()).configure(configure)).await;
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/generate-playlists")
            .insert_header(("Origin", "http://localhost:5173"))
            .insert_header(("Access-Control-Request-Method", "POST"))
            .insert_header(("Access-Control-Request-Headers", "apikey, content-type"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
