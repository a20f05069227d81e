use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use persistence::repositories::{AdminRepository, AdminSessionRepository, SettingRepository};
use shared::jwt::JwtConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, security_headers_middleware, trace_id,
    SecurityHeaders,
};
use crate::routes::{
    admins, auth, banners, event_categories, events, google_auth, health, orders, products,
    settings, testimonies,
};
use crate::services::admin_session::SessionService;
use crate::services::auth::AdminAuthService;
use crate::services::cookies::CookieHelper;
use crate::services::google_oauth::GoogleOAuthClient;
use crate::services::settings_cache::SettingsCache;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub cookies: CookieHelper,
    pub settings_cache: Arc<SettingsCache>,
    /// `None` when Google sign-in is not configured.
    pub google: Option<Arc<GoogleOAuthClient>>,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let jwt = Arc::new(JwtConfig::new(
            &config.jwt.secret,
            config.jwt.token_expiry_secs,
            config.jwt.leeway_secs,
        ));
        let cookies = CookieHelper::new(config.cookies.clone(), config.jwt.token_expiry_secs);
        let settings_cache = Arc::new(SettingsCache::new(Arc::new(SettingRepository::new(
            pool.clone(),
        ))));
        let google = GoogleOAuthClient::from_config(&config.oauth).map(Arc::new);

        Self {
            pool,
            config: Arc::new(config),
            jwt,
            cookies,
            settings_cache,
            google,
        }
    }

    pub fn admin_auth(&self) -> AdminAuthService {
        AdminAuthService::new(AdminRepository::new(self.pool.clone()), self.jwt.clone())
    }

    pub fn sessions(&self) -> SessionService {
        SessionService::new(AdminSessionRepository::new(self.pool.clone()))
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let state = AppState::new(config, pool);
    let config = state.config.clone();

    // Credentialed CORS needs explicit origins, methods and headers.
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-request-id"),
            ])
            .allow_credentials(true)
    };

    let admin_routes = Router::new()
        // Admin accounts
        .route(
            "/api/admin/admins",
            get(admins::list_admins).post(admins::create_admin),
        )
        .route(
            "/api/admin/admins/:admin_id",
            axum::routing::delete(admins::delete_admin),
        )
        // Products
        .route(
            "/api/admin/products",
            get(products::admin_list_products).post(products::create_product),
        )
        .route(
            "/api/admin/products/bulk-visibility",
            post(products::bulk_set_visibility),
        )
        .route(
            "/api/admin/products/:product_id",
            get(products::admin_get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Orders
        .route("/api/admin/orders", get(orders::list_orders))
        .route("/api/admin/orders/:order_id", get(orders::get_order))
        .route(
            "/api/admin/orders/:order_id/status",
            patch(orders::update_order_status),
        )
        .route(
            "/api/admin/orders/:order_id/payment",
            patch(orders::update_payment_status),
        )
        // Banners
        .route(
            "/api/admin/banners",
            get(banners::admin_list_banners).post(banners::create_banner),
        )
        .route(
            "/api/admin/banners/:banner_id",
            put(banners::update_banner).delete(banners::delete_banner),
        )
        // Event categories
        .route(
            "/api/admin/event-categories",
            get(event_categories::list_event_categories)
                .post(event_categories::create_event_category),
        )
        .route(
            "/api/admin/event-categories/:category_id",
            put(event_categories::update_event_category)
                .delete(event_categories::delete_event_category),
        )
        // Events
        .route(
            "/api/admin/events",
            get(events::admin_list_events).post(events::create_event),
        )
        .route(
            "/api/admin/events/:event_id",
            get(events::admin_get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        // Testimonies
        .route(
            "/api/admin/testimonies",
            get(testimonies::admin_list_testimonies).post(testimonies::create_testimony),
        )
        .route(
            "/api/admin/testimonies/:testimony_id",
            put(testimonies::update_testimony).delete(testimonies::delete_testimony),
        )
        // Settings
        .route("/api/admin/settings", get(settings::list_settings))
        .route(
            "/api/admin/settings/:key",
            put(settings::upsert_setting).delete(settings::delete_setting),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let auth_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/setup", get(auth::setup_status).post(auth::setup))
        .route("/api/auth/google", get(google_auth::start))
        .route("/api/auth/google/callback", get(google_auth::callback))
        .route("/api/auth/google/session", get(google_auth::session));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .route("/api/products", get(products::list_products))
        .route("/api/products/:product_id", get(products::get_product))
        .route("/api/banners", get(banners::list_banners))
        .route(
            "/api/event-categories",
            get(event_categories::list_event_categories),
        )
        .route("/api/events", get(events::list_events))
        .route("/api/events/:event_id", get(events::get_event))
        .route("/api/testimonies", get(testimonies::list_testimonies))
        .route("/api/orders", post(orders::checkout))
        .route("/api/orders/:order_number", get(orders::track_order))
        .route("/api/settings/contact", get(settings::contact_numbers));

    let security_headers = SecurityHeaders {
        hsts_enabled: config.security.hsts_enabled,
    };

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            security_headers,
            security_headers_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
