use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use adapters::PgDocumentRepository;
use application::{BillingService, GenerationService};
use config::ServerConfig;
use trendify::{DocumentRepository, PromptInvoker};

/// Type aliases for application services over the shared document store
pub type AppGenerationService = GenerationService<dyn DocumentRepository>;
pub type AppBillingService = BillingService<dyn DocumentRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<Arc<str>>,
    pub generation_service: Arc<AppGenerationService>,
    pub billing_service: Arc<AppBillingService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Trendify API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full router: public health, docs and webhooks plus the authenticated API
pub fn app(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::flows::router())
        .merge(routes::generations::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::webhooks::router())
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📈 Trendify API initializing...");

    let config = ServerConfig::from_secrets(&secrets).map_err(anyhow::Error::from)?;

    if config.api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No TRENDIFY_API_KEY set - authentication disabled");
    }

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {e}"))?;

    tracing::info!("✅ Database migrations completed");

    // One invoker per configured provider, built once
    let invokers: Vec<PromptInvoker> = config
        .models
        .iter()
        .map(|model| {
            tracing::info!(
                "🤖 {} provider configured (model {})",
                model.provider,
                model.model
            );
            PromptInvoker::new(adapters::provider_for(model), model.clone())
        })
        .collect();

    if invokers.is_empty() {
        tracing::warn!("⚠️  No GEMINI_API_KEY or OPENAI_API_KEY set - flows disabled");
    }

    for gateway in [trendify::PaymentGateway::Asaas, trendify::PaymentGateway::AbacatePay] {
        if !config.webhook_secrets.contains_key(&gateway) {
            tracing::warn!(
                "⚠️  No {} set - {} webhooks rejected",
                gateway.secret_name(),
                gateway
            );
        }
    }

    // Initialize application services
    let store: Arc<dyn DocumentRepository> = Arc::new(PgDocumentRepository::new(pool));
    let generation_service = Arc::new(GenerationService::new(store.clone(), invokers));
    let billing_service = Arc::new(BillingService::new(store, config.webhook_secrets));

    let state = AppState {
        api_key: config.api_key.map(Arc::from),
        generation_service,
        billing_service,
    };

    let router = app(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Trendify API ready");

    Ok(router.into())
}
