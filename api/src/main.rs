use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use msg_api::app::{create_app, AppState};
use msg_api::telemetry::init_tracing;
use msg_core::services::verification::{
    BypassPolicy, ChannelResolver, CodeStore, VerificationService, VerificationServiceConfig,
};
use msg_infra::{InMemoryCodeStore, RedisCodeStore, VendorRegistry};
use msg_shared::{AppConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        store = ?config.cache.backend,
        "Starting messaging API server"
    );

    // The SMS channel is shared by every request; bad credentials abort startup
    let registry = Arc::new(
        VendorRegistry::from_config(&config.sms).context("failed to build vendor registry")?,
    );

    match config.cache.backend {
        StoreBackend::Redis => {
            let store = RedisCodeStore::connect(config.cache.clone())
                .await
                .context("failed to connect to Redis")?;
            if !store.health_check().await.context("Redis health check failed")? {
                warn!("Redis health check returned an unexpected reply");
            }
            serve(&config, Arc::new(store), registry).await
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory code store; codes are lost on restart and not shared between instances");
            serve(&config, Arc::new(InMemoryCodeStore::new()), registry).await
        }
    }
}

/// Wire the service around the chosen store and run the server until shutdown
async fn serve<S, R>(config: &AppConfig, store: Arc<S>, resolver: Arc<R>) -> anyhow::Result<()>
where
    S: CodeStore + 'static,
    R: ChannelResolver + 'static,
{
    let service = VerificationService::new(
        store,
        resolver,
        BypassPolicy::from_config(&config.verification),
        VerificationServiceConfig::from_policy(&config.verification),
    );
    let app_state = web::Data::new(AppState::new(Arc::new(service)));
    let json_limit = config.server.max_payload_size;

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), json_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}
