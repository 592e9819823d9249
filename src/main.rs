use std::sync::Arc;
use tokio::net::TcpListener;
use tiktok_scraper_service::{
    AppState,
    api::routes::create_router,
    config::Config,
    scraper::EngineClient,
    telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    // Load configuration once; handlers only ever see this snapshot
    let config = Config::load()?;
    let server_addr = config.server_addr;
    tracing::info!(
        engine = %config.engine_url,
        browser = %config.session.browser,
        has_token = config.session.ms_token.is_some(),
        "configuration loaded"
    );

    let source = EngineClient::new(&config.engine_url)?;

    let app_state = AppState {
        config: Arc::new(config),
        source: Arc::new(source),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;

    tracing::info!("Listening on {}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
