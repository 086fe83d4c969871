use std::sync::Arc;

use tracing::info;

use sitegate_server::{
    build_router,
    config::ServerConfig,
    mailer::ResendMailer,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let http = reqwest::Client::new();
    let mailer = Arc::new(ResendMailer::new(
        http.clone(),
        config.resend_api_key.clone(),
        config.contact_to.clone(),
        config.contact_from.clone(),
    ));

    let bind_addr = config.bind_addr;
    let state = AppState {
        config: Arc::new(config),
        http,
        mailer,
    };
    let app = build_router(state);

    info!("Server listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
