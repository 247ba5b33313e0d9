use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cartbridge::adapters::http::{app, CheckoutAppState};
use cartbridge::adapters::shopify::{ShopifyBackoffice, ShopifyConfig};
use cartbridge::adapters::stripe::{StripeGateway, StripeGatewayConfig};
use cartbridge::config::AppConfig;
use cartbridge::domain::webhook::WebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config is loaded and validated once; nothing reads the
    // environment after this point.
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let payment_gateway = Arc::new(StripeGateway::new(StripeGatewayConfig::from_app(
        &config.payment,
    )));
    let backoffice = Arc::new(ShopifyBackoffice::new(ShopifyConfig::from_app(
        &config.backoffice,
    )));
    let webhook_verifier = WebhookVerifier::new(config.payment.webhook_secret.clone());

    let state = CheckoutAppState {
        payment_gateway,
        backoffice,
        webhook_verifier,
        site: config.site.clone(),
    };

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        payment_mode = if config.payment.is_live_mode() { "live" } else { "test" },
        "cartbridge listening"
    );

    axum::serve(listener, app(state, &config.server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
