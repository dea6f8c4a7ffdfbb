//! Gestio 库存面板服务入口

use gestio::{
    infrastructure::{logger, store},
    router, AppState, Config, ProductService,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _guard = logger::init(&config.logging)?;

    info!("Starting Gestio inventory panel...");

    let store = store::open(&config.store).await.map_err(|e| {
        error!("Failed to open product store: {}", e);
        e
    })?;

    let service = ProductService::new(store, config.inventory.low_stock_threshold);
    let app = router(
        AppState::new(service),
        Duration::from_secs(config.server.timeout_seconds),
    );

    let listener = TcpListener::bind(config.server_address()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 Gestio panel running on http://{}", addr);
    info!("📊 Available endpoints:");
    info!("   GET      /panel/products          - Product listing (?q=name)");
    info!("   GET/POST /panel/products/new      - Create product");
    info!("   GET/POST /panel/products/:id/edit - Edit product");
    info!("   POST     /panel/products/:id/delete - Delete product");
    info!("   GET      /panel/dashboard         - Inventory metrics");
    info!("   GET      /panel/alerts            - Low stock alerts");
    info!("   GET/POST /api/products            - JSON listing / create");
    info!("   GET      /health                  - Health check");
    info!(
        "Low stock threshold: {}",
        config.inventory.low_stock_threshold
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }

    info!("Shutting down gracefully...");
}
