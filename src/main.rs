use harbor::config::Config;
use harbor::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    harbor::logging::init();

    let cfg = Config::load();

    server::listener::run(&cfg, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
