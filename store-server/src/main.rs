use store_server::{Config, Server, ServerState, init_logger, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Environment + logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    if config.is_production() {
        // Daily rolling files in production; stdout everywhere else
        init_logger_with_file(None, Some("logs"));
    } else {
        init_logger();
    }

    tracing::info!("Store server starting...");

    // Initialize server state (catalog, ledger, checkout, dashboard)
    let state = ServerState::initialize(&config).await?;

    // Run the HTTP server (starts background tasks)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
