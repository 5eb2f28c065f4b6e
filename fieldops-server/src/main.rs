use fieldops_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. dotenv, configuration, logging
    let config = setup_environment();

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        timezone = %config.timezone,
        "Fieldops server starting..."
    );

    // 2. Database, storage and email client
    let state = match ServerState::initialize(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize server state: {}", e);
            return Err(e.into());
        }
    };

    // 3. HTTP server (background tasks start inside run)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
