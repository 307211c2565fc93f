use gym_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logger)
    setup_environment()?;

    print_banner();

    tracing::info!("Gym server starting...");

    // 2. Configuration
    let config = Config::from_env()?;
    tracing::info!("Environment: {}", config.environment);

    // 3. State (opens the database)
    let state = ServerState::initialize(&config).await?;

    // 4. Serve until Ctrl-C, then close the pool
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
