use fsdwire::client::{Client, DisconnectReason};
use fsdwire::config::Config;
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Initialize logger, RUST_LOG takes precedence over the config file
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    let address = format!("{}:{}", config.server.address, config.server.port);
    log::info!("Connecting to {} as {}...", address, config.login.callsign);
    let stream = TcpStream::connect(&address).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        log::info!("Shutting down...");
    };

    let mut client = Client::new(stream, config)?;
    match client.run_until(shutdown).await? {
        DisconnectReason::Closed => log::info!("Disconnected"),
        DisconnectReason::LoggedOff => log::info!("Logged off"),
        DisconnectReason::Killed(reason) => log::warn!("Kicked from the network: {}", reason),
        DisconnectReason::ServerError(code, description) => {
            log::error!("Disconnected after {:?}: {}", code, description)
        }
    }

    Ok(())
}
