//! # Session HTTP Server - Entry Point
//! src/main.rs

use session_http_server::config::Config;
use session_http_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_http_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "configuración inválida");
        std::process::exit(2);
    }
    config.print_summary();

    let mut server = Server::new(config);

    // Bloquea hasta que se cumple el timeout de inactividad
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}
