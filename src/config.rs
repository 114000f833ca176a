//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por argumentos CLI con respaldo en variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./session_http_server --port 8080 --timeout 30 --assets-dir ./assets
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 IDLE_TIMEOUT=30 ./session_http_server
//! ```

use crate::error::{Result, ServerError};
use clap::Parser;
use std::time::Duration;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "session_http_server")]
#[command(about = "Servidor HTTP/1.1 con sesiones por IP que se apaga tras un periodo sin conexiones")]
#[command(version)]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor (0 = puerto efímero)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Segundos sin aceptar conexiones antes de apagarse
    #[arg(short = 't', long = "timeout", default_value = "60", env = "IDLE_TIMEOUT")]
    pub idle_timeout_secs: u64,

    /// Directorio con el contenido estático
    #[arg(long, default_value = "assets", env = "ASSETS_DIR")]
    pub assets_dir: String,

    /// Máximo de conexiones atendidas a la vez (0 = sin límite)
    #[arg(long = "max-connections", default_value = "0", env = "MAX_CONNECTIONS")]
    pub max_connections: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use session_http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de inactividad como `Duration`
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Límite de conexiones simultáneas, si hay uno
    pub fn connection_limit(&self) -> Option<usize> {
        (self.max_connections > 0).then_some(self.max_connections)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::InvalidConfig("host must not be empty".to_string()));
        }

        if self.idle_timeout_secs == 0 {
            return Err(ServerError::InvalidConfig("idle timeout must be > 0".to_string()));
        }

        if self.assets_dir.is_empty() {
            return Err(ServerError::InvalidConfig("assets dir must not be empty".to_string()));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        tracing::info!(
            address = %self.address(),
            idle_timeout_secs = self.idle_timeout_secs,
            assets_dir = %self.assets_dir,
            "configuración cargada"
        );

        match self.connection_limit() {
            Some(limit) => tracing::info!(max_connections = limit, "límite de conexiones activo"),
            None => tracing::info!("sin límite de conexiones simultáneas"),
        }
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            idle_timeout_secs: 60,
            assets_dir: "assets".to_string(),
            max_connections: 0,
        }
    }
}
