//! # Errores del Servidor
//! src/error.rs
//!
//! Tipos de error compartidos por todos los módulos. Los errores de parsing
//! se quedan dentro de la conexión que los produjo; los de I/O se registran
//! y nunca tumban el loop de aceptación.

use crate::http::request::ParseError;
use thiserror::Error;

/// Errores que puede producir el servidor
#[derive(Error, Debug)]
pub enum ServerError {
    /// Fallo de transporte (accept, read, write, archivos)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request malformado
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuración inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// La dirección host:port no resolvió a ninguna IP
    #[error("Could not resolve address: {0}")]
    AddressResolution(String),
}

/// Result con el error del servidor
pub type Result<T> = std::result::Result<T, ServerError>;
