//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! - `tcp`: socket de escucha, loop de aceptación y apagado por inactividad
//! - `connection`: el worker que atiende cada conexión aceptada

pub mod connection;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{Server, ServerState, ShutdownHandle};
