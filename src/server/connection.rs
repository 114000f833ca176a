//! # Worker de Conexión
//! src/server/connection.rs
//!
//! Atiende una conexión de punta a punta: read → parse → route → write →
//! close. La conexión se cierra al soltar el `TcpStream`, una sola vez, en
//! todas las ramas.

use crate::error::{Result, ServerError};
use crate::http::Request;
use crate::router::Router;
use std::io::{Read, Write};
use std::net::{IpAddr, TcpStream};
use std::time::Instant;

/// Bytes leídos por request, en una sola lectura
///
/// Un request más grande se trunca y casi seguro falla el parsing o llega
/// con el body incompleto.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Atiende la conexión y registra cualquier fallo
///
/// Es lo que corre dentro del thread de cada conexión: nunca propaga el
/// error hacia el loop de aceptación.
pub fn serve(stream: TcpStream, peer: IpAddr, router: &Router) {
    match handle_connection(stream, peer, router) {
        Ok(()) => {}
        Err(ServerError::Parse(e)) => {
            tracing::warn!(%peer, error = %e, "request inválido, se cierra sin respuesta");
        }
        Err(e) => {
            tracing::error!(%peer, error = %e, "error atendiendo la conexión");
        }
    }
}

/// Lee un request, lo despacha y escribe la respuesta
///
/// Si no llegan bytes o no son UTF-8 válido, retorna `Ok(())` sin escribir
/// nada. Si la request line es inválida, retorna `ServerError::Parse` sin
/// escribir nada.
pub fn handle_connection(mut stream: TcpStream, peer: IpAddr, router: &Router) -> Result<()> {
    let start = Instant::now();

    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let bytes_read = stream.read(&mut buffer)?;

    if bytes_read == 0 {
        tracing::debug!(%peer, "conexión cerrada sin datos");
        return Ok(());
    }

    let Ok(text) = std::str::from_utf8(&buffer[..bytes_read]) else {
        tracing::debug!(%peer, bytes_read, "request no es UTF-8, se ignora");
        return Ok(());
    };

    let request = Request::parse(text)?;
    tracing::debug!(%peer, method = request.method().as_str(), path = request.path(), "request recibido");

    let response = router.route(&request, peer)?;

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let method = request.method().as_str();
    if status.is_client_error() {
        tracing::warn!(%peer, method, path = request.path(), status = status.as_u16(), elapsed_ms, "respuesta de error enviada");
    } else {
        tracing::info!(%peer, method, path = request.path(), status = status.as_u16(), elapsed_ms, "respuesta enviada");
    }

    Ok(())
}
