//! # Sesiones por IP
//! src/session.rs
//!
//! Asocia la IP de cada cliente (sin el puerto) con un nombre. Vive solo en
//! memoria mientras dure el proceso: sin expiración ni límite de tamaño, así
//! que crece con cada IP distinta que cambia su nombre.

use dashmap::DashMap;
use std::net::IpAddr;

/// Almacén concurrente de nombres por IP
///
/// Se comparte entre los threads de conexión detrás de un `Arc`. Dos
/// escrituras simultáneas para la misma IP no corrompen el mapa; gana la
/// última en llegar.
#[derive(Debug, Default)]
pub struct SessionStore {
    names: DashMap<IpAddr, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre registrado para la IP, si existe
    pub fn get(&self, address: IpAddr) -> Option<String> {
        self.names.get(&address).map(|entry| entry.value().clone())
    }

    /// Registra o reemplaza el nombre de la IP
    pub fn set(&self, address: IpAddr, name: &str) {
        self.names.insert(address, name.to_string());
    }

    /// Cantidad de IPs con nombre registrado
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
