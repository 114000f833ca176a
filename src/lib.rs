//! # Session HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: acepta conexiones TCP,
//! sirve contenido estático sustituyendo `{{name}}` por el nombre que cada
//! IP registró con `POST /change_name`, y se apaga solo cuando pasa el
//! timeout de inactividad sin conexiones nuevas.
//!
//! ## Arquitectura
//!
//! - `http`: parsing de requests y framing de responses
//! - `session`: nombres por IP, en memoria
//! - `assets`: contenido estático detrás del trait `ContentStore`
//! - `router`: despacho GET/POST/405 y handlers
//! - `server`: loop de aceptación, ciclo de vida y worker por conexión
//! - `config`: argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use session_http_server::config::Config;
//! use session_http_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod server;
pub mod session;

pub use error::{Result, ServerError};
