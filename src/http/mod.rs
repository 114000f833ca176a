//! # Módulo HTTP
//!
//! Subconjunto de HTTP/1.1 implementado desde cero:
//!
//! - Parsing tolerante de requests
//! - Construcción de responses con framing CRLF
//! - Códigos de estado
//!
//! No hay keep-alive ni chunked encoding: cada conexión atiende un request
//! y se cierra.

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

pub use request::{Method, ParseError, RawRequest, Request};
pub use response::Response;
pub use status::StatusCode;
