//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser tolerante: nunca entra en pánico y cualquier fallo estructural se
//! reporta como un único `ParseError`, sin requests parciales.
//!
//! ## Formato
//!
//! ```text
//! POST /change_name HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! name=Alice
//! ```
//!
//! 1. **Request Line**: `METHOD PATH VERSION`, separados por un espacio
//! 2. **Headers**: `Name: Value`, uno por línea
//! 3. **Separador**: la primera secuencia `\r\n\r\n`
//! 4. **Body**: todo lo que sigue al separador, tal cual

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre el bloque de headers y el body
const BODY_SEPARATOR: &str = "\r\n\r\n";

/// Método HTTP de un request
///
/// Solo GET y POST tienen handlers; cualquier otro token se conserva tal
/// cual para poder devolverlo en la respuesta 405.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso estático
    GET,

    /// POST - Enviar un formulario
    POST,

    /// Cualquier otro token (DELETE, PUT, HEAD, ...)
    Other(String),
}

impl Method {
    /// Convierte un token de la request line en un método
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// La primera línea está vacía
    #[error("Empty request line")]
    EmptyRequestLine,

    /// La request line no tiene exactamente tres tokens
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// El path no empieza con '/'
    #[error("Invalid request path: {0:?}")]
    InvalidPath(String),
}

/// Request separado en sus tres bloques, antes de validar la request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    /// Primera línea sin interpretar
    pub request_line: String,

    /// Headers con las claves tal como llegaron
    pub headers: HashMap<String, String>,

    /// Body crudo (puede ser vacío)
    pub body: String,
}

impl RawRequest {
    /// Separa el texto en request line, headers y body
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use session_http_server::http::RawRequest;
    ///
    /// let raw = RawRequest::parse("GET / HTTP/1.1\r\nHost: a\r\n\r\nhola").unwrap();
    /// assert_eq!(raw.request_line, "GET / HTTP/1.1");
    /// assert_eq!(raw.headers.get("Host").map(String::as_str), Some("a"));
    /// assert_eq!(raw.body, "hola");
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (head, body) = text.split_once(BODY_SEPARATOR).unwrap_or((text, ""));

        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        if request_line.is_empty() {
            return Err(ParseError::EmptyRequestLine);
        }

        Ok(RawRequest {
            request_line: request_line.to_string(),
            headers: Self::parse_headers(lines),
            body: body.to_string(),
        })
    }

    /// Parsea los headers
    ///
    /// Las líneas sin ':' se ignoran; un header repetido se queda con el
    /// último valor.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        headers
    }
}

/// Request HTTP validado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    headers: HashMap<String, String>,
    body: String,
}

impl Request {
    /// Parsea un request completo desde texto
    ///
    /// La request line debe tener exactamente tres tokens separados por un
    /// espacio; si no, el request entero es inválido.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use session_http_server::http::{Method, Request};
    ///
    /// let request = Request::parse("POST /change_name HTTP/1.1\r\n\r\nname=Ana").unwrap();
    /// assert_eq!(request.method(), &Method::POST);
    /// assert_eq!(request.path(), "/change_name");
    /// assert_eq!(request.body(), "name=Ana");
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let raw = RawRequest::parse(text)?;
        Self::from_raw(raw)
    }

    /// Valida la request line de un `RawRequest`
    pub fn from_raw(raw: RawRequest) -> Result<Self, ParseError> {
        let parts: Vec<&str> = raw.request_line.split(' ').collect();
        let [method, path, version] = parts.as_slice() else {
            return Err(ParseError::InvalidRequestLine(raw.request_line.clone()));
        };

        if !path.starts_with('/') {
            return Err(ParseError::InvalidPath(path.to_string()));
        }

        Ok(Request {
            method: Method::from_token(method),
            path: path.to_string(),
            version: version.to_string(),
            headers: raw.headers,
            body: raw.body,
        })
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (la clave distingue mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &str {
        &self.body
    }
}
