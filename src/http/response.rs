//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <p>Hola</p>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use session_http_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/html")
//!     .with_body("<p>Hola</p>");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en orden de inserción; un nombre repetido reemplaza al anterior
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe en su posición original.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo y el `Content-Length` correspondiente
    ///
    /// El largo se cuenta en bytes, no en caracteres.
    ///
    /// # Ejemplo
    /// ```
    /// use session_http_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok).with_body("ñ");
    /// assert_eq!(response.header("Content-Length"), Some("2"));
    /// ```
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        let length = self.body.len().to_string();
        self.add_header("Content-Length", &length);
        self
    }

    /// Establece el cuerpo sin declarar `Content-Length`
    ///
    /// El cliente lee hasta que el servidor cierra la conexión.
    pub fn with_unframed_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Respuesta HTML con `Content-Length`
    pub fn html(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/html")
            .with_body(body)
    }

    /// Respuesta de error en texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use session_http_server::http::{Response, StatusCode};
    ///
    /// let response = Response::plain(StatusCode::BadRequest, "Name not provided");
    /// assert_eq!(response.body(), b"Name not provided");
    /// ```
    pub fn plain(status: StatusCode, message: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(message)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_header_overwrite_keeps_position() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("X-Custom", "a")
            .with_header("Content-Type", "text/html");

        assert_eq!(response.headers().len(), 2);
        assert_eq!(response.headers()[0].0, "Content-Type");
        assert_eq!(response.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let response = Response::new(StatusCode::Ok).with_body("héllo");

        assert_eq!(response.header("Content-Length"), Some("6"));
        assert_eq!(response.body().len(), 6);
    }

    #[test]
    fn test_unframed_body_has_no_content_length() {
        let response = Response::new(StatusCode::NotFound).with_unframed_body("File not found");

        assert_eq!(response.header("Content-Length"), None);
        assert_eq!(response.body(), b"File not found");
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::html(StatusCode::Ok, "Test");
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 4\r\n\r\nTest"
        );
    }

    #[test]
    fn test_empty_body_response() {
        let text = String::from_utf8(Response::new(StatusCode::Ok).to_bytes()).unwrap();

        assert_eq!(text, "HTTP/1.1 200 OK\r\n\r\n");
    }
}
